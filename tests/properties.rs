//! Property tests for the resolver's core invariants.

mod common;

use proptest::prelude::*;

use diachi_match::fuzzy::LengthBuckets;
use diachi_match::normalizer::normalize;

/// A small alphabet mixing catalog vocabulary with noise, so generated strings sometimes hit the
/// fixture catalog and sometimes don't.
fn address_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("Xã".to_string()),
            Just("Huyện".to_string()),
            Just("Tỉnh".to_string()),
            Just("An".to_string()),
            Just("Bình".to_string()),
            Just("Cao".to_string()),
            Just("Lãnh".to_string()),
            Just("Đồng".to_string()),
            Just("Tháp".to_string()),
            Just("Hồ".to_string()),
            Just("Chí".to_string()),
            Just("Minh".to_string()),
            Just("P.13".to_string()),
            "[a-z]{1,8}".prop_map(|s| s),
        ],
        0..6,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn normalization_is_idempotent(s in ".{0,40}") {
        let once = normalize(&s);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn cache_transparency(s in address_strategy()) {
        let engine = common::fixture_engine();
        let cold = engine.resolve(&s);
        let warm = engine.resolve(&s);
        prop_assert_eq!(cold, warm);
    }

    #[test]
    fn determinism_across_calls(s in address_strategy()) {
        let engine = common::fixture_engine();
        let first = engine.resolve(&s);
        let second = engine.resolve(&s);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn canonical_output_is_always_a_catalog_name(s in address_strategy()) {
        let engine = common::fixture_engine();
        let result = engine.resolve(&s);
        let catalog = engine.catalog();

        if !result.province.is_empty() && result.province != diachi_match::OVERTIME_SENTINEL {
            prop_assert!(catalog.province_by_name(&result.province).is_some());
        }
        if !result.district.is_empty() {
            prop_assert!(catalog.district_by_name(&result.district).is_some());
        }
        if !result.ward.is_empty() {
            prop_assert!(catalog.ward_by_name(&result.ward).is_some());
        }
    }

    #[test]
    fn hierarchy_consistency(s in address_strategy()) {
        let engine = common::fixture_engine();
        let result = engine.resolve(&s);
        let catalog = engine.catalog();

        if !result.province.is_empty() && !result.district.is_empty() && result.province != diachi_match::OVERTIME_SENTINEL {
            if let Some(province) = catalog.province_by_name(&result.province) {
                let district_in_province = province.districts().any(|d| d.name == result.district);
                prop_assert!(district_in_province);
            }
        }
        if !result.district.is_empty() && !result.ward.is_empty() {
            if let Some(district) = catalog.district_by_name(&result.district) {
                let ward_in_district = district.wards().any(|w| w.name == result.ward);
                prop_assert!(ward_in_district);
            }
        }
    }

    #[test]
    fn length_bucket_totality(names in prop::collection::vec("[A-Za-z ]{1,12}", 1..20)) {
        let buckets = LengthBuckets::build(names.clone());
        for name in &names {
            let norm = normalize(name);
            let len = norm.chars().count();
            let reachable = buckets
                .candidates_near(len, 0)
                .into_iter()
                .any(|(canonical, _)| canonical == name);
            prop_assert!(reachable);
        }
    }
}
