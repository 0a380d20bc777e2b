//! Exercises `Engine::resolve` against the 90 ms budget on a realistically sized
//! synthetic catalog: ~60 provinces, ~600 districts, ~6000 wards, in the same proportions as the
//! real Vietnamese administrative hierarchy.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use diachi_match::{AbbreviationTable, Catalog, Engine, FuzzyIndexes, ResolverConfig};

fn build_synthetic_catalog() -> Engine {
    let mut provinces = String::new();
    let mut districts = String::new();
    let mut wards = String::new();

    let mut ward_id = 0;
    for province_id in 0..60 {
        provinces.push_str(&format!(
            "{province_id};Tỉnh Số {province_id};P{province_id}\n"
        ));
        for district_idx in 0..10 {
            let district_id = province_id * 10 + district_idx;
            districts.push_str(&format!(
                "{district_id};Huyện Số {district_id};D{district_id};{province_id}\n"
            ));
            for ward_idx in 0..10 {
                wards.push_str(&format!(
                    "{ward_id};Xã Số {ward_id}-{ward_idx};W{ward_id};{district_id}\n"
                ));
                ward_id += 1;
            }
        }
    }

    let catalog = Catalog::parse(&provinces, &districts, &wards).expect("synthetic catalog parses");
    let province_names = catalog.provinces().map(|p| p.name.clone()).collect();
    let district_names = catalog
        .all_district_pairs()
        .into_iter()
        .map(|(c, _)| c)
        .collect();
    let ward_names = catalog.all_ward_pairs().into_iter().map(|(c, _)| c).collect();
    let fuzzy = FuzzyIndexes::build(province_names, district_names, ward_names);

    Engine::build(catalog, AbbreviationTable::parse(""), fuzzy, ResolverConfig::default())
}

fn bench_resolve(c: &mut Criterion) {
    let engine = build_synthetic_catalog();

    c.bench_function("resolve_exact_hierarchy", |b| {
        b.iter(|| engine.resolve(black_box("Xã Số 59-9, Huyện Số 59, Tỉnh Số 5")))
    });

    c.bench_function("resolve_fuzzy_typo", |b| {
        b.iter(|| engine.resolve(black_box("Xa So 599, Huyen So 59, Tinh So 5")))
    });

    c.bench_function("resolve_unmatchable", |b| {
        b.iter(|| engine.resolve(black_box("zzzzz qqqqq wwwww")))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
