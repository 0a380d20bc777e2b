use diachi_match::{AbbreviationTable, Catalog, Engine, FuzzyIndexes, ResolverConfig};

/// A small but multi-province fixture catalog covering every end-to-end scenario plus a
/// handful of decoy entries, so exact-match shortcuts aren't the only code path exercised.
pub fn fixture_engine() -> Engine {
    fixture_engine_with_config(ResolverConfig::default())
}

pub fn fixture_engine_with_config(config: ResolverConfig) -> Engine {
    let provinces = "\
1;Đồng Tháp;DT
2;Hồ Chí Minh;HCM
3;Phú Yên;PY
4;An Giang;AG
5;Hà Nội;HN
6;Cần Thơ;CT
";
    let districts = "\
10;Cao Lãnh;CL;1
11;Tháp Mười;TM;1
20;Bình Thạnh;BT;2
21;Quận 1;Q1;2
30;Phú Hoà;PH;3
31;Tuy Hoà;TH;3
40;An Phú;AP;4
41;Châu Đốc;CD;4
50;Hoàn Kiếm;HK;5
";
    let wards = "\
100;An Bình;AB;10
101;Mỹ Ngãi;MN;10
200;13;W13;20
201;Đa Kao;DK;21
300;Phú Hoà;WPH;30
301;Hòa Đồng;HD;31
400;An Phú;WAP;40
401;Vĩnh Mỹ;VM;41
500;Hàng Bạc;HB;50
";
    let abbreviations = "\
HCM,Hồ Chí Minh
HN,Hà Nội
";

    let catalog = Catalog::parse(provinces, districts, wards).expect("fixture catalog parses");
    let abbreviation_table = AbbreviationTable::parse(abbreviations);

    let province_names: Vec<String> = catalog.provinces().map(|p| p.name.clone()).collect();
    let district_names: Vec<String> = catalog
        .all_district_pairs()
        .into_iter()
        .map(|(canonical, _)| canonical)
        .collect();
    let ward_names: Vec<String> = catalog
        .all_ward_pairs()
        .into_iter()
        .map(|(canonical, _)| canonical)
        .collect();
    let fuzzy = FuzzyIndexes::build(province_names, district_names, ward_names);

    Engine::build(catalog, abbreviation_table, fuzzy, config)
}
