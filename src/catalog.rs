//! The in-memory Province → District → Ward hierarchy, built once at startup from three
//! delimited files and read-only thereafter.

use indexmap::IndexMap;
use tracing::warn;

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone)]
pub struct Ward {
    pub id: String,
    pub name: String,
    pub code: String,
    pub district_id: String,
}

#[derive(Debug, Clone)]
pub struct District {
    pub id: String,
    pub name: String,
    pub code: String,
    pub province_id: String,
    pub wards: IndexMap<String, Ward>,
    /// (canonical, normalized) pairs for this district's wards, precomputed so the resolver's
    /// hierarchy-scoped ranker pass doesn't re-normalize on every query.
    pub(crate) ward_pairs: Vec<(String, String)>,
}

impl District {
    pub fn wards(&self) -> impl Iterator<Item = &Ward> {
        self.wards.values()
    }
}

#[derive(Debug, Clone)]
pub struct Province {
    pub id: String,
    pub name: String,
    pub code: String,
    pub districts: IndexMap<String, District>,
    pub(crate) district_pairs: Vec<(String, String)>,
}

impl Province {
    pub fn districts(&self) -> impl Iterator<Item = &District> {
        self.districts.values()
    }
}

/// Counts of rows dropped during catalog construction because their declared parent id did not
/// exist, which is logged as a warning rather than a hard failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub orphan_districts: usize,
    pub orphan_wards: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub provinces: IndexMap<String, Province>,
    pub stats: LoadStats,
}

struct Row<'a> {
    id: &'a str,
    name: &'a str,
    code: &'a str,
    parent_id: Option<&'a str>,
}

fn parse_rows<'a>(file: &str, text: &'a str) -> CatalogResult<Vec<Row<'a>>> {
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(';').collect();
        match parts.as_slice() {
            [id, name, code] => rows.push(Row {
                id,
                name,
                code,
                parent_id: None,
            }),
            [id, name, code, parent_id] => rows.push(Row {
                id,
                name,
                code,
                parent_id: Some(parent_id),
            }),
            _ => {
                return Err(CatalogError::MalformedRow {
                    file: file.to_string(),
                    line: idx + 1,
                    reason: format!("expected 3 or 4 `;`-separated fields, got {}", parts.len()),
                })
            }
        }
    }
    Ok(rows)
}

impl Catalog {
    /// Parses the three delimited reference files (already read into memory; reading them from
    /// disk is the external collaborator's job, not this component's) into a hierarchy.
    pub fn parse(
        provinces_text: &str,
        districts_text: &str,
        wards_text: &str,
    ) -> CatalogResult<Catalog> {
        let province_rows = parse_rows("provinces", provinces_text)?;
        if province_rows.is_empty() {
            return Err(CatalogError::Empty("provinces".to_string()));
        }
        let district_rows = parse_rows("districts", districts_text)?;
        let ward_rows = parse_rows("wards", wards_text)?;

        let mut provinces: IndexMap<String, Province> = IndexMap::new();
        for row in &province_rows {
            provinces.insert(
                row.id.to_string(),
                Province {
                    id: row.id.to_string(),
                    name: row.name.to_string(),
                    code: row.code.to_string(),
                    districts: IndexMap::new(),
                    district_pairs: Vec::new(),
                },
            );
        }

        let mut stats = LoadStats::default();

        for row in &district_rows {
            let Some(province_id) = row.parent_id else {
                return Err(CatalogError::MalformedRow {
                    file: "districts".to_string(),
                    line: 0,
                    reason: "missing province_id".to_string(),
                });
            };
            match provinces.get_mut(province_id) {
                Some(province) => {
                    province.districts.insert(
                        row.id.to_string(),
                        District {
                            id: row.id.to_string(),
                            name: row.name.to_string(),
                            code: row.code.to_string(),
                            province_id: province_id.to_string(),
                            wards: IndexMap::new(),
                            ward_pairs: Vec::new(),
                        },
                    );
                }
                None => {
                    stats.orphan_districts += 1;
                    warn!(district_id = row.id, province_id, "dropping orphan district row");
                }
            }
        }

        // Build an id -> (province_id, ) index so ward insertion doesn't scan every province.
        let mut district_owner: IndexMap<String, String> = IndexMap::new();
        for province in provinces.values() {
            for district in province.districts.values() {
                district_owner.insert(district.id.clone(), province.id.clone());
            }
        }

        for row in &ward_rows {
            let Some(district_id) = row.parent_id else {
                return Err(CatalogError::MalformedRow {
                    file: "wards".to_string(),
                    line: 0,
                    reason: "missing district_id".to_string(),
                });
            };
            match district_owner.get(district_id) {
                Some(province_id) => {
                    let province = provinces.get_mut(province_id).expect("indexed above");
                    let district = province
                        .districts
                        .get_mut(district_id)
                        .expect("indexed above");
                    district.wards.insert(
                        row.id.to_string(),
                        Ward {
                            id: row.id.to_string(),
                            name: row.name.to_string(),
                            code: row.code.to_string(),
                            district_id: district_id.to_string(),
                        },
                    );
                }
                None => {
                    stats.orphan_wards += 1;
                    warn!(ward_id = row.id, district_id, "dropping orphan ward row");
                }
            }
        }

        // Precompute (canonical, normalized) pairs for hierarchy-scoped ranking.
        for province in provinces.values_mut() {
            for district in province.districts.values_mut() {
                district.ward_pairs = district
                    .wards
                    .values()
                    .map(|w| (w.name.clone(), crate::normalizer::normalize(&w.name)))
                    .collect();
            }
            province.district_pairs = province
                .districts
                .values()
                .map(|d| (d.name.clone(), crate::normalizer::normalize(&d.name)))
                .collect();
        }

        Ok(Catalog { provinces, stats })
    }

    pub fn provinces(&self) -> impl Iterator<Item = &Province> {
        self.provinces.values()
    }

    /// Linear scan; acceptable because it is never called in the per-query hot path.
    /// Returns the first matching province in catalog insertion order, so ties between two
    /// identically-named provinces resolve deterministically to whichever loaded first.
    pub fn province_by_name(&self, name: &str) -> Option<&Province> {
        self.provinces.values().find(|p| p.name == name)
    }

    /// All (canonical, normalized) district pairs across the whole catalog, in insertion order.
    /// Used for the unscoped district-phase fallback when no province has matched yet.
    pub fn all_district_pairs(&self) -> Vec<(String, String)> {
        self.provinces
            .values()
            .flat_map(|p| p.district_pairs.iter().cloned())
            .collect()
    }

    /// All (canonical, normalized) ward pairs across the whole catalog.
    pub fn all_ward_pairs(&self) -> Vec<(String, String)> {
        self.provinces
            .values()
            .flat_map(|p| p.districts.values())
            .flat_map(|d| d.ward_pairs.iter().cloned())
            .collect()
    }

    /// Finds a district anywhere in the catalog by canonical name, first match in insertion
    /// order. Used only when no province was matched (unscoped district phase).
    pub fn district_by_name(&self, name: &str) -> Option<&District> {
        self.provinces
            .values()
            .flat_map(|p| p.districts.values())
            .find(|d| d.name == name)
    }

    /// Finds a ward anywhere in the catalog by canonical name, first match in insertion order.
    pub fn ward_by_name(&self, name: &str) -> Option<&Ward> {
        self.provinces
            .values()
            .flat_map(|p| p.districts.values())
            .flat_map(|d| d.wards.values())
            .find(|w| w.name == name)
    }
}
