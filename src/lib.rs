//! Hierarchical fuzzy matcher for Vietnamese postal addresses.
//!
//! Given a free-form address string, [`Engine::resolve`] returns its canonical province,
//! district, and ward, drawn from a reference catalog loaded once at startup.

pub mod abbreviations;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod levenshtein;
pub mod normalizer;
pub mod ranker;
pub mod resolver;
pub mod timeout;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::info;

pub use abbreviations::AbbreviationTable;
pub use catalog::{Catalog, District, Province, Ward};
pub use config::ResolverConfig;
pub use error::{CatalogError, CatalogResult};
pub use fuzzy::FuzzyIndexes;
pub use resolver::{ResolvedAddress, OVERTIME_SENTINEL};

struct EngineInner {
    catalog: Catalog,
    abbreviations: AbbreviationTable,
    fuzzy: FuzzyIndexes,
    caches: cache::Caches,
    config: ResolverConfig,
}

/// The assembled engine: an immutable catalog/fuzzy-index/abbreviation-table triple built once
/// at startup, plus the mutable caches shared across queries. Cheap to clone — clones share the same underlying data via `Arc`,
/// which is what lets [`Engine::resolve`] hand a copy to its timeout worker thread.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

impl Engine {
    pub fn build(
        catalog: Catalog,
        abbreviations: AbbreviationTable,
        fuzzy: FuzzyIndexes,
        config: ResolverConfig,
    ) -> Self {
        let districts = catalog.provinces().flat_map(|p| p.districts()).count();
        let wards = catalog
            .provinces()
            .flat_map(|p| p.districts())
            .flat_map(|d| d.wards())
            .count();
        info!(
            provinces = catalog.provinces.len(),
            districts,
            wards,
            orphan_districts = catalog.stats.orphan_districts,
            orphan_wards = catalog.stats.orphan_wards,
            "catalog loaded"
        );
        let caches = cache::Caches::new(
            config.normalize_cache_capacity,
            config.distance_cache_capacity,
            config.cleaned_cache_capacity,
        );
        Self {
            inner: Arc::new(EngineInner {
                catalog,
                abbreviations,
                fuzzy,
                caches,
                config,
            }),
        }
    }

    /// Resolves one address string under the configured deadline. Never fails: every
    /// outcome — a full match, a partial match, no match, or an overtime sentinel — is expressed
    /// in the returned [`ResolvedAddress`].
    pub fn resolve(&self, address: &str) -> ResolvedAddress {
        if let Some(cached) = self.inner.caches.resolution_cached(address) {
            return cached;
        }

        let engine = self.clone();
        let address_owned = address.to_string();
        let deadline = self.inner.config.deadline;

        let outcome = timeout::run_with_deadline(deadline, move |cancelled: &AtomicBool| {
            engine.resolve_uncached(&address_owned, cancelled)
        });

        match outcome {
            Some(resolved) => {
                self.inner.caches.store_resolution(address, resolved.clone());
                resolved
            }
            None => ResolvedAddress::overtime(),
        }
    }

    fn resolve_uncached(&self, address: &str, cancelled: &AtomicBool) -> ResolvedAddress {
        let cleaned = self.inner.caches.clean_cached(address);
        resolver::resolve_tokens(
            &cleaned,
            &self.inner.catalog,
            &self.inner.abbreviations,
            &self.inner.fuzzy,
            &self.inner.caches,
            &self.inner.config,
            cancelled,
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
