use thiserror::Error;

/// Failures that can occur while building a [`crate::Catalog`], [`crate::fuzzy::FuzzyIndexes`],
/// or [`crate::abbreviations::AbbreviationTable`] from reference data.
///
/// `resolve` itself never returns this type: per the error taxonomy, catalog-load failure is
/// the only fatal mode, and it can only happen at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read reference file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {file} at line {line}: {reason}")]
    MalformedRow {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("no entries loaded from {0}")]
    Empty(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
