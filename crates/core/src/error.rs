#[derive(Debug, thiserror::Error)]
pub enum AmenityError {
    #[error("failed to read catalogue file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("taxonomy error: {0}")]
    Taxonomy(#[from] e2s_taxonomy::TaxonomyError),
}

pub type AmenityResult<T> = std::result::Result<T, AmenityError>;
