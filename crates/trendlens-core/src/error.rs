use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendlensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Product {0} not found in catalog")]
    ProductNotFound(i64),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Report export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrendlensError>;
