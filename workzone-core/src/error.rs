use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Topology error: {0}")]
    Topology(String),
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(&'static str),
    #[error("Feature index error: {0}")]
    Adapter(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Grid error: {0}")]
    Grid(#[from] h3o::error::InvalidGeometry),
}

impl Error {
    /// Wraps an upstream feature-source failure, keeping the original cause.
    pub fn adapter<E>(cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Adapter(Box::new(cause))
    }
}
