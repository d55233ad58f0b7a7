use std::collections::TryReserveError;

/// Every way an operation can end without a result.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Path resolution is disabled for this configuration")]
    Disabled,
    #[error("No loaded image matches `{0}`")]
    ImageNotFound(String),
    #[error("The loader reported no images")]
    NoImages,
    #[error("Cannot isolate a file name in `{0}`")]
    MissingBaseName(String),
    #[error("Dynamic loader introspection failed: {0}")]
    Loader(String),
    #[error("Wide encoding {0} does not match the platform wide character width")]
    UnsupportedEncoding(&'static str),
    #[error("Unknown wide encoding `{0}`")]
    UnknownEncoding(String),
    #[error("Invalid {0} text")]
    Encoding(&'static str),
    #[error("Allocation failed")]
    Allocation(#[from] TryReserveError),
    #[error("Loaded image introspection is not supported on this platform")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, Error>;
