use thiserror::Error;

#[derive(Debug, Error)]
pub enum MibError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source does not contain a valid MIB header: {0}")]
    Format(String),

    #[error("RAW MIB data not supported")]
    UnsupportedEncoding,

    #[error("Requested {requested} frames but the source only holds {available}")]
    ShapeMismatch { requested: usize, available: usize },

    #[error("Source of {size} bytes cannot hold one {record_size}-byte frame record")]
    SourceTooShort { size: u64, record_size: u64 },

    #[error("Invalid scan shape: {0}")]
    InvalidShape(String),
}

impl MibError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MibError>;
