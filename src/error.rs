use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Failures raised while validating or assembling a chart document.
///
/// `build()` only surfaces the first three kinds; `InvalidData` belongs to
/// the surfaces around it (config parsing, document re-parsing).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("structural conflict: {0}")]
    StructuralConflict(String),

    #[error("missing required part: {0}")]
    MissingRequiredPart(String),

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Reason string carried by the error, without the kind prefix.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::StructuralConflict(reason)
            | Self::MissingRequiredPart(reason)
            | Self::EmptyData(reason)
            | Self::InvalidData(reason) => reason,
        }
    }
}
