use thiserror::Error;

#[derive(Debug, Error)]
pub enum XrayDbError {
    #[error("unknown element: {0}")]
    UnknownElement(String),

    #[error("unknown edge '{edge}' for element '{element}'")]
    UnknownEdge { element: String, edge: String },

    #[error("unknown line '{line}' for element '{element}'")]
    UnknownLine { element: String, line: String },

    #[error("unknown ion: {0}")]
    UnknownIon(String),

    #[error("no {quantity} data for element '{element}'")]
    UnsupportedQuantity {
        element: String,
        quantity: &'static str,
    },

    #[error("malformed {table} data for '{element}': {reason}")]
    MalformedCoefficients {
        table: &'static str,
        element: String,
        reason: String,
    },

    #[error("{value} outside tabulated range [{min}, {max}]")]
    OutOfDomain { value: f64, min: f64, max: f64 },

    /// Lines exist for the edge but their intensities sum to zero.
    #[error("emission lines of edge '{edge}' for element '{element}' have zero total intensity")]
    ZeroLineIntensity { element: String, edge: String },

    #[error("data error: {0}")]
    DataError(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XrayDbError>;

impl XrayDbError {
    pub(crate) fn malformed(
        table: &'static str,
        element: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedCoefficients {
            table,
            element: element.to_string(),
            reason: reason.into(),
        }
    }
}
