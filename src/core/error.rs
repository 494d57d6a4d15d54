/// Broad category of a [`FiscalError`], for callers that map failures onto
/// their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfiguration,
    InvalidInput,
}

#[derive(Debug, thiserror::Error)]
pub enum FiscalError {
    /// Parameters or property settings that make a calculation meaningless,
    /// such as a zero depreciation duration or shares not summing to 1.
    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },
    /// Caller-supplied values out of range, missing or unparsable.
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The document itself could not be decoded.
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

impl FiscalError {
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FiscalError::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FiscalError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FiscalError::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            FiscalError::InvalidInput { .. } | FiscalError::MalformedDocument(_) => {
                ErrorKind::InvalidInput
            }
        }
    }

    /// Name of the offending field, when the error concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            FiscalError::InvalidConfiguration { field, .. }
            | FiscalError::InvalidInput { field, .. } => Some(field),
            FiscalError::MalformedDocument(_) => None,
        }
    }

    /// Prefix the field name with the entity it belongs to, e.g.
    /// `notary_fees` becomes `properties[1].notary_fees`.
    pub fn within(self, prefix: &str) -> Self {
        match self {
            FiscalError::InvalidConfiguration { field, reason } => FiscalError::InvalidConfiguration {
                field: format!("{prefix}.{field}"),
                reason,
            },
            FiscalError::InvalidInput { field, reason } => FiscalError::InvalidInput {
                field: format!("{prefix}.{field}"),
                reason,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for FiscalError {
    fn from(err: serde_json::Error) -> Self {
        FiscalError::MalformedDocument(err.to_string())
    }
}
