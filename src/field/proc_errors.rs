/// Field computation error type.
#[derive(Debug)]
pub enum FieldError {
    /// The solver produced NaN or infinite values.
    NonFinite(String),
    /// There is no current path to integrate.
    EmptyPath,
    /// IO error (solver method config files).
    IoError(crate::io::IoError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::NonFinite(error) => write!(f, "Non-finite field value: {}", error),
            FieldError::EmptyPath => write!(f, "Current path has no segments"),
            FieldError::IoError(error) => write!(f, "IO Error:\n{}", error),
            FieldError::StringOnly(error) => write!(f, "{}", error),
        }
    }
}
impl From<crate::io::IoError> for FieldError {
    fn from(error: crate::io::IoError) -> Self {
        FieldError::IoError(error)
    }
}
impl From<String> for FieldError {
    fn from(error: String) -> Self {
        FieldError::StringOnly(error)
    }
}

/// Result type for the `field` module.
pub type ProcResult<T> = std::result::Result<T, FieldError>;

/// Create a `FieldError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(FieldError::StringOnly(error_str.to_string()))
}
