use crate::{coil, field};

/// Optimization process error type.
#[derive(Debug)]
pub enum OptimizeError {
    /// A sampled descriptor could not be built into a coil.
    CoilError(coil::CoilError),
    /// The field solver failed on a sampled coil.
    FieldError(field::FieldError),
    /// Every sample in the range failed or scored non-finite.
    NoValidConfiguration(String),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizeError::CoilError(error) => write!(f, "Coil Error:\n{}", error),
            OptimizeError::FieldError(error) => write!(f, "Field Error:\n{}", error),
            OptimizeError::NoValidConfiguration(error) => write!(f, "No valid configuration found: {}", error),
            OptimizeError::StringOnly(error) => write!(f, "{}", error),
        }
    }
}
impl From<coil::CoilError> for OptimizeError {
    fn from(error: coil::CoilError) -> Self {
        OptimizeError::CoilError(error)
    }
}
impl From<field::FieldError> for OptimizeError {
    fn from(error: field::FieldError) -> Self {
        OptimizeError::FieldError(error)
    }
}
impl From<String> for OptimizeError {
    fn from(error: String) -> Self {
        OptimizeError::StringOnly(error)
    }
}

/// Result type for the `optimize` module.
pub type ProcResult<T> = std::result::Result<T, OptimizeError>;

/// Create an `OptimizeError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(OptimizeError::StringOnly(error_str.to_string()))
}
