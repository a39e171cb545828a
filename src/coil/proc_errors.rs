/// Coil construction error type.
/// Both variants other than `StringOnly` are malformed-input errors:
/// the descriptor cannot describe a coil and is rejected before any field work.
#[derive(Debug)]
pub enum CoilError {
    /// Missing, conflicting or out-of-range descriptor values.
    MalformedInput(String),
    /// The polygon cannot support a miter offset (collinear, folded or zero-length edges).
    DegenerateGeometry(String),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for CoilError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoilError::MalformedInput(error) => write!(f, "Malformed coil descriptor: {}", error),
            CoilError::DegenerateGeometry(error) => write!(f, "Degenerate coil geometry: {}", error),
            CoilError::StringOnly(error) => write!(f, "{}", error),
        }
    }
}
impl From<String> for CoilError {
    fn from(error: String) -> Self {
        CoilError::StringOnly(error)
    }
}

/// Result type for the `coil` module.
pub type ProcResult<T> = std::result::Result<T, CoilError>;

/// Create a `CoilError::MalformedInput` from a string.
pub fn malformed<T>(error_str: &str) -> ProcResult<T> {
    Err(CoilError::MalformedInput(error_str.to_string()))
}

/// Create a `CoilError::DegenerateGeometry` from a string.
pub fn degenerate<T>(error_str: &str) -> ProcResult<T> {
    Err(CoilError::DegenerateGeometry(error_str.to_string()))
}
