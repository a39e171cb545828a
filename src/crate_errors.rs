use crate::{
    args,
    coil,
    field,
    optimize,
    io,
};

/// Error-type enum for the `coilsim` crate.
/// Wraps the error of each processing stage so `main` can report where a run failed.
#[derive(Debug)]
pub enum CoilsimError {
    ArgError(args::ArgError),
    CoilError(coil::CoilError),
    FieldError(field::FieldError),
    OptimizeError(optimize::OptimizeError),
    IoError(io::IoError),
    StringOnly(String),
}
impl std::fmt::Display for CoilsimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoilsimError::ArgError(error) => write!(f, "! ARGUMENT ERROR:\n{}", error),
            CoilsimError::CoilError(error) => write!(f, "! COIL ERROR:\n- {}", error),
            CoilsimError::FieldError(error) => write!(f, "! FIELD ERROR:\n- {}", error),
            CoilsimError::OptimizeError(error) => write!(f, "! OPTIMIZATION ERROR:\n- {}", error),
            CoilsimError::IoError(error) => write!(f, "! IO ERROR:\n{}", error),
            CoilsimError::StringOnly(error) => write!(f, "! COILSIM ERROR:\n- {}", error),
        }
    }
}
impl From<String> for CoilsimError {
    fn from(error: String) -> Self {
        CoilsimError::StringOnly(error)
    }
}
impl From<args::ArgError> for CoilsimError {
    fn from(error: args::ArgError) -> Self {
        CoilsimError::ArgError(error)
    }
}
impl From<coil::CoilError> for CoilsimError {
    fn from(error: coil::CoilError) -> Self {
        CoilsimError::CoilError(error)
    }
}
impl From<field::FieldError> for CoilsimError {
    fn from(error: field::FieldError) -> Self {
        CoilsimError::FieldError(error)
    }
}
impl From<optimize::OptimizeError> for CoilsimError {
    fn from(error: optimize::OptimizeError) -> Self {
        CoilsimError::OptimizeError(error)
    }
}
impl From<io::IoError> for CoilsimError {
    fn from(error: io::IoError) -> Self {
        CoilsimError::IoError(error)
    }
}

/// Result type for the `coilsim` crate.
pub type CoilsimResult<T> = std::result::Result<T, CoilsimError>;
