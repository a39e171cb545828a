use std::io::Write;
use std::path::Path;

#[derive(Debug)]
pub enum IoErrorType {
    File(std::io::Error),
    SerdeJson(serde_json::Error),
    SerdeYaml(serde_yaml::Error),
    TomlSer(toml::ser::Error),
    TomlDe(toml::de::Error),
    StringOnly(String),
}
impl std::fmt::Display for IoErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoErrorType::File(error) => write!(f, "- File IO Error:\n{}", error),
            IoErrorType::SerdeJson(error) => write!(f, "- JSON Serialization/Deserialization Error:\n{}", error),
            IoErrorType::SerdeYaml(error) => write!(f, "- YAML Serialization/Deserialization Error:\n{}", error),
            IoErrorType::TomlSer(error) => write!(f, "- TOML Serialization Error:\n{}", error),
            IoErrorType::TomlDe(error) => write!(f, "- TOML Deserialization Error:\n{}", error),
            IoErrorType::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}

/// Verbose IO error, naming the file that caused it.
#[derive(Debug)]
pub struct IoError {
    /// Filepath facing an error.
    pub file: Option<String>,
    /// Error cause.
    pub cause: IoErrorType,
}
impl IoError {
    fn at(path: &str, cause: IoErrorType) -> Self {
        IoError{file: Some(path.to_string()), cause}
    }
}
impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.file {
            Some(ref file) => write!(f, "- Error with file: {}\n{}", file, self.cause),
            None => write!(f, "{}", self.cause),
        }
    }
}

pub type IoResult<T> = std::result::Result<T, IoError>;

/// Supported structured file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfgFormat {
    Json,
    Yaml,
    Toml,
}
impl CfgFormat {
    const SUPPORTED: [&'static str; 4] = ["json", "toml", "yaml", "yml"];

    /// Pick the format from a file extension.
    pub fn from_path(path: &str) -> IoResult<Self> {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(CfgFormat::Json),
            Some("toml") => Ok(CfgFormat::Toml),
            Some("yaml") | Some("yml") => Ok(CfgFormat::Yaml),
            _ => {
                let error_string = format!("Unsupported filetype: {}\nSupported filetypes: {:?}", path, Self::SUPPORTED);
                Err(IoError::at(path, IoErrorType::StringOnly(error_string)))
            },
        }
    }
}

/// Open a file with verbose errors.
pub fn open(path: &str) -> IoResult<std::fs::File> {
    std::fs::File::open(path).map_err(|error| IoError::at(path, IoErrorType::File(error)))
}

/// Create a file with verbose errors.
pub fn create(path: &str) -> IoResult<std::fs::File> {
    std::fs::File::create(path).map_err(|error| IoError::at(path, IoErrorType::File(error)))
}

/// Read from string with verbose errors
pub fn read_to_string(path: &str) -> IoResult<String> {
    std::fs::read_to_string(path).map_err(|error| IoError::at(path, IoErrorType::File(error)))
}

/// Write string to file with verbose errors.
pub fn write_to_file(path: &str, buffer: &str) -> IoResult<()> {
    let mut f = create(path)?;
    f.write_all(buffer.as_bytes()).map_err(|error| IoError::at(path, IoErrorType::File(error)))
}

/// Read in cfg files from the supported filetypes.
pub fn read_cfg_file<T>(path: &str) -> IoResult<T>
where T: serde::de::DeserializeOwned
{
    match CfgFormat::from_path(path)? {
        CfgFormat::Json => serde_json::from_reader(open(path)?)
            .map_err(|error| IoError::at(path, IoErrorType::SerdeJson(error))),
        CfgFormat::Toml => toml::from_str(&read_to_string(path)?)
            .map_err(|error| IoError::at(path, IoErrorType::TomlDe(error))),
        CfgFormat::Yaml => serde_yaml::from_reader(open(path)?)
            .map_err(|error| IoError::at(path, IoErrorType::SerdeYaml(error))),
    }
}

/// Write a value to one of the supported filetypes, picked by the extension of `path`.
pub fn write_cfg_file<T>(path: &str, value: &T) -> IoResult<()>
where T: serde::Serialize
{
    let buffer = match CfgFormat::from_path(path)? {
        CfgFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|error| IoError::at(path, IoErrorType::SerdeJson(error)))?,
        CfgFormat::Toml => toml::to_string_pretty(value)
            .map_err(|error| IoError::at(path, IoErrorType::TomlSer(error)))?,
        CfgFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|error| IoError::at(path, IoErrorType::SerdeYaml(error)))?,
    };
    write_to_file(path, &buffer)
}
