use serde_json::error::Error as SerdeJsonError;
use std::io::Error as IoError;
use std::path::Display;
use thiserror::Error;
use toml::de::Error as TomlError;

#[derive(Error, Debug)]
pub enum IOEntry<'a> {
    #[error("Failed to read file {0}: {1}")]
    ReadFileError(Display<'a>, IoError),
    #[error("Failed to write file {0}: {1}")]
    WriteFileError(Display<'a>, IoError),
    #[error("Failed to parse TOML: {0}")]
    TomlDeserializeError(TomlError),
    #[error("Failed to serialize data: {0}")]
    SerdeSerializeError(SerdeJsonError),
    #[error("Failed to deserialize line {0}: {1}")]
    SerdeDeserializeError(usize, SerdeJsonError),
}

impl From<IOEntry<'_>> for String {
    #[inline(always)]
    fn from(value: IOEntry) -> Self {
        value.to_string()
    }
}
