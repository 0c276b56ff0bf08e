//! On-disk document formats

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serialization format of the store file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Pretty-printed JSON, tab indented
    #[default]
    Json,
    Yaml,
}

/// Why a document could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Bytes are not valid for the format
    Syntax(String),
    /// Parsed fine, but the root is not a mapping
    NotAnObject,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Syntax(reason) => write!(f, "{}", reason),
            DecodeError::NotAnObject => write!(f, "document root is not an object"),
        }
    }
}

impl Format {
    /// File extension used when none is configured
    pub fn default_extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// Encode a document
    pub fn serialize(&self, doc: &Map<String, Value>) -> Result<Vec<u8>, String> {
        match self {
            Format::Json => {
                let mut out = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
                let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
                doc.serialize(&mut ser).map_err(|e| e.to_string())?;
                out.push(b'\n');
                Ok(out)
            }
            Format::Yaml => serde_yaml::to_string(doc)
                .map(String::into_bytes)
                .map_err(|e| e.to_string()),
        }
    }

    /// Decode a document
    ///
    /// Empty or whitespace-only input decodes to an empty document.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Map<String, Value>, DecodeError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        let value: Value = match self {
            Format::Json => {
                serde_json::from_slice(bytes).map_err(|e| DecodeError::Syntax(e.to_string()))?
            }
            Format::Yaml => {
                serde_yaml::from_slice(bytes).map_err(|e| DecodeError::Syntax(e.to_string()))?
            }
        };

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(DecodeError::NotAnObject),
        }
    }
}
