use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Document syntax, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.yaml` / `.yml` are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

pub(crate) fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text, Format::from_path(path), path)
}

pub(crate) fn parse<T: DeserializeOwned>(text: &str, format: Format, origin: &Path) -> Result<T> {
    match format {
        Format::Json => serde_json::from_str(text).map_err(|source| Error::Json {
            path: origin.to_path_buf(),
            source,
        }),
        Format::Yaml => serde_yaml::from_str(text).map_err(|source| Error::Yaml {
            path: origin.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn inline_origin() -> PathBuf {
    PathBuf::from("<inline>")
}
