//! Text renderings of a [`Document`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::serializer::Document;

/// Output format for rendered documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Single-line JSON.
    Json,
    /// JSON indented by two spaces.
    #[default]
    Pretty,
    Yaml,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Renders `document` in the requested format.
pub fn render(document: &Document, format: Format) -> Result<String, RenderError> {
    let text = match format {
        Format::Json => serde_json::to_string(document)?,
        Format::Pretty => serde_json::to_string_pretty(document)?,
        Format::Yaml => serde_yaml::to_string(document)?,
    };
    Ok(text)
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "json",
            Format::Pretty => "pretty",
            Format::Yaml => "yaml",
        };
        f.write_str(name)
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "pretty" => Ok(Format::Pretty),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(format!("unknown format `{other}` (expected json, pretty or yaml)")),
        }
    }
}
