//! Configuration document types describing desired labels and target
//! repositories.
//!
//! The types in this module mirror the structure of the files consumed by the
//! CLI before any validation happens. Keys follow the capitalized spelling of
//! the established configuration format (`Labels`, `Name`, ...) and also accept
//! their lowercase and uppercase forms. Other mixed spellings are not recognized. Validation into the immutable
//! [`Configuration`](crate::Configuration) lives in the loader.

use std::{fmt, path::Path};

use serde::Deserialize;

/// Root configuration document as it appears on disk.
///
/// Missing sections deserialize to empty lists so that the loader can report
/// them as validation failures rather than decoding failures.
///
/// # Examples
///
/// ```
/// use labelsync::ConfigDocument;
///
/// let json = r##"{
///     "Labels": [{"Name": "bug", "Color": "#ff0000"}],
///     "Repositories": ["octocat/hello-world"]
/// }"##;
/// let document: ConfigDocument = serde_json::from_str(json,).expect("valid document",);
/// assert_eq!(document.labels.len(), 1);
/// assert_eq!(document.repositories, vec!["octocat/hello-world".to_owned()]);
/// ```
#[derive(Debug, Deserialize,)]
pub struct ConfigDocument
{
    /// Desired label definitions in the order they should be applied.
    #[serde(rename = "Labels", alias = "labels", alias = "LABELS", default)]
    pub labels: Vec<LabelEntry,>,

    /// Repositories in `owner/name` form.
    #[serde(rename = "Repositories", alias = "repositories", alias = "REPOSITORIES", default)]
    pub repositories: Vec<String,>,
}

/// Raw label definition before validation.
#[derive(Debug, Deserialize,)]
pub struct LabelEntry
{
    /// Label name as it should appear on GitHub.
    #[serde(rename = "Name", alias = "name", alias = "NAME", default)]
    pub name: String,

    /// Hex color with or without a leading `#`.
    #[serde(rename = "Color", alias = "color", alias = "COLOR", default)]
    pub color: String,

    /// Optional name of an existing label that should be renamed into this
    /// one.
    #[serde(rename = "Replace", alias = "replace", alias = "REPLACE", default)]
    pub replace: Option<String,>,
}

/// Structured-data formats accepted for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default,)]
pub enum ConfigFormat
{
    /// JSON document, the default for any extension other than YAML.
    #[default]
    Json,
    /// YAML document selected by a `.yaml` or `.yml` extension.
    Yaml,
}

impl ConfigFormat
{
    /// Picks the decoder for a configuration path based on its extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use labelsync::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path(Path::new("labels.yml",),), ConfigFormat::Yaml);
    /// assert_eq!(ConfigFormat::from_path(Path::new("labels.json",),), ConfigFormat::Json);
    /// assert_eq!(ConfigFormat::from_path(Path::new("labels",),), ConfigFormat::Json);
    /// ```
    pub fn from_path(path: &Path,) -> Self
    {
        match path.extension().and_then(|extension| extension.to_str(),) {
            Some(extension,)
                if extension.eq_ignore_ascii_case("yaml",)
                    || extension.eq_ignore_ascii_case("yml",) =>
            {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

impl fmt::Display for ConfigFormat
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        match self {
            Self::Json => f.write_str("JSON",),
            Self::Yaml => f.write_str("YAML",),
        }
    }
}
