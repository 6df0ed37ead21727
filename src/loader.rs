//! Validation logic that turns raw configuration documents into the
//! immutable [`Configuration`] driving a synchronization run.
//!
//! Loading is pure apart from reading the file: the same content always
//! yields the same configuration or the same error, and nothing touches the
//! network before it succeeds.

use std::{collections::HashSet, fs, path::Path};

use tracing::{debug, warn};

use crate::{
    config::{ConfigDocument, ConfigFormat, LabelEntry},
    error::{self, Error},
    label::{LabelSpec, RepositorySpec},
};

/// Validated set of desired labels and the repositories they apply to.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Configuration
{
    labels:       Vec<LabelSpec,>,
    repositories: Vec<RepositorySpec,>,
}

impl Configuration
{
    /// Desired labels in configuration order.
    pub fn labels(&self,) -> &[LabelSpec]
    {
        &self.labels
    }

    /// Target repositories in configuration order, without repeats.
    pub fn repositories(&self,) -> &[RepositorySpec]
    {
        &self.repositories
    }
}

/// Loads and validates the configuration file at `path`.
///
/// The decoder is chosen by [`ConfigFormat::from_path`].
///
/// # Errors
///
/// Returns [`Error::NotFound`](Error::NotFound) when the file cannot be read,
/// [`Error::Malformed`](Error::Malformed) when it cannot be decoded and
/// [`Error::Invalid`](Error::Invalid) when it violates an invariant.
pub fn load_config(path: &Path,) -> Result<Configuration, Error,>
{
    debug!("Reading configuration from {}", path.display());
    let contents = fs::read(path,).map_err(|source| error::io_error(path, source,),)?;
    validate(decode(&contents, ConfigFormat::from_path(path,),)?,)
}

/// Parses and validates a configuration document held in memory.
///
/// # Errors
///
/// Propagates [`Error::Malformed`](Error::Malformed) when the document cannot
/// be decoded and [`Error::Invalid`](Error::Invalid) when it violates an
/// invariant.
///
/// # Examples
///
/// ```
/// use labelsync::{ConfigFormat, parse_config};
///
/// let json = r##"{
///     "Labels": [{"Name": "bug", "Color": "#ff0000"}],
///     "Repositories": ["octocat/hello-world"]
/// }"##;
/// let config = parse_config(json, ConfigFormat::Json,)?;
/// assert_eq!(config.labels()[0].color.as_str(), "ff0000");
/// # Ok::<(), labelsync::Error>(())
/// ```
pub fn parse_config(contents: &str, format: ConfigFormat,) -> Result<Configuration, Error,>
{
    validate(decode(contents.as_bytes(), format,)?,)
}

/// Content that is not valid UTF-8 is a decoding failure, not a read failure.
fn decode(contents: &[u8], format: ConfigFormat,) -> Result<ConfigDocument, Error,>
{
    let document = match format {
        ConfigFormat::Json => serde_json::from_slice(contents,)?,
        ConfigFormat::Yaml => serde_yaml::from_slice(contents,)?,
    };

    Ok(document,)
}

fn validate(document: ConfigDocument,) -> Result<Configuration, Error,>
{
    if document.labels.is_empty() {
        return Err(Error::invalid("empty labels in config file",),);
    }
    if document.repositories.is_empty() {
        return Err(Error::invalid("empty target repositories in config file",),);
    }

    let labels = validate_labels(&document.labels,)?;
    let repositories = validate_repositories(&document.repositories,)?;

    debug!(
        "Loaded {} labels for {} repositories",
        labels.len(),
        repositories.len()
    );

    Ok(Configuration {
        labels,
        repositories,
    },)
}

fn validate_labels(entries: &[LabelEntry],) -> Result<Vec<LabelSpec,>, Error,>
{
    let mut labels = Vec::with_capacity(entries.len(),);
    let mut seen_names = HashSet::with_capacity(entries.len(),);

    for entry in entries {
        let label = LabelSpec::new(&entry.name, &entry.color, entry.replace.as_deref(),)?;
        if !seen_names.insert(label.name.clone(),) {
            return Err(Error::invalid(format!(
                "label name '{}' is used more than once",
                label.name
            ),),);
        }
        labels.push(label,);
    }

    Ok(labels,)
}

fn validate_repositories(entries: &[String],) -> Result<Vec<RepositorySpec,>, Error,>
{
    let mut repositories = Vec::with_capacity(entries.len(),);
    let mut seen = HashSet::with_capacity(entries.len(),);

    for entry in entries {
        let repository: RepositorySpec = entry.parse()?;
        if seen.insert(repository.clone(),) {
            repositories.push(repository,);
        } else {
            warn!("Skipping repeated repository {}", repository);
        }
    }

    Ok(repositories,)
}
