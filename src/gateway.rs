// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Contract of the remote label service.
//!
//! The reconciler and runner only talk to GitHub through [`LabelGateway`], so
//! the client handle is injected at construction and tests can substitute an
//! in-memory implementation. Listing is paginated through
//! [`LabelPageSource`], drained by [`collect_pages`].

use std::{collections::HashMap, future::Future};

use crate::{error::GatewayError, label::RepositorySpec};

/// Snapshot of one label as currently stored on the remote repository.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct RemoteLabel
{
    /// Label name.
    pub name:  String,
    /// Color as reported by the service.
    pub color: String,
}

impl RemoteLabel
{
    /// Creates a snapshot from a name and color.
    pub fn new(name: impl Into<String,>, color: impl Into<String,>,) -> Self
    {
        Self {
            name: name.into(), color: color.into(),
        }
    }
}

/// All labels of one repository, keyed by name.
///
/// When the service reports the same name twice the last page wins.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct RemoteLabels
{
    colors: HashMap<String, String,>,
}

impl RemoteLabels
{
    /// Returns the snapshot for `name`, if the repository has such a label.
    pub fn get(&self, name: &str,) -> Option<RemoteLabel,>
    {
        self.colors.get(name,).map(|color| RemoteLabel::new(name, color.as_str(),),)
    }

    /// Number of distinct label names.
    pub fn len(&self,) -> usize
    {
        self.colors.len()
    }

    /// Whether the repository has no labels at all.
    pub fn is_empty(&self,) -> bool
    {
        self.colors.is_empty()
    }
}

impl Extend<RemoteLabel,> for RemoteLabels
{
    fn extend<I: IntoIterator<Item = RemoteLabel,>,>(&mut self, iter: I,)
    {
        self.colors.extend(iter.into_iter().map(|label| (label.name, label.color,),),);
    }
}

impl FromIterator<RemoteLabel,> for RemoteLabels
{
    fn from_iter<I: IntoIterator<Item = RemoteLabel,>,>(iter: I,) -> Self
    {
        let mut labels = Self::default();
        labels.extend(iter,);
        labels
    }
}

/// Operations the synchronizer needs from the remote label service.
///
/// Implementations perform exactly one logical call per method; they never
/// retry.
pub trait LabelGateway
{
    /// Fetches every label of `repository`, following pagination to the end.
    fn list_labels(
        &self,
        repository: &RepositorySpec,
    ) -> impl Future<Output = Result<RemoteLabels, GatewayError,>,>;

    /// Creates a new label.
    fn create_label(
        &self,
        repository: &RepositorySpec,
        name: &str,
        color: &str,
    ) -> impl Future<Output = Result<(), GatewayError,>,>;

    /// Updates the label currently named `existing_name`.
    ///
    /// Passing a `new_name` different from `existing_name` renames the label.
    fn update_label(
        &self,
        repository: &RepositorySpec,
        existing_name: &str,
        new_name: &str,
        new_color: &str,
    ) -> impl Future<Output = Result<(), GatewayError,>,>;
}

/// Lazy, finite cursor over pages of remote labels.
///
/// A source yields `Some(page)` until the service signals that no further
/// page exists and `None` afterwards. It is not restartable.
pub trait LabelPageSource
{
    /// Fetches the next page, or returns `None` once the listing is exhausted.
    fn next_page(&mut self,)
    -> impl Future<Output = Result<Option<Vec<RemoteLabel,>,>, GatewayError,>,>;
}

/// Drains a page source into a single name-to-color mapping.
///
/// # Errors
///
/// Returns the first [`GatewayError`] reported by the source; labels gathered
/// from earlier pages are discarded.
pub async fn collect_pages<S,>(mut source: S,) -> Result<RemoteLabels, GatewayError,>
where
    S: LabelPageSource,
{
    let mut labels = RemoteLabels::default();
    while let Some(page,) = source.next_page().await? {
        labels.extend(page,);
    }
    Ok(labels,)
}
