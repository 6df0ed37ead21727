// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// GitHub implementation of the label gateway.
///
/// Wraps a single authenticated [`Octocrab`] client created once per process
/// and shared by every repository of a run.
use octocrab::{Octocrab, models::Label};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{
    error::{Error, GatewayError},
    gateway::{LabelGateway, LabelPageSource, RemoteLabel, RemoteLabels, collect_pages},
    label::RepositorySpec,
};

const LABELS_PER_PAGE: u8 = 100;
const API_BASE: &str = "https://api.github.com/";

/// Label gateway backed by the GitHub REST API.
#[derive(Clone,)]
pub struct GitHubGateway
{
    client: Octocrab,
}

impl GitHubGateway
{
    /// Builds an authenticated client from a personal access token.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`](Error::Client) when the client cannot be
    /// constructed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use labelsync::GitHubGateway;
    ///
    /// # async fn example() -> Result<(), labelsync::Error> {
    /// let token = std::env::var("GITHUB_TOKEN",).unwrap_or_default();
    /// let gateway = GitHubGateway::from_token(token,)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_token(token: String,) -> Result<Self, Error,>
    {
        let client = Octocrab::builder().personal_token(token,).build().map_err(|e| {
            Error::Client {
                message: e.to_string(),
            }
        },)?;

        Ok(Self::new(client,),)
    }

    /// Wraps an already configured client.
    pub fn new(client: Octocrab,) -> Self
    {
        Self {
            client,
        }
    }
}

impl LabelGateway for GitHubGateway
{
    async fn list_labels(&self, repository: &RepositorySpec,) -> Result<RemoteLabels, GatewayError,>
    {
        let labels = collect_pages(LabelPages::new(&self.client, repository,),).await?;
        debug!("Fetched {} labels from {}", labels.len(), repository);
        Ok(labels,)
    }

    async fn create_label(
        &self,
        repository: &RepositorySpec,
        name: &str,
        color: &str,
    ) -> Result<(), GatewayError,>
    {
        debug!("Creating label '{}' in {}", name, repository);
        self.client
            .issues(repository.owner(), repository.name(),)
            .create_label(name, color, "",)
            .await
            .map_err(|e| {
                GatewayError::request(format!("create label '{name}' in {repository}"), e,)
            },)?;

        Ok((),)
    }

    async fn update_label(
        &self,
        repository: &RepositorySpec,
        existing_name: &str,
        new_name: &str,
        new_color: &str,
    ) -> Result<(), GatewayError,>
    {
        debug!("Updating label '{}' in {} to '{}'", existing_name, repository, new_name);
        let route = label_route(repository, existing_name,)?;
        let body = LabelPatch {
            new_name,
            color: new_color,
        };

        let _: Label = self.client.patch(route, Some(&body,),).await.map_err(|e| {
            GatewayError::request(format!("update label '{existing_name}' in {repository}"), e,)
        },)?;

        Ok((),)
    }
}

#[derive(Debug, Serialize,)]
struct LabelPatch<'a,>
{
    new_name: &'a str,
    color:    &'a str,
}

/// Builds `/repos/{owner}/{repo}/labels/{name}` with every segment
/// percent-encoded, so names containing spaces or slashes address a single
/// label.
fn label_route(repository: &RepositorySpec, name: &str,) -> Result<String, GatewayError,>
{
    let mut url = Url::parse(API_BASE,).map_err(|e| GatewayError::Route {
        message: e.to_string(),
    },)?;

    url.path_segments_mut()
        .map_err(|()| GatewayError::Route {
            message: format!("{API_BASE} cannot carry path segments"),
        },)?
        .clear()
        .extend(["repos", repository.owner(), repository.name(), "labels", name,],);

    Ok(url.path().to_owned(),)
}

/// Page cursor over `GET /repos/{owner}/{repo}/labels`.
///
/// Requests pages by number and stops once a response carries no `next`
/// link.
struct LabelPages<'a,>
{
    client:     &'a Octocrab,
    repository: &'a RepositorySpec,
    next:       Option<u32,>,
}

impl<'a,> LabelPages<'a,>
{
    fn new(client: &'a Octocrab, repository: &'a RepositorySpec,) -> Self
    {
        Self {
            client,
            repository,
            next: Some(1,),
        }
    }
}

impl LabelPageSource for LabelPages<'_,>
{
    async fn next_page(&mut self,) -> Result<Option<Vec<RemoteLabel,>,>, GatewayError,>
    {
        let Some(page_number,) = self.next else {
            return Ok(None,);
        };

        let page = self
            .client
            .issues(self.repository.owner(), self.repository.name(),)
            .list_labels_for_repo()
            .per_page(LABELS_PER_PAGE,)
            .page(page_number,)
            .send()
            .await
            .map_err(|e| {
                GatewayError::request(format!("list labels of {}", self.repository), e,)
            },)?;

        self.next = page.next.as_ref().map(|_| page_number + 1,);

        let labels =
            page.items.into_iter().map(|label| RemoteLabel::new(label.name, label.color,),).collect();
        Ok(Some(labels,),)
    }
}
