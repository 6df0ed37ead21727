//! Bulk synchronization of issue labels across GitHub repositories.
//!
//! The library loads a declarative configuration describing desired labels
//! and target repositories, compares the desired labels with the labels each
//! repository currently has, and creates or updates (optionally renaming)
//! labels to match. Remote access goes through the [`LabelGateway`] trait so
//! the client handle is injected rather than global; [`GitHubGateway`] is the
//! octocrab-backed implementation used by the CLI.

mod config;
mod error;
mod gateway;
mod github;
mod label;
mod loader;
mod reconcile;
mod runner;

pub use config::{ConfigDocument, ConfigFormat, LabelEntry};
pub use error::{Error, GatewayError, io_error};
pub use gateway::{LabelGateway, LabelPageSource, RemoteLabel, RemoteLabels, collect_pages};
pub use github::GitHubGateway;
pub use label::{HexColor, LabelSpec, RepositorySpec};
pub use loader::{Configuration, load_config, parse_config};
pub use reconcile::{Action, Outcome, Reconciler, plan};
pub use runner::{RunSummary, Runner};
