// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Drives a synchronization run across all configured repositories.
///
/// Repositories are processed one after another. A repository whose labels
/// cannot be listed is reported and skipped; everything else is reported line
/// by line as it happens.
use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::{
    error::Error,
    gateway::LabelGateway,
    loader::Configuration,
    reconcile::{Outcome, Reconciler},
};

/// Counters describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct RunSummary
{
    /// Repositories whose labels were listed and reconciled.
    pub repositories_synced: usize,
    /// Repositories skipped because listing their labels failed.
    pub repositories_failed: usize,
    /// Label operations that succeeded.
    pub labels_applied:      usize,
    /// Label operations the service rejected.
    pub labels_failed:       usize,
}

/// Sequential runner writing a plain-text report to `out`.
pub struct Runner<G, W,>
{
    gateway:  G,
    out:      W,
    progress: bool,
}

impl<G, W,> Runner<G, W,>
where
    G: LabelGateway,
    W: Write,
{
    /// Creates a runner that reports to `out`, without a progress spinner.
    pub fn new(gateway: G, out: W,) -> Self
    {
        Self {
            gateway,
            out,
            progress: false,
        }
    }

    /// Enables a spinner on stderr while the service is being queried.
    pub fn with_progress(mut self, enabled: bool,) -> Self
    {
        self.progress = enabled;
        self
    }

    /// Consumes the runner and returns the report writer.
    pub fn into_writer(self,) -> W
    {
        self.out
    }

    /// Synchronizes every repository of `config` and reports the outcomes.
    ///
    /// Gateway failures never abort the run; they show up as `Error:` or
    /// `[FAIL]` lines in the report and in the returned summary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Report`](Error::Report) when the report cannot be
    /// written.
    pub async fn run(&mut self, config: &Configuration,) -> Result<RunSummary, Error,>
    {
        let mut summary = RunSummary::default();
        let reconciler = Reconciler::new(&self.gateway,);

        for repository in config.repositories() {
            writeln!(self.out, "Update labels in repo {repository}...").map_err(report_error,)?;

            let spinner = spinner(self.progress,);
            spinner.set_message(format!("Fetching labels of {repository}..."),);
            let remote = match self.gateway.list_labels(repository,).await {
                Ok(remote,) => remote,
                Err(error,) => {
                    spinner.finish_and_clear();
                    warn!("Skipping {}: {}", repository, error);
                    summary.repositories_failed += 1;
                    writeln!(self.out, "Error: {error}").map_err(report_error,)?;
                    writeln!(self.out).map_err(report_error,)?;
                    continue;
                }
            };

            spinner.set_message(format!(
                "Applying {} labels to {repository}...",
                config.labels().len()
            ),);
            let outcomes = reconciler.reconcile(repository, config.labels(), &remote,).await;
            spinner.finish_and_clear();

            summary.repositories_synced += 1;
            write_outcomes(&mut self.out, &outcomes, &mut summary,)?;
        }

        self.out.flush().map_err(report_error,)?;

        info!(
            "Synced {} repositories ({} skipped): {} labels applied, {} failed",
            summary.repositories_synced,
            summary.repositories_failed,
            summary.labels_applied,
            summary.labels_failed
        );

        Ok(summary,)
    }
}

fn write_outcomes<W: Write,>(
    out: &mut W,
    outcomes: &[Outcome],
    summary: &mut RunSummary,
) -> Result<(), Error,>
{
    for outcome in outcomes {
        if outcome.is_success() {
            summary.labels_applied += 1;
        } else {
            summary.labels_failed += 1;
        }
        writeln!(out, "* {outcome}").map_err(report_error,)?;
    }
    writeln!(out).map_err(report_error,)
}

fn spinner(enabled: bool,) -> ProgressBar
{
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
        .unwrap_or_else(|_| ProgressStyle::default_spinner(),);
    pb.set_style(style,);
    pb
}

fn report_error(source: std::io::Error,) -> Error
{
    Error::Report {
        source,
    }
}
