// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-repository reconciliation of desired labels against a remote snapshot.
//!
//! For every desired label the reconciler picks one of three branches, in
//! order: update the label that already carries the desired name, update
//! (rename) the label named by `replace`, or create a new label. The gateway
//! is called immediately for each decision and its result is recorded in the
//! [`Outcome`]; one failing label never stops the remaining ones.
//!
//! The snapshot is taken once, before the first mutation, and is not
//! refreshed. Two desired labels that both name the same `replace` target
//! therefore both issue an update against it.

use std::fmt;

use tracing::{debug, warn};

use crate::{
    error::GatewayError,
    gateway::{LabelGateway, RemoteLabel, RemoteLabels},
    label::{LabelSpec, RepositorySpec},
};

/// Decision taken for one desired label.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum Action
{
    /// No matching remote label exists; a new one is created.
    Create,
    /// An existing remote label is recolored and possibly renamed.
    Update
    {
        /// State of the targeted remote label before the update.
        from: RemoteLabel,
    },
}

/// Picks the action for `label` given the remote snapshot.
///
/// # Examples
///
/// ```
/// use labelsync::{Action, LabelSpec, RemoteLabel, RemoteLabels, plan};
///
/// let remote: RemoteLabels = [RemoteLabel::new("old-name", "ffffff",)].into_iter().collect();
/// let label = LabelSpec::new("new-name", "000000", Some("old-name",),)?;
///
/// assert_eq!(plan(&label, &remote,), Action::Update {
///     from: RemoteLabel::new("old-name", "ffffff",),
/// });
/// # Ok::<(), labelsync::Error>(())
/// ```
pub fn plan(label: &LabelSpec, remote: &RemoteLabels,) -> Action
{
    if let Some(from,) = remote.get(&label.name,) {
        return Action::Update {
            from,
        };
    }

    match label.replace.as_deref().and_then(|replace| remote.get(replace,),) {
        Some(from,) => Action::Update {
            from,
        },
        None => Action::Create,
    }
}

/// Result of applying one desired label to one repository.
#[derive(Debug,)]
pub struct Outcome
{
    /// What was attempted.
    pub action: Action,
    /// Desired state.
    pub to:     LabelSpec,
    /// Failure reported by the gateway, if any.
    pub error:  Option<GatewayError,>,
}

impl Outcome
{
    /// Whether the gateway call succeeded.
    pub fn is_success(&self,) -> bool
    {
        self.error.is_none()
    }
}

impl fmt::Display for Outcome
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        let prefix = if self.is_success() { "[OK]" } else { "[FAIL]" };

        match &self.action {
            Action::Create => write!(
                f,
                "{prefix} Created label named '{}' with color '{}'",
                self.to.name, self.to.color
            )?,
            Action::Update {
                from,
            } => write!(
                f,
                "{prefix} Updated label named '{}' with color '{}' to '{}' with color '{}'",
                from.name, from.color, self.to.name, self.to.color
            )?,
        }

        match &self.error {
            Some(error,) => write!(f, ": {error}"),
            None => Ok((),),
        }
    }
}

/// Applies desired labels to repositories through an injected gateway.
#[derive(Debug,)]
pub struct Reconciler<'g, G,>
{
    gateway: &'g G,
}

impl<'g, G,> Reconciler<'g, G,>
where
    G: LabelGateway,
{
    /// Creates a reconciler issuing its calls through `gateway`.
    pub fn new(gateway: &'g G,) -> Self
    {
        Self {
            gateway,
        }
    }

    /// Reconciles `labels` against the `remote` snapshot of `repository`.
    ///
    /// Returns exactly one outcome per desired label, in the same order,
    /// whether or not individual gateway calls fail.
    pub async fn reconcile(
        &self,
        repository: &RepositorySpec,
        labels: &[LabelSpec],
        remote: &RemoteLabels,
    ) -> Vec<Outcome,>
    {
        let mut outcomes = Vec::with_capacity(labels.len(),);

        for label in labels {
            let action = plan(label, remote,);
            let result = match &action {
                Action::Create => {
                    self.gateway.create_label(repository, &label.name, label.color.as_str(),).await
                }
                Action::Update {
                    from,
                } => {
                    self.gateway
                        .update_label(repository, &from.name, &label.name, label.color.as_str(),)
                        .await
                }
            };

            match &result {
                Ok((),) => debug!("Applied label '{}' to {}", label.name, repository),
                Err(error,) => warn!("Label '{}' in {}: {}", label.name, repository, error),
            }

            outcomes.push(Outcome {
                action,
                to: label.clone(),
                error: result.err(),
            },);
        }

        outcomes
    }
}

#[cfg(test)]
pub(crate) mod tests
{
    use std::{
        cell::RefCell,
        collections::{HashMap, HashSet},
    };

    use super::*;

    /// Call recorded by [`FakeGateway`].
    #[derive(Debug, Clone, PartialEq, Eq,)]
    pub(crate) enum Call
    {
        List(String,),
        Create
        {
            repository: String,
            name:       String,
            color:      String,
        },
        Update
        {
            repository: String,
            existing:   String,
            name:       String,
            color:      String,
        },
    }

    /// In-memory gateway serving fixed snapshots and failing on demand.
    #[derive(Debug, Default,)]
    pub(crate) struct FakeGateway
    {
        pub(crate) remote:         HashMap<String, RemoteLabels,>,
        pub(crate) failing_repos:  HashSet<String,>,
        pub(crate) failing_labels: HashSet<String,>,
        pub(crate) calls:          RefCell<Vec<Call,>,>,
    }

    impl FakeGateway
    {
        pub(crate) fn with_remote(mut self, repository: &str, labels: &[(&str, &str,)],) -> Self
        {
            let snapshot =
                labels.iter().map(|(name, color,)| RemoteLabel::new(*name, *color,),).collect();
            self.remote.insert(repository.to_owned(), snapshot,);
            self
        }

        pub(crate) fn failing_repo(mut self, repository: &str,) -> Self
        {
            self.failing_repos.insert(repository.to_owned(),);
            self
        }

        pub(crate) fn failing_label(mut self, name: &str,) -> Self
        {
            self.failing_labels.insert(name.to_owned(),);
            self
        }

        pub(crate) fn calls(&self,) -> Vec<Call,>
        {
            self.calls.borrow().clone()
        }

        fn outcome(&self, name: &str,) -> Result<(), GatewayError,>
        {
            if self.failing_labels.contains(name,) {
                Err(GatewayError::request(format!("write label '{name}'"), "Validation Failed",),)
            } else {
                Ok((),)
            }
        }
    }

    impl LabelGateway for FakeGateway
    {
        async fn list_labels(
            &self,
            repository: &RepositorySpec,
        ) -> Result<RemoteLabels, GatewayError,>
        {
            let key = repository.to_string();
            self.calls.borrow_mut().push(Call::List(key.clone(),),);
            if self.failing_repos.contains(&key,) {
                return Err(GatewayError::request(format!("list labels of {key}"), "Not Found",),);
            }
            Ok(self.remote.get(&key,).cloned().unwrap_or_default(),)
        }

        async fn create_label(
            &self,
            repository: &RepositorySpec,
            name: &str,
            color: &str,
        ) -> Result<(), GatewayError,>
        {
            self.calls.borrow_mut().push(Call::Create {
                repository: repository.to_string(),
                name:       name.to_owned(),
                color:      color.to_owned(),
            },);
            self.outcome(name,)
        }

        async fn update_label(
            &self,
            repository: &RepositorySpec,
            existing_name: &str,
            new_name: &str,
            new_color: &str,
        ) -> Result<(), GatewayError,>
        {
            self.calls.borrow_mut().push(Call::Update {
                repository: repository.to_string(),
                existing:   existing_name.to_owned(),
                name:       new_name.to_owned(),
                color:      new_color.to_owned(),
            },);
            self.outcome(new_name,)
        }
    }

    fn repository() -> RepositorySpec
    {
        "octo/repo".parse().expect("valid repository",)
    }

    fn label(name: &str, color: &str, replace: Option<&str,>,) -> LabelSpec
    {
        LabelSpec::new(name, color, replace,).expect("valid label",)
    }

    fn snapshot(labels: &[(&str, &str,)],) -> RemoteLabels
    {
        labels.iter().map(|(name, color,)| RemoteLabel::new(*name, *color,),).collect()
    }

    #[test]
    fn plan_updates_label_with_same_name()
    {
        let action = plan(&label("bug", "00ff00", None,), &snapshot(&[("bug", "ff0000",)],),);
        assert_eq!(action, Action::Update {
            from: RemoteLabel::new("bug", "ff0000",),
        });
    }

    #[test]
    fn plan_prefers_exact_name_over_replace()
    {
        let remote = snapshot(&[("bug", "ff0000",), ("defect", "cccccc",)],);
        let action = plan(&label("bug", "00ff00", Some("defect",),), &remote,);
        assert_eq!(action, Action::Update {
            from: RemoteLabel::new("bug", "ff0000",),
        });
    }

    #[test]
    fn plan_renames_replace_target()
    {
        let remote = snapshot(&[("old-name", "ffffff",)],);
        let action = plan(&label("new-name", "000000", Some("old-name",),), &remote,);
        assert_eq!(action, Action::Update {
            from: RemoteLabel::new("old-name", "ffffff",),
        });
    }

    #[test]
    fn plan_creates_when_nothing_matches()
    {
        let action = plan(&label("feature", "00ff00", Some("missing",),), &RemoteLabels::default(),);
        assert_eq!(action, Action::Create);
    }

    #[test]
    fn plan_matches_names_case_sensitively()
    {
        let action = plan(&label("Bug", "00ff00", None,), &snapshot(&[("bug", "ff0000",)],),);
        assert_eq!(action, Action::Create);
    }

    #[tokio::test]
    async fn reconcile_issues_calls_in_configuration_order()
    {
        let gateway = FakeGateway::default();
        let remote = snapshot(&[("bug", "ff0000",), ("old-name", "ffffff",)],);
        let labels = vec![
            label("feature", "00ff00", None,),
            label("bug", "00ff00", None,),
            label("new-name", "000000", Some("old-name",),),
        ];

        let outcomes = Reconciler::new(&gateway,).reconcile(&repository(), &labels, &remote,).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(Outcome::is_success));
        assert_eq!(outcomes[0].action, Action::Create);
        assert_eq!(gateway.calls(), vec![
            Call::Create {
                repository: "octo/repo".to_owned(),
                name:       "feature".to_owned(),
                color:      "00ff00".to_owned(),
            },
            Call::Update {
                repository: "octo/repo".to_owned(),
                existing:   "bug".to_owned(),
                name:       "bug".to_owned(),
                color:      "00ff00".to_owned(),
            },
            Call::Update {
                repository: "octo/repo".to_owned(),
                existing:   "old-name".to_owned(),
                name:       "new-name".to_owned(),
                color:      "000000".to_owned(),
            },
        ]);
    }

    #[tokio::test]
    async fn reconcile_continues_after_failed_label()
    {
        let gateway = FakeGateway::default().failing_label("bug",);
        let labels = vec![
            label("bug", "ff0000", None,),
            label("docs", "0075ca", None,),
            label("question", "d876e3", None,),
        ];

        let outcomes = Reconciler::new(&gateway,)
            .reconcile(&repository(), &labels, &RemoteLabels::default(),)
            .await;

        let names: Vec<&str,> = outcomes.iter().map(|outcome| outcome.to.name.as_str(),).collect();
        assert_eq!(names, vec!["bug", "docs", "question"]);
        assert!(!outcomes[0].is_success());
        assert!(outcomes[1].is_success());
        assert!(outcomes[2].is_success());
        assert_eq!(gateway.calls().len(), 3);
    }

    #[tokio::test]
    async fn reconcile_records_failed_updates_and_continues()
    {
        let gateway = FakeGateway::default().failing_label("bug",).failing_label("new-name",);
        let remote = snapshot(&[("bug", "ff0000",), ("old-name", "ffffff",)],);
        let labels = vec![
            label("bug", "00ff00", None,),
            label("new-name", "000000", Some("old-name",),),
            label("docs", "0075ca", None,),
        ];

        let outcomes = Reconciler::new(&gateway,).reconcile(&repository(), &labels, &remote,).await;

        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes[0].is_success());
        assert!(
            outcomes[0]
                .to_string()
                .starts_with("[FAIL] Updated label named 'bug' with color 'ff0000' to 'bug'",)
        );
        assert!(!outcomes[1].is_success());
        assert!(outcomes[1].to_string().starts_with(
            "[FAIL] Updated label named 'old-name' with color 'ffffff' to 'new-name' with color \
             '000000':",
        ));
        assert!(outcomes[2].is_success());
        assert_eq!(outcomes[2].action, Action::Create);
        assert_eq!(gateway.calls().len(), 3);
    }

    #[tokio::test]
    async fn reconcile_keeps_stale_snapshot_for_shared_replace_target()
    {
        let gateway = FakeGateway::default();
        let remote = snapshot(&[("legacy", "eeeeee",)],);
        let labels =
            vec![label("first", "111111", Some("legacy",),), label("second", "222222", Some("legacy",),)];

        let outcomes = Reconciler::new(&gateway,).reconcile(&repository(), &labels, &remote,).await;

        for outcome in &outcomes {
            assert_eq!(outcome.action, Action::Update {
                from: RemoteLabel::new("legacy", "eeeeee",),
            });
        }
        let targets: Vec<String,> = gateway
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update {
                    existing, ..
                } => Some(existing,),
                _ => None,
            },)
            .collect();
        assert_eq!(targets, vec!["legacy".to_owned(), "legacy".to_owned()]);
    }

    #[test]
    fn outcome_display_matches_report_format()
    {
        let created = Outcome {
            action: Action::Create,
            to:     label("feature", "00ff00", None,),
            error:  None,
        };
        assert_eq!(created.to_string(), "[OK] Created label named 'feature' with color '00ff00'");

        let updated = Outcome {
            action: Action::Update {
                from: RemoteLabel::new("old-name", "ffffff",),
            },
            to:     label("new-name", "000000", Some("old-name",),),
            error:  Some(GatewayError::request("update label 'old-name' in octo/repo", "Not Found",),),
        };
        assert_eq!(
            updated.to_string(),
            "[FAIL] Updated label named 'old-name' with color 'ffffff' to 'new-name' with color \
             '000000': update label 'old-name' in octo/repo failed: Not Found"
        );
    }
}
