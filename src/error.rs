#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the label synchronizer."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Two families of errors exist. [`Error`] is fatal: it aborts the process
//! before any label is touched (configuration, credential, client setup) or
//! when the report can no longer be written. [`GatewayError`] is recoverable:
//! it is recorded against a single label or repository and the run continues.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use crate::config::ConfigFormat;

/// Fatal error returned by the configuration loader and the CLI.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The configuration file could not be opened or read.
    #[error("failed to read configuration from {path:?}: {source}")]
    NotFound {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// The configuration content is not a valid JSON or YAML document.
    #[error("failed to parse {format} configuration: {message}")]
    Malformed {
        /// Format the document was decoded as.
        format:  ConfigFormat,
        /// Decoder diagnostic.
        message: String
    },
    /// The configuration decoded but violates an invariant.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// A required positional argument was not supplied.
    #[error("missing {name}")]
    MissingArgument {
        /// Name of the argument as shown in the usage text.
        name: &'static str
    },
    /// No access token was found in the environment or on the command line.
    #[error("empty {variable} in env")]
    MissingCredential {
        /// Environment variable expected to hold the token.
        variable: &'static str
    },
    /// The GitHub client could not be constructed.
    #[error("failed to initialize GitHub client: {message}")]
    Client {
        /// Diagnostic reported by the client builder.
        message: String
    },
    /// The async runtime driving the GitHub client could not start.
    #[error("failed to start async runtime: {source}")]
    Runtime {
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// The report could not be written to its destination.
    #[error("failed to write report: {source}")]
    Report {
        /// Underlying I/O error.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn invalid<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Invalid {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Malformed {
            format:  ConfigFormat::Json,
            message: source.to_string()
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Malformed {
            format:  ConfigFormat::Yaml,
            message: source.to_string()
        }
    }
}

/// Creates an [`Error::NotFound`] variant capturing the failing path and
/// source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::NotFound {
        path: path.to_path_buf(),
        source
    }
}

/// Failure of a single call against the remote label service.
///
/// The reconciler never inspects the variant; it only records the error next
/// to the label it belongs to.
#[derive(Debug, masterror::Error)]
pub enum GatewayError {
    /// The remote service rejected the request or could not be reached.
    #[error("{operation} failed: {message}")]
    Request {
        /// Short description of the attempted operation.
        operation: String,
        /// Diagnostic reported by the HTTP client or the service.
        message:   String
    },
    /// A request path could not be assembled from the label name.
    #[error("invalid label route: {message}")]
    Route {
        /// Human readable reason.
        message: String
    }
}

impl GatewayError {
    /// Wraps a client error raised while performing `operation`.
    ///
    /// # Parameters
    ///
    /// * `operation` - What was attempted, e.g. `list labels of owner/repo`.
    /// * `error` - The underlying error, rendered through [`Display`].
    pub fn request<O, E>(operation: O, error: E) -> Self
    where
        O: Into<String>,
        E: Display
    {
        Self::Request {
            operation: operation.into(),
            message:   error.to_string()
        }
    }
}
