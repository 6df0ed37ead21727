//! Command-line interface for the labelsync binary.
//!
//! The CLI takes a single configuration file, reads the GitHub token from the
//! environment (or `--token`), and prints a per-repository report to standard
//! output. Fatal errors print the usage text and exit with status 1; failures
//! of individual repositories or labels only appear in the report.

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process,
};

use clap::{CommandFactory, Parser};
use labelsync::{Configuration, Error, GitHubGateway, Runner, load_config};
use tracing_subscriber::EnvFilter;

const TOKEN_VARIABLE: &str = "GITHUB_TOKEN";

/// Bulk update issue labels of GitHub repositories.
#[derive(Debug, Parser,)]
#[command(
    name = "labelsync",
    version,
    about = "Bulk update issue labels of GitHub repositories",
    help_template = "{name} {version}\n{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}{after-help}",
    after_help = "To specify GITHUB_TOKEN when running it:\n\n  GITHUB_TOKEN=token labelsync <CONFIG>"
)]
struct Cli
{
    /// Path to the JSON or YAML file describing labels and repositories.
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf,>,

    /// GitHub access token.
    #[arg(long = "token", env = TOKEN_VARIABLE, hide_env_values = true)]
    token: Option<String,>,
}

/// Validated command-line input.
#[derive(Debug,)]
struct Invocation
{
    config: Configuration,
    token:  String,
}

/// Entry point that reports fatal errors and sets the exit status.
fn main()
{
    init_tracing();

    let cli = Cli::parse();
    let invocation = match resolve(cli,) {
        Ok(invocation,) => invocation,
        Err(error,) => usage(&error,),
    };

    if let Err(error,) = execute(invocation,) {
        usage(&error,);
    }
}

/// Checks the argument, then the credential, then loads the configuration.
///
/// # Errors
///
/// Returns [`Error::MissingArgument`], [`Error::MissingCredential`] or any
/// configuration error from [`load_config`].
fn resolve(cli: Cli,) -> Result<Invocation, Error,>
{
    let path = cli.config.ok_or(Error::MissingArgument {
        name: "config file",
    },)?;
    let token = cli.token.filter(|token| !token.is_empty(),).ok_or(Error::MissingCredential {
        variable: TOKEN_VARIABLE,
    },)?;
    let config = load_config(&path,)?;

    Ok(Invocation {
        config,
        token,
    },)
}

/// Runs the synchronization on a single-threaded runtime.
///
/// # Errors
///
/// Returns [`Error::Runtime`] when the runtime cannot start,
/// [`Error::Client`] when the client cannot be created and [`Error::Report`]
/// when standard output is closed.
fn execute(invocation: Invocation,) -> Result<(), Error,>
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| Error::Runtime {
            source,
        },)?;

    runtime.block_on(async {
        let gateway = GitHubGateway::from_token(invocation.token,)?;
        let stdout = io::stdout();
        let mut runner =
            Runner::new(gateway, stdout.lock(),).with_progress(io::stderr().is_terminal(),);
        runner.run(&invocation.config,).await?;
        Ok::<(), Error,>((),)
    },)
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).init();
}

/// Prints the error followed by the usage text to stdout and exits with 1.
fn usage(error: &Error,) -> !
{
    println!("Error: {}", error.to_display_string());
    println!();
    println!("{}", Cli::command().render_help());
    process::exit(1,);
}
