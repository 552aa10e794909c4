//! Command line entry point.

use std::io::Write as _;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use board_locale::audit::audit;
use board_locale::config::{
    ConfigError,
    ConfigManager,
    MatcherError,
};
use board_locale::edit::{
    self,
    EditError,
};
use board_locale::locale_id::InvalidLocaleId;
use board_locale::{
    Arg,
    LocaleError,
    LocaleId,
    LocaleRegistry,
};
use clap::{
    Parser,
    Subcommand,
};
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "board-locale", version, about = "Inspect and edit board locale dictionaries")]
struct Cli {
    /// Workspace root holding `.board-locale.json` and locale files.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Action to run.
    #[command(subcommand)]
    command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a key and print the result.
    Translate {
        /// Locale to translate into, e.g. `pl_PL`.
        locale: String,
        /// Source-language phrase.
        key: String,
        /// Positional arguments for the key's placeholders.
        args: Vec<String>,
        /// Escape arguments for HTML output.
        #[arg(long)]
        html: bool,
    },
    /// Print a JSON completeness report for a locale.
    Audit {
        /// Locale to audit.
        locale: String,
        /// Also count keys known to this locale but missing from the audited one.
        #[arg(long)]
        reference: Option<String>,
    },
    /// List available locales.
    List,
    /// Set a translation in a locale file.
    Set {
        /// Locale file to edit.
        file: PathBuf,
        /// Source-language phrase.
        key: String,
        /// Translation to store.
        value: String,
    },
    /// Remove a translation from a locale file.
    Unset {
        /// Locale file to edit.
        file: PathBuf,
        /// Source-language phrase.
        key: String,
    },
}

/// Failure of a command.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Settings file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Settings patterns do not compile.
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// A locale table could not be built.
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// A locale argument is malformed.
    #[error(transparent)]
    InvalidLocaleId(#[from] InvalidLocaleId),

    /// A locale file could not be edited.
    #[error("{path}: {source}")]
    Edit {
        /// Edited file.
        path: PathBuf,
        /// Edit failure.
        #[source]
        source: EditError,
    },

    /// A locale file could not be read or written.
    #[error("Failed to access '{path}': {source}")]
    File {
        /// File accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `unset` found no active entry for the key.
    #[error("Key '{key}' not found in '{path}'")]
    KeyNotFound {
        /// Requested key.
        key: String,
        /// Edited file.
        path: PathBuf,
    },

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// The audit report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses arguments, sets up logging and runs the command.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(writer)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            let _ = writeln!(std::io::stderr().lock(), "error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one command.
fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Translate { locale, key, args, html } => {
            let registry = registry(&cli.root)?;
            let translator = registry.translator(&LocaleId::parse(&locale)?)?;
            let args: Vec<Arg<'_>> = args.iter().map(Arg::from).collect();

            let text = if html {
                translator.translate_html(&key, &args)
            } else {
                translator.translate(&key, &args)
            };
            writeln!(std::io::stdout().lock(), "{text}")?;
        }
        Command::Audit { locale, reference } => {
            let registry = registry(&cli.root)?;
            let table = registry.get(&LocaleId::parse(&locale)?)?;
            let reference = reference
                .map(|reference| {
                    LocaleId::parse(&reference)
                        .map_err(CliError::from)
                        .and_then(|reference| Ok(registry.get(&reference)?.known_keys()))
                })
                .transpose()?;

            let report = audit(&table, reference.as_ref());
            writeln!(std::io::stdout().lock(), "{}", serde_json::to_string_pretty(&report)?)?;
        }
        Command::List => {
            let registry = registry(&cli.root)?;
            let mut stdout = std::io::stdout().lock();
            for locale in registry.loader().available() {
                writeln!(stdout, "{locale}")?;
            }
        }
        Command::Set { file, key, value } => {
            let text = read(&file)?;
            let edited = edit::set_entry(&text, &key, &value)
                .map_err(|source| CliError::Edit { path: file.clone(), source })?;
            write(&file, &edited)?;
        }
        Command::Unset { file, key } => {
            let text = read(&file)?;
            let edited = edit::remove_entry(&text, &key)
                .map_err(|source| CliError::Edit { path: file.clone(), source })?
                .ok_or_else(|| CliError::KeyNotFound { key: key.clone(), path: file.clone() })?;
            write(&file, &edited)?;
        }
    }
    Ok(())
}

/// Registry over the workspace at `root`, configured by its settings file.
fn registry(root: &Path) -> Result<LocaleRegistry, CliError> {
    Ok(ConfigManager::load(root)?.registry()?)
}

/// Reads a locale file.
fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::File { path: path.to_path_buf(), source })
}

/// Writes a locale file.
fn write(path: &Path, text: &str) -> Result<(), CliError> {
    std::fs::write(path, text).map_err(|source| CliError::File { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "Wrote locale file");
    Ok(())
}
