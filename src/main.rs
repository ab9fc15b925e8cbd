// PathBridge - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Platform path and config.toml resolution
// 4. Dispatch to the conversion, history and preferences commands
//
// Results go to stdout; diagnostics go to stderr through tracing.

use clap::{Args, Parser, Subcommand, ValueEnum};
use pathbridge::app::prefs;
use pathbridge::app::service::{ConversionService, ServiceError};
use pathbridge::app::store::{export_history, HistoryStore, JsonHistoryStore};
use pathbridge::core::converter;
use pathbridge::core::export::ExportFormat;
use pathbridge::core::history::HistoryQuery;
use pathbridge::core::model::{HistoryRecord, OsKind};
use pathbridge::platform::config::{load_config, AppConfig, PlatformPaths};
use pathbridge::platform::user;
use pathbridge::util;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// PathBridge - convert file paths between Windows and macOS.
///
/// Rewrites separators, drive letters and home directories, swapping the
/// username so a path copied on one machine opens on the other.
#[derive(Parser, Debug)]
#[command(name = "pathbridge", version, about)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Directory holding config.toml (overrides the platform default).
    #[arg(long = "config-dir", global = true)]
    config_dir: Option<PathBuf>,

    /// Directory holding history and preferences (overrides the platform default).
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a path to the other OS convention.
    Convert(ConvertArgs),

    /// Report which convention a path uses and the username in it.
    Detect {
        path: String,
    },

    /// Check whether a path is acceptable for conversion.
    Validate {
        path: String,
    },

    /// Inspect, export or clear the conversion history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show or change the saved defaults.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Path to convert.
    path: String,

    /// Source convention (windows|macos). Auto-detected when omitted.
    #[arg(short = 'f', long = "from")]
    from: Option<OsKind>,

    /// Target convention (windows|macos).
    #[arg(short = 't', long = "to")]
    to: Option<OsKind>,

    /// Username to place in the home directory. Pass "" to keep the original.
    #[arg(short = 'u', long = "user", conflicts_with = "me")]
    user: Option<String>,

    /// Use the current login name as the target username.
    #[arg(long = "me")]
    me: bool,

    /// Do not record this conversion in the history.
    #[arg(long = "no-history")]
    no_history: bool,

    /// Print the full result as JSON.
    #[arg(long = "json")]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List recent conversions, newest first.
    List {
        /// Case-insensitive text to look for in paths and usernames.
        #[arg(short = 's', long = "search")]
        search: Option<String>,

        /// Only conversions from or to this OS.
        #[arg(long = "os")]
        os: Option<OsKind>,

        /// Maximum number of records.
        #[arg(short = 'n', long = "limit")]
        limit: Option<usize>,

        /// Print records as JSON.
        #[arg(long = "json")]
        json: bool,
    },

    /// Write the full history to a file.
    Export {
        file: PathBuf,

        /// Output format; inferred from the file extension when omitted.
        #[arg(long = "format", value_enum)]
        format: Option<FormatArg>,
    },

    /// Delete all recorded conversions.
    Clear,
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    /// Print the current defaults.
    Show,

    /// Update one or more defaults.
    Set {
        /// Default target username ("" to unset).
        #[arg(short = 'u', long = "user")]
        user: Option<String>,

        #[arg(short = 'f', long = "from")]
        from: Option<OsKind>,

        #[arg(short = 't', long = "to")]
        to: Option<OsKind>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// JSON shape printed by `convert --json`.
#[derive(Serialize)]
struct ConvertOutput<'a> {
    original_path: &'a str,
    converted_path: &'a str,
    source_os: Option<OsKind>,
    target_os: Option<OsKind>,
    detected_os: Option<OsKind>,
    extracted_username: Option<&'a str>,
    target_username: Option<&'a str>,
    onedrive: bool,
    changed: bool,
    message: &'a str,
}

/// Exit code for inputs rejected by validation.
const EXIT_INVALID: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut platform_paths = PlatformPaths::resolve();
    if let Some(dir) = cli.config_dir {
        platform_paths = platform_paths.with_config_dir(dir);
    }
    let (config, config_warnings) = load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::debug!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "PathBridge starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let paths = match cli.data_dir {
        Some(dir) => platform_paths.with_data_dir(dir),
        None => platform_paths,
    };

    match run(cli.command, &paths, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    command: Command,
    paths: &PlatformPaths,
    config: &AppConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Command::Convert(args) => cmd_convert(args, paths, config),
        Command::Detect { path } => {
            let os = converter::detect_os(&path);
            match os {
                Some(os) => println!("{os}"),
                None => println!("unknown"),
            }
            if let Some(name) = converter::extract_username(&path, os) {
                println!("username: {name}");
            }
            if converter::is_onedrive_path(&path) {
                println!("onedrive: yes");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { path } => {
            let validation = converter::validate_path(&path);
            match validation.error {
                None => {
                    println!("valid");
                    Ok(ExitCode::SUCCESS)
                }
                Some(msg) => {
                    println!("invalid: {msg}");
                    Ok(ExitCode::from(EXIT_INVALID))
                }
            }
        }
        Command::History { action } => cmd_history(action, paths, config),
        Command::Prefs { action } => Ok(cmd_prefs(action, paths, config)?),
    }
}

fn cmd_convert(
    args: ConvertArgs,
    paths: &PlatformPaths,
    config: &AppConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let preferences = prefs::load_or_default(&paths.prefs_file(), config);
    let store = JsonHistoryStore::open(&paths.history_file(), config.history_max_entries);
    let mut service = ConversionService::new(preferences, store)
        .with_history(config.history_enabled && !args.no_history);

    let username = if args.me {
        let name = user::current_username();
        if name.is_none() {
            tracing::warn!("No login name found in the environment; keeping the original username");
        }
        Some(name.unwrap_or_default())
    } else {
        args.user
    };

    let report = match service.run(&args.path, args.from, args.to, username.as_deref()) {
        Ok(report) => report,
        Err(ServiceError::Invalid(msg)) => {
            eprintln!("error: {msg}");
            return Ok(ExitCode::from(EXIT_INVALID));
        }
    };

    if args.json {
        let output = ConvertOutput {
            original_path: &report.request.original_path,
            converted_path: &report.result.converted_path,
            source_os: report.request.source_os,
            target_os: report.request.target_os,
            detected_os: report.detected_os,
            extracted_username: report.result.extracted_username.as_deref(),
            target_username: report.request.target_username.as_deref(),
            onedrive: converter::is_onedrive_path(&report.result.converted_path),
            changed: report.changed,
            message: report.message(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", report.result.converted_path);
        if !report.changed {
            eprintln!("{}", report.message());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_history(
    action: HistoryAction,
    paths: &PlatformPaths,
    config: &AppConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut store = JsonHistoryStore::open(&paths.history_file(), config.history_max_entries);

    match action {
        HistoryAction::List {
            search,
            os,
            limit,
            json,
        } => {
            let query = HistoryQuery {
                search: search.unwrap_or_default(),
                os,
                limit: Some(limit.unwrap_or(config.history_list_limit)),
            };
            let records = store.list(&query)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                eprintln!("No conversions found.");
            } else {
                for record in &records {
                    println!("{}", format_record(record));
                }
            }
        }
        HistoryAction::Export { file, format } => {
            let format = format
                .map(ExportFormat::from)
                .unwrap_or_else(|| ExportFormat::from_path(&file));
            let count = export_history(&store, &file, format)?;
            eprintln!("Exported {count} conversions to {}", file.display());
        }
        HistoryAction::Clear => {
            let removed = store.clear()?;
            eprintln!("Removed {removed} conversions.");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn format_record(record: &HistoryRecord) -> String {
    format!(
        "{}  {:>7} -> {:<7}  {}  =>  {}",
        record.created_date.format("%Y-%m-%d %H:%M"),
        record.source_os,
        record.target_os,
        record.original_path,
        record.converted_path
    )
}

fn cmd_prefs(
    action: PrefsAction,
    paths: &PlatformPaths,
    config: &AppConfig,
) -> util::error::Result<ExitCode> {
    let path = paths.prefs_file();
    let mut current = prefs::load_or_default(&path, config);

    match action {
        PrefsAction::Show => {}
        PrefsAction::Set { user, from, to } => {
            if let Some(name) = user {
                current.default_username = name.trim().to_string();
            }
            if let Some(os) = from {
                current.default_source_os = os;
            }
            if let Some(os) = to {
                current.default_target_os = os;
            }
            prefs::save(&current, &path)?;
            eprintln!("Settings saved successfully!");
        }
    }

    println!(
        "username:  {}",
        current.username().unwrap_or("(not set)")
    );
    println!("source os: {}", current.default_source_os.label());
    println!("target os: {}", current.default_target_os.label());
    Ok(ExitCode::SUCCESS)
}
