//! CodeTrans - Java/C# code translation from the command line
//!
//! Runs the translate commands against a file (or stdin) standing in for
//! the editor buffer.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use codetrans::commands::{self, COMMANDS};
use codetrans::config::Config;
use codetrans::core::reindent::{ReindentMode, Reindenter};
use codetrans::direction::Direction;
use codetrans::editor::{FileEditor, SelectionSpec, Source};
use codetrans::handler::CommandHandler;
use codetrans::notify::ConsoleNotifier;
use codetrans::TranslationClient;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the translation service
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Reindentation mode
    #[arg(long, global = true, value_enum)]
    mode: Option<ReindentMode>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(clap::Args, Debug)]
struct Target {
    /// File to edit, `-` for stdin
    file: PathBuf,

    /// Select lines START:END (1-based, inclusive)
    #[arg(long, value_parser = SelectionSpec::lines, conflicts_with = "range")]
    lines: Option<SelectionSpec>,

    /// Select bytes START:END (end exclusive)
    #[arg(long, value_parser = SelectionSpec::bytes)]
    range: Option<SelectionSpec>,

    /// Print the edited buffer instead of writing the file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Translate the selection from Java to C#
    Forward(Target),
    /// Translate the selection from C# to Java
    Backward(Target),
    /// Run a registered command by id
    Run {
        command_id: String,
        #[command(flatten)]
        target: Target,
    },
    /// Reindent a file and print it, without translating
    Format {
        /// File to format, `-` for stdin
        file: PathBuf,
    },
    /// List registered commands
    Commands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = Some(secs);
    }
    if let Some(mode) = cli.mode {
        config.reindent_mode = mode;
    }

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::from_str(&config.log_level).unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!("🔤 CodeTrans v{} starting...", env!("CARGO_PKG_VERSION"));

    let notifier = if cli.quiet {
        ConsoleNotifier::quiet()
    } else {
        ConsoleNotifier::new()
    };

    match cli.command {
        Cmd::Forward(target) => translate(&config, notifier, Direction::JavaToTarget, target).await,
        Cmd::Backward(target) => translate(&config, notifier, Direction::TargetToJava, target).await,
        Cmd::Run { command_id, target } => {
            let cmd = commands::find(&command_id)
                .ok_or_else(|| anyhow!("unknown command '{}'", command_id))?;
            info!("🎯 Running {}", cmd.title);
            translate(&config, notifier, cmd.direction, target).await
        }
        Cmd::Format { file } => {
            let editor = FileEditor::open(Source::from_arg(&file))?;
            let formatted = Reindenter::from_config(&config).reindent(editor.buffer().text());
            println!("{}", formatted);
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Commands => {
            for cmd in COMMANDS.iter() {
                println!("{}\t{}", cmd.id, cmd.title);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn translate(
    config: &Config,
    notifier: ConsoleNotifier,
    direction: Direction,
    target: Target,
) -> Result<ExitCode> {
    let mut editor = FileEditor::open(Source::from_arg(&target.file))?;
    let spec = target.lines.or(target.range).unwrap_or_default();
    editor.buffer_mut().apply_spec(spec)?;

    let service = Arc::new(TranslationClient::new(config)?);
    let mut handler = CommandHandler::new(service, Arc::new(notifier));
    let outcome = handler.run(direction, Some(&mut editor)).await;

    if target.dry_run {
        print!("{}", editor.buffer().text());
    } else if outcome.is_applied() || editor.is_stdin() {
        // stdin is echoed back even when unchanged so filters never lose text
        editor.save()?;
    }

    if outcome.is_applied() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
