// Setlist - interactive playlist manager
// Reads one menu choice at a time from stdin and hands it to the playlist core

use anyhow::Result;
use clap::Parser;
use setlist::{
    cli::{self, Command, InputError, MenuChoice},
    config::{Config, LoggingConfig, LOG_FILE_NAME},
    Playlist,
};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "setlist")]
#[command(about = "An in-memory playlist manager with title search and back/forward navigation")]
struct Args {
    /// Enable developer logging (debug level, still written to the log file)
    #[arg(long)]
    dev: bool,

    /// Use this config file instead of the one in the user config dir
    #[arg(long)]
    config: Option<PathBuf>,
}

// The menu owns stdout, so logs always go to the file, dev mode included
fn init_logging(logging: &LoggingConfig, dev: bool) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.directive(dev)));

    std::fs::create_dir_all(&logging.directory)?;

    // Daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(&logging.directory, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if dev {
        eprintln!(
            "🔧 Dev mode: debug output goes to {}",
            logging.directory.join(format!("{}.*", LOG_FILE_NAME)).display()
        );
    }

    Ok(guard)
}

/// Print a prompt and wait for one line. `None` means stdin closed.
/// A line that isn't UTF-8 comes back as `Some(Err(..))` for the caller to reject.
async fn prompt(
    stdin: &mut BufReader<Stdin>,
    label: &str,
) -> Result<Option<std::result::Result<String, InputError>>> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut raw = Vec::new();
    if stdin.read_until(b'\n', &mut raw).await? == 0 {
        return Ok(None);
    }
    Ok(Some(cli::decode_line(raw)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Keep the guard alive so buffered log lines get flushed on exit
    let _guard = init_logging(&config.logging, args.dev)?;

    info!("🎵 Setlist starting up with playlist '{}'", config.playlist.name);

    let mut playlist = Playlist::from_config(&config.playlist);
    let mut stdin = BufReader::new(tokio::io::stdin());

    'menu: loop {
        let input = match prompt(&mut stdin, cli::MENU).await? {
            Some(Ok(input)) => input,
            Some(Err(e)) => {
                println!("{}", e);
                continue;
            }
            None => break,
        };

        let Some(choice) = MenuChoice::parse(&input) else {
            println!("{}", InputError::InvalidChoice);
            continue;
        };

        let mut fields = Vec::with_capacity(choice.prompts().len());
        for label in choice.prompts() {
            match prompt(&mut stdin, label).await? {
                Some(Ok(field)) => fields.push(field),
                Some(Err(e)) => {
                    debug!("Dropped {:?}: undecodable field", choice);
                    println!("{}", e);
                    continue 'menu;
                }
                None => break 'menu,
            }
        }

        match Command::from_choice(choice, &fields) {
            Ok(Some(command)) => {
                debug!("Menu command: {:?}", command);
                println!("{}", cli::execute(&mut playlist, command));
            }
            Ok(None) => break,
            Err(e) => println!("{}", e),
        }
    }

    info!("Setlist exiting with {} songs in '{}'", playlist.len(), playlist.name());
    println!("Exiting program.");
    Ok(())
}
