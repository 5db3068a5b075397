use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Context, Result};
use log::LevelFilter;

use zypher_fold::cli::{self, Command};
use zypher_fold::config::{expand_path, SessionOptions};
use zypher_fold::error::ConfigError;
use zypher_fold::history::{HistoryManager, Replay};
use zypher_fold::logging::Logger;
use zypher_fold::session::EditSession;
use zypher_fold::storage::FileStore;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };

    let mut logger = Logger::new(LevelFilter::Warn);
    if let Some(path) = &options.debug_log_path {
        logger = logger
            .with_level(LevelFilter::Debug)
            .with_file_output(path)
            .without_stderr();
    }
    logger.install().context("failed to install logger")?;

    run(&options)
}

fn run(options: &SessionOptions) -> Result<()> {
    let config = options.to_history_config()?;
    let history_dir = options
        .resolve_history_dir()
        .context("could not determine a history directory; pass --history-dir")?;

    let store = FileStore::new(&history_dir);
    let history = HistoryManager::with_config(Box::new(store), &config);
    let mut session = EditSession::new("", history, &config);

    println!("zypher-fold {}", env!("CARGO_PKG_VERSION"));
    println!("history: {}", history_dir.display());
    println!("type `help` for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        if command == Command::Replay {
            replay(&session, config.replay_interval);
            continue;
        }

        let result = cli::execute(&mut session, command, "");
        if let Some(message) = result.message {
            println!("{}", message);
        }
        if result.should_quit {
            break;
        }
    }

    Ok(())
}

fn replay(session: &EditSession, interval: std::time::Duration) {
    let frames = Replay::from_history(session.history());
    let total = frames.total();
    for frame in frames {
        println!(
            "[{}/{}] {}",
            frame.index + 1,
            total,
            cli::preview(&frame.text, cli::PREVIEW_WIDTH * 2)
        );
        thread::sleep(interval);
    }
}

/// 引数を解析する（`--help` の場合は `None`）
fn parse_args(args: &[String]) -> Result<Option<SessionOptions>> {
    let mut options = SessionOptions::default();

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--history-dir" => {
                let raw = flag_value(arg, iter.next())?;
                options.history_dir = Some(expand_path(raw)?);
            }
            "--debug-log" => {
                let path = match iter.peek() {
                    Some(next) if !next.starts_with('-') => Some(expand_path(next)?),
                    _ => None,
                };
                if path.is_some() {
                    iter.next();
                }
                options.debug_log_path = path.or_else(|| Some(PathBuf::from("debug.log")));
            }
            "--coalesce-ms" => {
                let raw = flag_value(arg, iter.next())?;
                let ms = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "coalesce-ms".to_string(),
                    value: raw.to_string(),
                })?;
                options.coalesce_window_ms = Some(ms);
            }
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {}", other),
        }
    }

    Ok(Some(options))
}

fn flag_value<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str> {
    match value {
        Some(value) => Ok(value.as_str()),
        None => Err(ConfigError::MissingValue {
            key: flag.trim_start_matches('-').to_string(),
        }
        .into()),
    }
}

fn print_usage() {
    println!("zypher-fold {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("usage: zypher-fold [--history-dir <dir>] [--debug-log [path]] [--coalesce-ms <n>]");
}
