use clap::Parser;
use std::io::{self, BufRead};
use taskchat_cli::cli::Cli;
use taskchat_core::commands::Flow;
use taskchat_core::engine::Engine;
use taskchat_core::error::AppError;
use taskchat_core::logging;
use taskchat_core::storage::json_store;

const GREETING: &str = "Hello! I'm taskchat. What can I do for you?";

fn run_session(cli: &Cli) -> Result<(), AppError> {
    let store_path = match cli.store.clone() {
        Some(path) => path,
        None => json_store::store_path()?,
    };
    let mut engine = Engine::load(store_path)?;

    println!("{GREETING}");

    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    let mut input = String::new();

    loop {
        input.clear();
        let bytes = match stdin_lock.read_line(&mut input) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("ERROR: {err}");
                break;
            }
        };

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        let reply = engine.run_line(line);
        println!("{}", reply.text);

        if reply.flow == Flow::Stopped {
            break;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref()
        && let Err(err) = logging::init_logging(&cli.log_level, log_dir)
    {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run_session(&cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
