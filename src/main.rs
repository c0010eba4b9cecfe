use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::tty::IsTty;
use tracing_subscriber::EnvFilter;

use tedit::{input, Editor, Session, TerminalWindow, WindowPool};

#[derive(clap::Parser, Debug)]
#[command(about = "A line-driven text editor", version = "0.1.0", author = "qwixck")]
struct Args {
    /// A file to open at startup; created on the first save if it doesn't exist
    path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "error")]
    log_level: String,

    /// Never colour error messages
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // stdout carries editor messages, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let color = !args.no_color && io::stderr().is_tty();
    let pool = WindowPool::new();

    let spawned = pool.spawn(move |id| {
        tracing::info!(window = id, "opening window");
        let mut editor = Editor::new(Session::new(TerminalWindow::new()), input::stdin_source())
            .with_color(color);
        editor.launch(args.path)?;
        editor.run()
    });

    if let Err(err) = spawned {
        eprintln!("ERROR: could not start window: {err}");
        return ExitCode::FAILURE;
    }

    // Other windows may still be blocked on input; returning from main ends them.
    let shutdown = pool.registry().wait();
    tracing::info!(?shutdown, "shutting down");

    ExitCode::from(shutdown.exit_code())
}
