//! Purpose: `uvbridge` CLI entry point (locate, bind, open, print layers).
//! Role: Binary crate root; parses args, prompts for a file, prints layers.
//! Invariants: Layer lines on stdout are the library's own renderings, one per line.
//! Invariants: Failures print a diagnostic on stderr and exit with code -1.
//! Invariants: The core library is never loaded before discovery validates a path.
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use uvbridge::core::bridge::Bridge;
use uvbridge::core::error::{Error, ErrorKind, to_exit_code};
use uvbridge::core::locator;

#[derive(Parser)]
#[command(
    name = "uvbridge",
    version,
    about = "Open a slicer file through an installed UVtools core library and print its layers"
)]
struct Cli {
    /// Printer file to open; prompts on stdin when omitted.
    file: Option<PathBuf>,
}

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            if let Some(hint) = err.hint() {
                eprintln!("Hint: {hint}");
            }
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    init_tracing();

    let install = locator::locate()?;
    let bridge = Bridge::load(&install)?;
    println!("{}", bridge.version()?);

    let path = match cli.file {
        Some(path) => path,
        None => prompt_for_path()?,
    };

    let Some(file) = bridge.open(&path)? else {
        return Err(Error::new(ErrorKind::UnknownFormat)
            .with_message("Input file is not recognized by any supported format")
            .with_path(path));
    };
    for layer in file.layers() {
        println!("{}", layer?);
    }
    Ok(())
}

fn prompt_for_path() -> Result<PathBuf, Error> {
    print!("Input file path: ");
    io::stdout().flush().map_err(prompt_io_error)?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(prompt_io_error)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("no file path given"));
    }
    Ok(PathBuf::from(trimmed))
}

fn prompt_io_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to read the file path prompt")
        .with_source(err)
}

fn init_tracing() {
    // Default to warn so debug logging never mixes into the layer output.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}
