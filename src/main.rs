//! Bubu - pixel-art animation tooling for embedded displays
//!
//! Creates and edits animation projects, exports them as PROGMEM headers,
//! and normalizes transit departure payloads.

use bubu::cli::{
    ConfigArgs, DeparturesArgs, EraseArgs, ExitCode, ExportArgs, FaceArgs, FrameArgs, InspectArgs, NewArgs,
    Pack565Args, PaintArgs,
};
use bubu::constants::APP_BINARY_NAME;
use clap::{Parser, Subcommand};

/// Bubu - pixel-art animation tooling for embedded displays
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a blank animation project
    New(NewArgs),
    /// Summarize a project
    Inspect(InspectArgs),
    /// Paint one cell of a frame
    Paint(PaintArgs),
    /// Erase one cell of a frame
    Erase(EraseArgs),
    /// Add, clone or delete a frame
    Frame(FrameArgs),
    /// Export all frames as a PROGMEM animation header
    Export(ExportArgs),
    /// Export one frame as a full-resolution face bitmap
    Face(FaceArgs),
    /// Print RGB565 values for colors
    Pack565(Pack565Args),
    /// Normalize departures from a saved provider response
    Departures(DeparturesArgs),
    /// Show or change settings
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::New(args) => args.execute(),
        Command::Inspect(args) => args.execute(),
        Command::Paint(args) => args.execute(),
        Command::Erase(args) => args.execute(),
        Command::Frame(args) => args.execute(),
        Command::Export(args) => args.execute(),
        Command::Face(args) => args.execute(),
        Command::Pack565(args) => args.execute(),
        Command::Departures(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!();
            eprintln!("For more options, run:");
            eprintln!("  {} --help", APP_BINARY_NAME);
            err.exit_code()
        }
    };

    if code != ExitCode::Success {
        std::process::exit(code.code());
    }
}
