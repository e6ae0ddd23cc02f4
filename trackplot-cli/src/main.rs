use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod error;
mod figure;

use error::{print_error_and_exit, CliError};
use figure::PanelOverrides;

#[derive(Parser)]
#[command(name = "trackplot")]
#[command(about = "trackplot - linear feature map renderer")]
#[command(version)]
#[command(long_about = "
trackplot draws a coordinate ruler and stacked feature tracks (genes, transcripts,
variants) into a PNG, optionally with an HTML image map that makes features clickable.

Examples:
  trackplot example > figure.toml
  trackplot render figure.toml --out figure.png --clickable
  trackplot render figure.toml --out zoom.png --start 2000 --stop 5000 --width 1200
  trackplot glyphs
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a figure description to PNG
    Render {
        /// Figure description file (TOML)
        figure: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        out: PathBuf,

        /// Width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// First logical position to display
        #[arg(long, allow_hyphen_values = true)]
        start: Option<i64>,

        /// Last logical position to display
        #[arg(long, allow_hyphen_values = true)]
        stop: Option<i64>,

        /// Write a companion HTML image map
        #[arg(long)]
        clickable: bool,

        /// Print a JSON summary of what was written
        #[arg(long)]
        json: bool,
    },

    /// Print an example figure description
    Example {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the available glyph kinds
    Glyphs,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render {
            figure,
            out,
            width,
            start,
            stop,
            clickable,
            json,
        } => {
            let overrides = PanelOverrides {
                width,
                start,
                stop,
                clickable,
            };
            commands::render::execute(figure, out, overrides, json)?;
        }

        Commands::Example { out } => {
            commands::example::execute(out)?;
        }

        Commands::Glyphs => commands::example::list_glyphs(),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            print_error_and_exit(cli_err);
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
