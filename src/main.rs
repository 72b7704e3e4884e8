//! Blockdrop — drop falling blocks onto a grid and print the final stack height.

use anyhow::{Context, Result};
use blockdrop::{DEFAULT_WIDTH, EngineConfig};
use clap::Parser;
use std::io::Read;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let config = EngineConfig { width: args.width };
    let text = match args.blocks {
        Some(blocks) => blocks,
        None => read_stdin()?,
    };
    debug!(bytes = text.len(), "read block tokens");

    let engine = blockdrop::simulate(&text, &config).context("could not place blocks")?;
    if args.show_grid {
        eprintln!("{}", engine.grid());
    }
    println!("{}", engine.height());
    Ok(())
}

/// Drop Q/J/L/Z/S/I/T blocks onto a grid and print the final height.
#[derive(Debug, Parser)]
#[command(
    name = "blockdrop",
    version,
    about = "Drop Q/J/L/Z/S/I/T blocks onto a fixed-width grid and print the final stack height.",
    long_about = "Blockdrop drops a sequence of blocks onto a grid and prints the height of \
        the stack once every block has landed.\n\n\
        Each token is a block letter followed by the 0-based column of the block's left edge, \
        e.g. Q0 or T3. Separate tokens with commas or newlines. Blocks fall straight down and \
        never rotate; completely filled rows are removed.\n\n\
        SHAPES (rows top first, # filled):\n  \
        Q ##/##   J .#/.#/##   L #./#./##   Z ##./.##   S .##/##.   I ####   T ###/.#.\n\n\
        Logs go to stderr; set RUST_LOG to override --verbose/--log-level."
)]
pub struct Args {
    /// Block tokens such as "Q0,T1,S3". Read from stdin when omitted.
    #[arg(value_name = "BLOCKS")]
    pub blocks: Option<String>,

    /// Grid width in columns.
    #[arg(short, long, default_value_t = DEFAULT_WIDTH, value_name = "COLS")]
    pub width: usize,

    /// Print the final grid to stderr, top row first.
    #[arg(long)]
    pub show_grid: bool,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log filter directive (e.g. "debug" or "blockdrop=trace"). Overrides --verbose.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

impl Args {
    /// Filter directive when RUST_LOG is not set.
    fn log_directive(&self) -> String {
        if let Some(level) = &self.log_level {
            return level.clone();
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string()
    }
}

/// Filter from RUST_LOG when set, else from the CLI. A bad `--log-level` is an error
/// either way.
fn log_filter(args: &Args) -> Result<EnvFilter> {
    let directive = args.log_directive();
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid --log-level directive {directive:?}"))?;
    Ok(EnvFilter::try_from_default_env().unwrap_or(filter))
}

/// Structured logging to stderr so stdout carries only the height.
fn init_tracing(args: &Args) -> Result<()> {
    tracing_subscriber::registry()
        .with(log_filter(args)?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read block tokens from stdin")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_maps_to_levels() {
        let args = Args::parse_from(["blockdrop", "-vv", "Q0"]);
        assert_eq!(args.log_directive(), "debug");
        assert_eq!(args.blocks.as_deref(), Some("Q0"));
    }

    #[test]
    fn test_log_level_overrides_verbose() {
        let args = Args::parse_from(["blockdrop", "-v", "--log-level", "trace"]);
        assert_eq!(args.log_directive(), "trace");
        assert!(args.blocks.is_none());
        assert_eq!(args.width, DEFAULT_WIDTH);
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        let args = Args::parse_from(["blockdrop", "--log-level", "blockdrop=loud", "Q0"]);
        let err = log_filter(&args).unwrap_err();
        assert!(err.to_string().contains("invalid --log-level directive"));

        let args = Args::parse_from(["blockdrop", "--log-level", "blockdrop=trace", "Q0"]);
        assert!(log_filter(&args).is_ok());
    }
}
