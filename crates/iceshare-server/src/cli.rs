//! Command-line interface for the `iceshare` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

/// iceshare - share ICE records as links
#[derive(Debug, Parser)]
#[command(name = "iceshare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the encrypt/decrypt endpoints
    Serve,

    /// Encode a record JSON file into a share link
    Encode {
        /// Record JSON file, or `-` for stdin
        #[arg(value_name = "FILE|-")]
        input: String,

        /// Base for the share link (overrides share.base_url)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Print only the token
        #[arg(long)]
        token_only: bool,
    },

    /// Decode a token or share link and print the record
    Decode {
        /// Bare token or a URL carrying `data=`
        #[arg(value_name = "TOKEN|URL")]
        input: String,
    },

    /// Print a fresh 256-bit key as hex
    Keygen,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
