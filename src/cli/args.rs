//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use assetbake::Format;

/// Bake static files into a fingerprinted, gzip-compressed asset table
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (searched upward from the current directory)
    #[arg(short = 'C', long, global = true, default_value = "assetbake.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Walk a directory and write the asset artifact
    #[command(visible_alias = "b")]
    Bake {
        #[command(flatten)]
        args: BakeArgs,
    },

    /// Serve assets over HTTP through the resolver
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        args: ServeArgs,
    },
}

/// Bake command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BakeArgs {
    /// Directory to embed
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub input: Option<PathBuf>,

    /// Artifact path
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Gate the generated module behind this cargo feature
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Artifact format (inferred from the output extension by default)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,
}

/// Serve command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Development mode: resolve from this directory on every request
    #[arg(long, value_name = "DIR", conflicts_with = "pack", value_hint = clap::ValueHint::DirPath)]
    pub dev: Option<PathBuf>,

    /// Compiled mode: resolve from this pack artifact
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub pack: Option<PathBuf>,

    /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
    #[arg(short, long)]
    pub interface: Option<std::net::IpAddr>,

    /// Port number to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}
