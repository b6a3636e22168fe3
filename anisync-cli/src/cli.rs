use anisync_types::Service;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "anisync",
    about = "Keep anime watch-lists in sync across tracking services",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, env = "ANISYNC_CONFIG", help = "Path to config.json")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the minimal change set between two library dumps")]
    Diff {
        #[arg(help = "Library dump to diff from")]
        old: PathBuf,

        #[arg(help = "Library dump to diff to")]
        new: PathBuf,

        #[arg(short, long, value_enum, default_value = "hummingbird")]
        service: ServiceArg,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Fetch and print a remote library")]
    Fetch {
        #[arg(short, long, help = "Library owner (defaults to the configured account)")]
        user: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Push the changes between two library dumps to every configured service")]
    Push {
        old: PathBuf,

        new: PathBuf,

        #[arg(long, help = "Print the batches without sending them")]
        dry_run: bool,
    },

    #[command(subcommand, about = "View and create the configuration file")]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show current configuration")]
    Show {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Print the configuration file path")]
    Path,

    #[command(about = "Write a default configuration file")]
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ServiceArg {
    Hummingbird,
    Myanimelist,
}

impl From<ServiceArg> for Service {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Hummingbird => Self::Hummingbird,
            ServiceArg::Myanimelist => Self::MyAnimeList,
        }
    }
}
