pub mod completions;
pub mod convert;
pub mod show;

use clap::{Parser, Subcommand};

/// mapconv - Convert between Color Ramp and Map Range nodes
#[derive(Parser, Debug)]
#[command(name = "mapconv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a node in a graph document to its counterpart type
    Convert(convert::ConvertArgs),

    /// List the nodes and links of a graph document
    Show(show::ShowArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
