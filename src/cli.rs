use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "file-ident")]
#[command(about = "Classifies archival files with an external content identifier", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify every file in the selection and write a JSON report
    Identify,
    /// Tag each file's metadata with its detected MIME type
    TagMime,
    /// Print configuration values
    PrintConfig,
}
