use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "floraparse",
    version,
    about = "Extract structured plant traits from botanical taxon descriptions"
)]
pub struct Args {
    /// Description files or directories to parse (.txt files)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "tree", value_parser = ["tree", "text", "json"])]
    pub format: String,

    /// Read a description from stdin, use PATH for display
    #[arg(long, value_name = "PATH")]
    pub stdin: Option<PathBuf>,

    /// List the recognized clause labels, one per line, then exit
    #[arg(long)]
    pub list_labels: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}
