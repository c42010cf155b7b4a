use clap::Parser;
use std::path::PathBuf;

/// Terminal portfolio: hero, about, skills, projects and contact.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// Read settings from this file instead of ./.foliorc or ~/.foliorc
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (filter with FOLIO_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the fully revealed page to stdout and exit
    #[arg(long)]
    pub print: bool,

    /// Page width used by --print
    #[arg(long, value_name = "COLS", default_value_t = 80)]
    pub width: u16,

    /// Directory holding the profile picture
    #[arg(long, value_name = "DIR")]
    pub asset_dir: Option<PathBuf>,

    /// Print a sample .foliorc and exit
    #[arg(long)]
    pub sample_config: bool,
}
