use crate::config::DEFAULT_INPUT_DIR;
use crate::formatting::EmojiMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "purity-report")]
#[command(about = "Render GORM purity survey results as a Markdown report", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding per-version survey results (v1.20.0.json, ...)
    #[arg(env = "PURITY_SURVEY_DIR", default_value = DEFAULT_INPUT_DIR)]
    pub dir: PathBuf,

    /// Report configuration file (defaults to the nearest .purity-report.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use ASCII symbols instead of emoji in tables
    #[arg(long)]
    pub plain: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    pub fn emoji_mode(&self) -> EmojiMode {
        if self.plain {
            EmojiMode::Never
        } else {
            EmojiMode::Always
        }
    }
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
