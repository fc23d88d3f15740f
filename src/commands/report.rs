use crate::config::{load_config, ReportConfig};
use crate::formatting::{EmojiMode, SymbolSet};
use crate::io::ResultStore;
use crate::output::render_report;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct ReportOptions {
    pub dir: PathBuf,
    pub config: Option<PathBuf>,
    pub emoji: EmojiMode,
}

impl ReportOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            config: None,
            emoji: EmojiMode::Always,
        }
    }
}

/// Load, compare and render; the complete document or an error.
pub fn generate_report(options: &ReportOptions) -> Result<String> {
    let config = resolve_config(options.config.as_deref())?;
    let store = ResultStore::load(&options.dir)?;

    let versions = store.versions();
    info!(
        versions = versions.len(),
        methods = store.methods().len(),
        "Rendering purity report"
    );

    Ok(render_report(&store, &config, SymbolSet::for_mode(options.emoji)))
}

/// Generate the report and write it to stdout.
pub fn handle_report(options: ReportOptions) -> Result<()> {
    let report = generate_report(&options)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(report.as_bytes())
        .and_then(|_| handle.flush())
        .context("Failed to write report to stdout")?;
    Ok(())
}

fn resolve_config(explicit: Option<&Path>) -> Result<ReportConfig> {
    let start = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(load_config(explicit, &start)?)
}
