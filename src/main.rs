//! Postview - live preview for blog authoring.
//!
//! # Usage
//!
//! ```bash
//! postview https://blog.example/@me/~new --content post.md --title title.txt
//! postview https://blog.example/@me/~style --page style --style blog.css --mode request
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use postview::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags, ConfigFlags,
};
use postview::field::FileFields;
use postview::page::{PageKind, SyncMode};
use postview::report::StderrReporter;
use postview::strategy::SyncStrategy;
use postview::sync::Synchronizer;
use postview::target::{LogTarget, PreviewPair, TerminalTarget};
use postview::transport::{HttpTransport, DEFAULT_TIMEOUT};
use postview::watcher::FieldWatcher;

/// Keep a blog preview in sync with the files you are editing
#[derive(Parser, Debug)]
#[command(name = "postview", version, about, long_about = None)]
struct Cli {
    /// Editor page URL (e.g. https://blog.example/@me/~new)
    #[arg(value_name = "PAGE_URL")]
    page_url: String,

    /// Which editor page is being previewed
    #[arg(long, value_enum)]
    page: Option<PageKind>,

    /// How previews are resolved
    #[arg(long, value_enum)]
    mode: Option<SyncMode>,

    /// File holding the post body
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// File holding the post title
    #[arg(long, value_name = "FILE")]
    title: Option<PathBuf>,

    /// File holding the blog stylesheet
    #[arg(long, value_name = "FILE")]
    style: Option<PathBuf>,

    /// Quiet period after the last edit before previewing
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Request timeout for request mode
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Ask the endpoint for a minimal render
    #[arg(long)]
    minimal: bool,

    /// Log sync activity
    #[arg(short, long)]
    verbose: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn field_files(&self, page: PageKind) -> Result<FileFields> {
        let mut fields = FileFields::new();
        for name in page.fields() {
            let path = match *name {
                "content" => self.content.as_ref(),
                "title" => self.title.as_ref(),
                "style" => self.style.as_ref(),
                _ => None,
            }
            .with_context(|| format!("--{name} FILE is required for the {} page", page.as_str()))?;
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            fields = fields.with_field(*name, path);
        }
        Ok(fields)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn build_strategy(page: PageKind, mode: SyncMode, page_url: &str, flags: &ConfigFlags) -> SyncStrategy {
    match mode {
        SyncMode::Url => page.url_strategy(page_url),
        SyncMode::Request => {
            let timeout = flags
                .timeout_ms
                .map_or(DEFAULT_TIMEOUT, Duration::from_millis);
            page.request_strategy(
                page_url,
                Arc::new(HttpTransport::new(timeout)),
                flags.minimal,
            )
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.verbose);

    let page = effective.page.unwrap_or_default();
    let mode = effective.mode.unwrap_or_default();
    let interval = effective
        .debounce_ms
        .map_or_else(|| mode.default_interval(), Duration::from_millis);

    let fields = cli.field_files(page)?;
    let mut watcher =
        FieldWatcher::new(fields.paths()).context("Failed to watch field files")?;

    let targets: Vec<PreviewPair> = page
        .surfaces()
        .iter()
        .map(|label| {
            PreviewPair::new(
                Arc::new(LogTarget::new(*label)),
                Arc::new(TerminalTarget::new(*label, &cli.page_url)),
            )
        })
        .collect();

    let sync = Synchronizer::new(
        Arc::new(fields),
        page.fields().iter().copied(),
        build_strategy(page, mode, &cli.page_url, &effective),
        targets,
    )
    .with_interval(interval)
    .with_reporter(Arc::new(StderrReporter))
    .bind();

    tracing::info!(page = page.as_str(), mode = mode.as_str(), "watching for edits");

    loop {
        tokio::select! {
            changed = watcher.changed() => {
                let Some(path) = changed else { break };
                tracing::debug!(path = %path.display(), "field changed");
                sync.on_field_changed();
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    let stats = sync.stats();
    tracing::info!(
        started = stats.started,
        applied = stats.applied,
        superseded = stats.superseded,
        failed = stats.failed,
        "stopped"
    );
    Ok(())
}
