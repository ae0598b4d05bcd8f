use std::io::Write as _;
use std::path::PathBuf;

use clap::Parser as _;
use gitstories::{NodeLayout, Scene, SceneConfig, load_history};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::cli::{Cli, OutputFormat};

mod cli;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Scene(#[from] gitstories::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct LayoutDocument {
    width: u32,
    height: u32,
    commits: usize,
    frames: usize,
    nodes: Vec<NodeLayout>,
}

/// Installs the fmt subscriber. Returns `false` for `--log-level silent`.
fn setup_tracing(cli: &Cli) -> bool {
    let Some(level) = cli.log_level.to_tracing_level() else {
        return false;
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
    true
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(frames) = cli.frames_per_commit {
        config.frames_per_commit = frames;
    }

    let history = load_history(&cli.history)?;
    info!(commits = history.len(), "loaded history");

    let mut scene = Scene::new(config, history)?;
    let summary = scene.play(cli.settle_frames)?;
    info!(
        commits = summary.commits,
        frames = summary.frames,
        warnings = summary.warnings,
        nodes = scene.tree().len(),
        "finished"
    );

    let mut output = match cli.format {
        OutputFormat::Svg => scene.render_svg()?,
        OutputFormat::Json => serde_json::to_string_pretty(&LayoutDocument {
            width: scene.config().width,
            height: scene.config().height,
            commits: summary.commits,
            frames: summary.frames,
            nodes: scene.layout()?,
        })?,
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }

    match &cli.out {
        Some(path) => std::fs::write(path, output).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let logging = setup_tracing(&cli);
    debug!("Parsed CLI arguments: {cli:?}");

    if let Err(err) = run(&cli) {
        if logging {
            error!("{err}");
        } else {
            // Fatal errors are reported even when logging is silenced.
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }
}
