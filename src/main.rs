use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use flowgram::config::{Config, ConfigError};
use flowgram::doc::GraphStore;
use flowgram::engine::{Action, Engine};
use flowgram::ids::IdGen;
use flowgram::layout::{self, LayoutPolicy};
use flowgram::ops::OpError;
use flowgram::parse::{self, ParseError};
use flowgram::samples::Sample;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid diagram: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid diagram: {0}")]
    Model(#[from] OpError),
    #[error("unknown sample `{0}` (expected 'auth' or 'request')")]
    UnknownSample(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "flowgram", about = "Parse, lay out, and inspect JSON flow diagrams")]
struct Cli {
    /// Layout policy: `grid` overwrites coordinates, `preserve` keeps explicit ones.
    #[arg(long, value_parser = parse_layout)]
    layout: Option<LayoutPolicy>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the renderer scene for a diagram file (`-` reads stdin).
    Render {
        path: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Parse a diagram and report dangling endpoints and unknown handles.
    Check { path: PathBuf },
    /// Print a built-in sample diagram.
    Sample {
        #[arg(default_value = "auth")]
        name: String,
    },
}

fn parse_layout(raw: &str) -> Result<LayoutPolicy, String> {
    LayoutPolicy::from_name(raw).ok_or_else(|| format!("unknown layout `{raw}` (expected 'grid' or 'preserve')"))
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(policy) = cli.layout {
        config.layout.policy = policy;
    }

    match cli.command {
        Command::Render { path, pretty } => run_render(&config, &path, pretty),
        Command::Check { path } => run_check(&config, &path),
        Command::Sample { name } => run_sample(&name),
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let display = path.display().to_string();
    if display == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read { path: display, source })?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|source| CliError::Read { path: display, source })
}

fn run_render(config: &Config, path: &Path, pretty: bool) -> Result<(), CliError> {
    let text = read_input(path)?;
    let mut engine = Engine::new(config);
    for action in engine.set_text(text) {
        if let Action::ParseFailed(e) = action {
            return Err(CliError::Parse(e));
        }
    }
    let scene = engine.scene();
    let out = if pretty { serde_json::to_string_pretty(&scene)? } else { serde_json::to_string(&scene)? };
    println!("{out}");
    Ok(())
}

fn run_check(config: &Config, path: &Path) -> Result<(), CliError> {
    let text = read_input(path)?;
    let mut diagram = parse::parse_with(&text, &mut IdGen::from_clock())?;
    layout::assign(&mut diagram, &config.layout);
    let (nodes, edges) = (diagram.nodes.len(), diagram.edges.len());

    let mut store = GraphStore::new();
    store.replace(diagram)?;
    let anomalies = store.current().anomalies();

    println!("ok: {nodes} nodes, {edges} edges");
    for anomaly in &anomalies {
        println!("warning: {anomaly}");
    }
    tracing::info!(nodes, edges, anomalies = anomalies.len(), "diagram checked");
    Ok(())
}

fn run_sample(name: &str) -> Result<(), CliError> {
    let sample = Sample::from_name(name).ok_or_else(|| CliError::UnknownSample(name.to_owned()))?;
    println!("{}", sample.text());
    Ok(())
}
