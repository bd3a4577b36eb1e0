use std::fs;
use std::path::PathBuf;

use catalog::{Catalog, Category, ContentId};
use clap::Parser;
use explorer::{ExplorerConfig, Script, Session, SessionSnapshot};
use foundation::time::Time;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay recorded input against a content catalog")]
struct Args {
    /// Catalog JSON: an array of { id, x, y, z?, category, title? }
    #[arg(long)]
    catalog: PathBuf,

    /// Script JSON: an array of { at_ms, input }
    #[arg(long)]
    script: PathBuf,

    /// Explorer config JSON (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the config's sampling seed
    #[arg(long)]
    seed: Option<u64>,

    /// Also print the final painter-ordered render pass
    #[arg(long, default_value_t = false)]
    render: bool,
}

#[derive(Serialize)]
struct RenderRecord<'a> {
    id: &'a ContentId,
    category: Category,
    title: &'a str,
    x: f64,
    y: f64,
    scale: f64,
    depth: f64,
}

#[derive(Serialize)]
struct Report<'a> {
    state: SessionSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    render: Option<Vec<RenderRecord<'a>>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExplorerConfig::load(path).map_err(|e| e.to_string())?,
        None => ExplorerConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let catalog_json = fs::read_to_string(&args.catalog)
        .map_err(|e| format!("{}: {e}", args.catalog.display()))?;
    let catalog = Catalog::from_json_str(&catalog_json).map_err(|e| e.to_string())?;
    let script = Script::load(&args.script).map_err(|e| e.to_string())?;
    info!(points = catalog.len(), steps = script.len(), "replaying");

    let end = script
        .steps()
        .last()
        .map(|s| s.time())
        .unwrap_or_default();

    let mut session = Session::new(catalog, &config);
    let selected = session.replay(&script);
    info!(selected = selected.len(), "replay finished");

    let state = session.snapshot();
    let render = if args.render {
        Some(render_records(&mut session, end))
    } else {
        None
    };

    let out = serde_json::to_string_pretty(&Report { state, render })
        .map_err(|e| e.to_string())?;
    println!("{out}");
    Ok(())
}

fn render_records(session: &mut Session, now: Time) -> Vec<RenderRecord<'_>> {
    session
        .render(now)
        .into_iter()
        .map(|r| RenderRecord {
            id: &r.point.id,
            category: r.point.category,
            title: &r.point.title,
            x: r.projected.screen.x,
            y: r.projected.screen.y,
            scale: r.projected.scale,
            depth: r.projected.depth,
        })
        .collect()
}
