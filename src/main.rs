use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use slide_labeler::config_manager::Config;
use slide_labeler::gallery::Gallery;
use slide_labeler::identity::{IdentitySnapshot, ImageIdentity, ImageReference, SnapshotDetail};
use slide_labeler::labels::{LabelCandidateExtractor, LabelCandidateSet};
use slide_labeler::session::{AddOutcome, WorkingSet};

/// Command-line arguments for slide-labeler
#[derive(Parser, Debug)]
#[command(name = "slide-labeler")]
#[command(about = "Report label suggestions and duplicate images for a draft gallery")]
#[command(version)]
struct Args {
    /// Gallery JSON exported by the backend
    gallery: PathBuf,

    /// Local image files to add as uploads
    uploads: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ImageReport {
    #[serde(flatten)]
    identity: IdentitySnapshot,
    fingerprint: Option<String>,
    candidates: LabelCandidateSet,
}

#[derive(Debug, Serialize)]
struct Report {
    images: Vec<ImageReport>,
    duplicates: Vec<Duplicate>,
    id_conflicts: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Duplicate {
    id: String,
    existing_id: String,
}

fn load_config() -> Config {
    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.jsonld".to_string()),
        Some("conf.yaml".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    for path in &config_paths {
        match Config::load(path) {
            Ok(cfg) => {
                info!("Loaded configuration from: {}", path);
                return cfg;
            }
            Err(e) => {
                debug!("Failed to load config from {}: {}", path, e);
            }
        }
    }

    warn!("No configuration found (tried {:?}), using defaults", config_paths);
    Config::default()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slide_labeler=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = load_config();
    let extractor = LabelCandidateExtractor::new(config.label_config);

    let content = tokio::fs::read_to_string(&args.gallery)
        .await
        .with_context(|| format!("Failed to read gallery {}", args.gallery.display()))?;
    let gallery = Gallery::from_json(&content)?;
    info!(
        "Loaded gallery with {} images and {} labels",
        gallery.images.len(),
        gallery.labels.len()
    );

    let references = gallery
        .references(&config.system_config)
        .into_iter()
        .chain(args.uploads.iter().map(|path| ImageReference::upload_file(path.as_path())));

    let items = references
        .map(|reference| ImageIdentity::create(reference, None, None))
        .collect();

    let mut working_set = WorkingSet::new();
    let mut duplicates = Vec::new();
    let mut id_conflicts = Vec::new();
    for outcome in working_set.add_all(items).await {
        match outcome {
            AddOutcome::Added { .. } => {}
            AddOutcome::Duplicate { id, existing_id } => duplicates.push(Duplicate { id, existing_id }),
            AddOutcome::IdConflict { id } => id_conflicts.push(id),
        }
    }

    let images = working_set
        .iter()
        .map(|identity| ImageReport {
            identity: identity.snapshot(SnapshotDetail::Full),
            fingerprint: identity.fingerprint().map(|s| s.to_string()),
            candidates: extractor.extract(gallery.options_for_slide(identity.slide())),
        })
        .collect();

    let report = Report {
        images,
        duplicates,
        id_conflicts,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
