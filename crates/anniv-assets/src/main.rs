//! anniv - maintenance and preview tool for the anniversary page content.

use std::fs;
use std::path::PathBuf;

use anniv_assets::rename_thumbnails;
use anniv_layout::{
    assign_generators, scatter, LayoutReport, LayoutSettings, PhotoPlacement, PlacedNode,
    TimelineLayout,
};
use anniv_model::{ContentManifest, TimelineDimensions, TimelineNodeExpansion, TimelineNodePosition};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "anniv", version, about = "Anniversary page content tool")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rename the images of every content directory to thumbnail names
    Thumbnails {
        /// Asset root holding one directory per content entry
        #[arg(long, env = "ANNIV_ASSET_ROOT", default_value = "src/lib/assets/content-list")]
        root: PathBuf,

        /// Only report what would be renamed
        #[arg(long)]
        dry_run: bool,
    },

    /// Lay out a content manifest and print the result as JSON
    Layout {
        /// Content manifest (JSON)
        #[arg(long)]
        content: PathBuf,

        /// Layout settings (JSON); defaults when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value_t = 1280.0)]
        width: f64,

        #[arg(long, default_value_t = 720.0)]
        height: f64,
    },
}

#[derive(Serialize)]
struct ResolvedEvent {
    index: usize,
    id: Option<String>,
    position: Option<TimelineNodePosition>,
    expansion: Option<TimelineNodeExpansion>,
    branch_len_y: Option<f64>,
    branch_len_x: Option<f64>,
}

#[derive(Serialize)]
struct LayoutOutput {
    report: LayoutReport,
    events: Vec<ResolvedEvent>,
    nodes: Vec<PlacedNode>,
    gallery: Vec<PhotoPlacement>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "anniv=debug" } else { "anniv=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Command::Thumbnails { root, dry_run } => {
            let report = rename_thumbnails(&root, dry_run)
                .with_context(|| format!("renaming thumbnails under {}", root.display()))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Layout {
            content,
            config,
            width,
            height,
        } => {
            let output = layout(&content, config.as_deref(), width, height)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn layout(
    content: &std::path::Path,
    config: Option<&std::path::Path>,
    width: f64,
    height: f64,
) -> anyhow::Result<LayoutOutput> {
    let settings = match config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            LayoutSettings::from_json_str(&json)?
        }
        None => LayoutSettings::default(),
    };

    let json = fs::read_to_string(content)
        .with_context(|| format!("reading {}", content.display()))?;
    let mut page = ContentManifest::from_json_str(&json)?.into_content()?;

    let timeline = TimelineLayout::new(settings.timeline)?;
    let report = timeline.apply(&mut page.timeline)?;
    let nodes = timeline.place(&page.timeline, TimelineDimensions::new(width, height));

    assign_generators(&mut page.gallery, settings.gallery.seed);
    let gallery = scatter(&page.gallery, &settings.gallery)?;

    let events = page
        .timeline
        .iter()
        .enumerate()
        .filter_map(|(index, datum)| {
            let event = datum.as_event()?;
            Some(ResolvedEvent {
                index,
                id: event.id.clone(),
                position: event.position,
                expansion: event.expansion,
                branch_len_y: event.branch_len_y,
                branch_len_x: event.branch_len_x,
            })
        })
        .collect();

    Ok(LayoutOutput {
        report,
        events,
        nodes,
        gallery,
    })
}
