//! `hexboard [GROUPS_JSON] [--watch]`
//!
//! Lays out the given host groups (or the stored selection) and prints a
//! JSON summary per card. The stored selection holds group identities only,
//! so without a groups file every card is empty and `--watch` has nothing to
//! refresh from; pass the file to watch live item changes.


use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;

use hexboard::config::DashboardConfig;
use hexboard::consts::HEADER_HEIGHT_PX;
use hexboard::dashboard::Dashboard;
use hexboard::error::LayoutError;
use hexboard::feed::{GroupRef, HostGroup, ItemSource, StaticSource, card_spec_from_group, spawn_refresh_task};
use hexboard::store::{FileStore, load_selected_groups, save_selected_groups};

const WATCH_FLAG: &str = "--watch";

/// Command line: an optional groups file and the watch flag, in any order.
#[derive(Debug, PartialEq)]
struct Args {
    groups_path: Option<PathBuf>,
    watch: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut parsed = Self { groups_path: None, watch: false };
        for arg in args {
            if arg == WATCH_FLAG {
                parsed.watch = true;
            } else if parsed.groups_path.is_none() {
                parsed.groups_path = Some(PathBuf::from(arg));
            }
        }
        parsed
    }
}

/// Re-reads the groups file on every fetch.
struct FileSource {
    path: PathBuf,
}

#[async_trait]
impl ItemSource for FileSource {
    async fn fetch(&self, groups: &[GroupRef]) -> Result<Vec<HostGroup>, LayoutError> {
        let fetched = read_groups(&self.path).await?;
        StaticSource::new(fetched).fetch(groups).await
    }
}

async fn read_groups(path: &Path) -> Result<Vec<HostGroup>, LayoutError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardSummary {
    id: String,
    title: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    cell_width: f64,
    cell_height: f64,
    row_lengths: Vec<usize>,
    up: usize,
    down: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<&'static str>,
}

fn summarize(dashboard: &mut Dashboard<FileStore>) -> Result<Vec<CardSummary>, LayoutError> {
    let placed: Vec<(String, String)> =
        dashboard.cards().iter().map(|c| (c.spec.id.clone(), c.spec.title.clone())).collect();
    let mut out = Vec::with_capacity(placed.len());
    for (id, title) in placed {
        let Some(card) = dashboard.layout().get(&id).copied() else {
            continue;
        };
        let grid = dashboard.observe_grid_resize(&id, card.width, card.height - HEADER_HEIGHT_PX)?;
        let up = grid.rows.iter().flatten().filter(|c| c.is_up).count();
        out.push(CardSummary {
            id,
            title,
            x: card.x,
            y: card.y,
            width: card.width,
            height: card.height,
            cell_width: grid.cell_size.width,
            cell_height: grid.cell_size.height,
            row_lengths: grid.rows.iter().map(Vec::len).collect(),
            up,
            down: grid.cell_count() - up,
            placeholder: grid.placeholder(),
        });
    }
    Ok(out)
}

fn print_summary(dashboard: &mut Dashboard<FileStore>) -> Result<(), LayoutError> {
    let summary = summarize(dashboard)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), LayoutError> {
    tracing_subscriber::fmt::init();

    let config = DashboardConfig::from_env();
    let Args { groups_path, watch } = Args::parse(std::env::args().skip(1));

    let mut store = FileStore::open(config.store_path.clone());
    let groups = match &groups_path {
        Some(path) => {
            let groups = read_groups(path).await?;
            let refs: Vec<GroupRef> = groups.iter().map(GroupRef::from).collect();
            save_selected_groups(&mut store, &refs)?;
            groups
        }
        // identities only; items arrive from a groups file
        None => load_selected_groups(&store)
            .into_iter()
            .map(|r| HostGroup { groupid: r.groupid, name: r.name, hosts: Vec::new(), items: None })
            .collect(),
    };
    let refs: Vec<GroupRef> = groups.iter().map(GroupRef::from).collect();
    tracing::info!(groups = refs.len(), store = %config.store_path.display(), "hexboard starting");

    let mut dashboard = Dashboard::new(store, config.container_width, config.hover_scale);
    dashboard.restore(groups.iter().map(card_spec_from_group).collect());
    print_summary(&mut dashboard)?;

    if !watch {
        return Ok(());
    }

    let source: Arc<dyn ItemSource> = match groups_path {
        Some(path) => Arc::new(FileSource { path }),
        None => {
            tracing::warn!("watching the stored selection without a groups file; cards stay empty");
            Arc::new(StaticSource::new(groups))
        }
    };
    let (tx, mut rx) = mpsc::channel(4);
    let refresh = spawn_refresh_task(source, refs, config.refresh_period, tx);

    loop {
        tokio::select! {
            batch = rx.recv() => match batch {
                Some(batch) => {
                    dashboard.apply_refresh(batch);
                    print_summary(&mut dashboard)?;
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted; stopping refresh");
                break;
            }
        }
    }
    refresh.abort();
    Ok(())
}
