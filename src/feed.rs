//! Monitoring-API data shapes and the periodic item refresh.
//!
//! DESIGN
//! ======
//! The monitoring collaborator owns transport and auth; this module only
//! knows the JSON shapes it hands over and how a group becomes a
//! [`CardSpec`]. The refresh task polls an [`ItemSource`] on a fixed period
//! and forwards card batches over a channel. A batch only ever replaces
//! status items; card geometry is untouched.
//!
//! ERROR HANDLING
//! ==============
//! A failed fetch is logged and the cycle skipped; the next tick retries.
//! The task ends when the receiving side is dropped.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::card::CardSpec;
use crate::error::LayoutError;
use crate::hex::StatusCell;

/// Item key shown on the dashboard.
pub const PING_ITEM_KEY: &str = "icmpping";

/// A monitored host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    #[serde(default)]
    pub hostid: String,
    #[serde(default)]
    pub host: String,
    pub name: String,
}

/// One monitored item and the hosts it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupItem {
    pub itemid: String,
    #[serde(default)]
    pub key_: String,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub lastvalue: String,
}

impl GroupItem {
    /// Ping items report `"1"` while the host answers.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.lastvalue == "1"
    }
}

/// A host group, optionally with its fetched items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostGroup {
    pub groupid: String,
    pub name: String,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub items: Option<Vec<GroupItem>>,
}

/// A selected group as persisted: identity only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub groupid: String,
    pub name: String,
}

impl GroupRef {
    #[must_use]
    pub fn new(groupid: impl Into<String>, name: impl Into<String>) -> Self {
        Self { groupid: groupid.into(), name: name.into() }
    }
}

impl From<&HostGroup> for GroupRef {
    fn from(group: &HostGroup) -> Self {
        Self::new(group.groupid.clone(), group.name.clone())
    }
}

/// Build the card for `group`: one status cell per host of every ping item.
///
/// An item may cover several hosts, so cell ids are `itemid:hostid`.
#[must_use]
pub fn card_spec_from_group(group: &HostGroup) -> CardSpec {
    let items = group.items.as_deref().unwrap_or_default();
    let cells = items
        .iter()
        .filter(|item| item.key_ == PING_ITEM_KEY)
        .flat_map(|item| {
            item.hosts
                .iter()
                .map(move |host| StatusCell::new(cell_id(item, host), host.name.clone(), item.is_up()))
        })
        .collect();
    CardSpec {
        id: group.groupid.clone(),
        title: group.name.clone(),
        items: cells,
        item_count_hint: items.len(),
    }
}

fn cell_id(item: &GroupItem, host: &Host) -> String {
    format!("{}:{}", item.itemid, host.hostid)
}

/// Supplier of fresh group items.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch `groups` with their current items.
    async fn fetch(&self, groups: &[GroupRef]) -> Result<Vec<HostGroup>, LayoutError>;
}

/// An [`ItemSource`] over a fixed set of groups.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    groups: Vec<HostGroup>,
}

impl StaticSource {
    #[must_use]
    pub fn new(groups: Vec<HostGroup>) -> Self {
        Self { groups }
    }
}

#[async_trait]
impl ItemSource for StaticSource {
    async fn fetch(&self, groups: &[GroupRef]) -> Result<Vec<HostGroup>, LayoutError> {
        Ok(groups
            .iter()
            .filter_map(|wanted| self.groups.iter().find(|g| g.groupid == wanted.groupid))
            .cloned()
            .collect())
    }
}

/// Spawn the periodic refresh task. Returns a handle for shutdown.
///
/// The first batch is sent one full `period` after start; the initial load
/// is the caller's job.
pub fn spawn_refresh_task(
    source: Arc<dyn ItemSource>,
    groups: Vec<GroupRef>,
    period: Duration,
    tx: mpsc::Sender<Vec<CardSpec>>,
) -> JoinHandle<()> {
    info!(period_ms = period.as_millis(), groups = groups.len(), "item refresh configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match source.fetch(&groups).await {
                Ok(fetched) => {
                    let cards: Vec<CardSpec> = fetched.iter().map(card_spec_from_group).collect();
                    debug!(cards = cards.len(), "item refresh fetched");
                    if tx.send(cards).await.is_err() {
                        info!("item refresh receiver dropped; stopping");
                        break;
                    }
                }
                Err(e) => warn!(error = %e, "item refresh failed; retrying next tick"),
            }
        }
    })
}
