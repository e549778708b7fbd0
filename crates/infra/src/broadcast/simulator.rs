use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use mandi_core::CatalogId;
use mandi_events::{BuyerBid, NetworkLogEntry};

use super::buyers::{Buyer, BUYERS};
use super::BroadcastError;
use crate::catalog_store::CatalogStore;
use crate::log_store::LogStore;

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastConfig {
    /// Simulated network round-trip before a bid arrives.
    pub delay: Duration,
    /// Maximum relative deviation of a bid from the catalog price.
    pub variance: f64,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(3),
            variance: 0.10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationState {
    Pending,
    Resolved,
    Failed,
}

/// Terminal outcomes kept for `state` lookups; older ones are dropped.
pub const RECENT_OUTCOMES: usize = 256;

/// Per-id simulation tracking.
///
/// Only pending ids are needed for the exclusivity guard. Terminal outcomes of
/// existing catalogs are kept in a bounded queue; simulations of unknown ids
/// leave nothing behind.
#[derive(Debug, Default)]
struct Tracker {
    pending: HashSet<CatalogId>,
    recent: VecDeque<(CatalogId, SimulationState)>,
}

impl Tracker {
    fn state(&self, catalog_id: CatalogId) -> Option<SimulationState> {
        if self.pending.contains(&catalog_id) {
            return Some(SimulationState::Pending);
        }
        self.recent
            .iter()
            .rev()
            .find(|(id, _)| *id == catalog_id)
            .map(|(_, state)| *state)
    }

    fn record(&mut self, catalog_id: CatalogId, state: SimulationState) {
        self.recent.retain(|(id, _)| *id != catalog_id);
        if self.recent.len() == RECENT_OUTCOMES {
            self.recent.pop_front();
        }
        self.recent.push_back((catalog_id, state));
    }

    fn forget(&mut self, catalog_id: CatalogId) {
        self.recent.retain(|(id, _)| *id != catalog_id);
    }
}

struct Inner {
    catalogs: Arc<dyn CatalogStore>,
    logs: Arc<dyn LogStore>,
    config: BroadcastConfig,
    rng: Mutex<StdRng>,
    tracker: Mutex<Tracker>,
}

/// Produces synthetic buyer bids against stored catalogs.
///
/// Each simulation is one deferred tokio task. At most one simulation per
/// catalog id may be pending at a time.
#[derive(Clone)]
pub struct BroadcastSimulator {
    inner: Arc<Inner>,
}

/// Eventual result of one scheduled simulation.
#[derive(Debug)]
pub struct BroadcastHandle {
    catalog_id: CatalogId,
    task: JoinHandle<Result<BuyerBid, BroadcastError>>,
}

impl BroadcastHandle {
    pub fn catalog_id(&self) -> CatalogId {
        self.catalog_id
    }

    pub async fn wait(self) -> Result<BuyerBid, BroadcastError> {
        self.task.await.map_err(|e| BroadcastError::Aborted(e.to_string()))?
    }
}

impl BroadcastSimulator {
    pub fn new(catalogs: Arc<dyn CatalogStore>, logs: Arc<dyn LogStore>, config: BroadcastConfig) -> Self {
        Self::with_rng(catalogs, logs, config, StdRng::from_entropy())
    }

    /// Deterministic draws, for tests.
    pub fn seeded(catalogs: Arc<dyn CatalogStore>, logs: Arc<dyn LogStore>, config: BroadcastConfig, seed: u64) -> Self {
        Self::with_rng(catalogs, logs, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalogs: Arc<dyn CatalogStore>, logs: Arc<dyn LogStore>, config: BroadcastConfig, rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalogs,
                logs,
                config,
                rng: Mutex::new(rng),
                tracker: Mutex::new(Tracker::default()),
            }),
        }
    }

    pub fn config(&self) -> &BroadcastConfig {
        &self.inner.config
    }

    /// State of the most recent simulation for `catalog_id`, if still tracked.
    ///
    /// `None` for ids never simulated, for ids whose catalog did not exist, and
    /// for outcomes older than the last [`RECENT_OUTCOMES`].
    pub fn state(&self, catalog_id: CatalogId) -> Option<SimulationState> {
        self.inner.tracker.lock().ok()?.state(catalog_id)
    }

    /// Schedule a simulation; the bid is produced after the configured delay.
    ///
    /// Fails with `AlreadyPending` while an earlier simulation for the same id
    /// has not finished.
    pub fn simulate_broadcast(&self, catalog_id: CatalogId) -> Result<BroadcastHandle, BroadcastError> {
        {
            let mut tracker = self
                .inner
                .tracker
                .lock()
                .map_err(|_| BroadcastError::Persistence("simulation state lock poisoned".to_string()))?;

            if !tracker.pending.insert(catalog_id) {
                warn!(%catalog_id, "simulation already pending; rejecting");
                return Err(BroadcastError::AlreadyPending(catalog_id));
            }
        }

        let delay = self.inner.config.delay;
        info!(%catalog_id, delay_ms = delay.as_millis() as u64, "broadcast simulation scheduled");

        let inner = self.inner.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = inner.resolve(catalog_id);
            inner.finish(catalog_id, &result);
            result
        });

        Ok(BroadcastHandle { catalog_id, task })
    }

    /// Schedule a simulation and wait for its bid.
    pub async fn simulate(&self, catalog_id: CatalogId) -> Result<BuyerBid, BroadcastError> {
        self.simulate_broadcast(catalog_id)?.wait().await
    }
}

impl Inner {
    fn resolve(&self, catalog_id: CatalogId) -> Result<BuyerBid, BroadcastError> {
        let record = self
            .catalogs
            .get(catalog_id)?
            .ok_or(BroadcastError::NotFound(catalog_id))?;

        let (buyer, variance) = self.draw()?;
        let bid = BuyerBid {
            buyer_name: buyer.name.to_string(),
            bid_amount: round2(record.item.price().value * (1.0 + variance)),
            timestamp: Utc::now(),
            catalog_id,
        };

        self.logs.append(NetworkLogEntry::incoming_bid(buyer.id, &bid))?;
        Ok(bid)
    }

    fn draw(&self) -> Result<(Buyer, f64), BroadcastError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| BroadcastError::Persistence("rng lock poisoned".to_string()))?;

        let buyer = BUYERS[rng.gen_range(0..BUYERS.len())];
        let max = self.config.variance.abs();
        let variance = if max > 0.0 { rng.gen_range(-max..=max) } else { 0.0 };
        Ok((buyer, variance))
    }

    fn finish(&self, catalog_id: CatalogId, result: &Result<BuyerBid, BroadcastError>) {
        let state = match result {
            Ok(bid) => {
                info!(%catalog_id, buyer = %bid.buyer_name, bid_amount = bid.bid_amount, "broadcast simulation resolved");
                Some(SimulationState::Resolved)
            }
            Err(BroadcastError::NotFound(_)) => {
                warn!(%catalog_id, "broadcast simulation failed: catalog not found");
                None
            }
            Err(err) => {
                error!(%catalog_id, error = %err, "broadcast simulation failed");
                Some(SimulationState::Failed)
            }
        };

        let Ok(mut tracker) = self.tracker.lock() else {
            return;
        };
        tracker.pending.remove(&catalog_id);
        match state {
            Some(state) => tracker.record(catalog_id, state),
            None => tracker.forget(catalog_id),
        }
    }
}
