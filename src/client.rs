// src/client.rs
//! Rendering-layer surface: fetch and filter grant records, derive display
//! cards, and trigger single or batch claims. The client holds no record
//! state of its own; only the latest batch result is retained for observers.

use crate::claim::{
    AggregateClaimResult, ClaimAttempt, ClaimOrchestrator, NotificationSink, TransactionSubmitter,
    WalletSession,
};
use crate::format::{format_date, format_grouped, format_plain};
use crate::schedule::{evaluate, ChartSeries, ScheduleError};
use crate::types::{Address, VestingRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Marker shown for any display field whose record data could not be
/// evaluated; siblings render normally.
pub const UNAVAILABLE: &str = "unavailable";

/// Error reported by an external record-source implementation.
#[derive(Error, Debug, Clone)]
#[error("record source error: {0}")]
pub struct SourceError(pub String);

/// External query collaborator delivering grant snapshots. At-least-
/// eventually-consistent; the client never assumes the latest block.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_vesting_records(&self) -> Result<Vec<VestingRecord>, SourceError>;
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Only grants vesting this token are shown and claimed.
    pub token_address: Address,
}

/// Display-ready strings for one grant card.
#[derive(Clone, Debug, PartialEq)]
pub struct VestingCard {
    pub contract: Address,
    pub token_symbol: String,
    /// Grouped, 2-decimal total amount.
    pub total_locked: String,
    /// Grouped, 2-decimal claimed amount.
    pub claimed: String,
    /// Plain 2-decimal withdrawable amount.
    pub withdrawable: String,
    /// Day/month/year end date.
    pub end_date: String,
    /// Cliff countdown, monthly rate or end marker.
    pub status: String,
}

pub struct VestingClient<R, S, W, N> {
    source: Arc<R>,
    orchestrator: ClaimOrchestrator<S, W, N>,
    config: ClientConfig,
    last_batch: Arc<RwLock<Option<AggregateClaimResult>>>,
}

impl<R, S, W, N> VestingClient<R, S, W, N>
where
    R: RecordSource,
    S: TransactionSubmitter,
    W: WalletSession,
    N: NotificationSink,
{
    pub fn new(
        config: ClientConfig,
        source: Arc<R>,
        submitter: Arc<S>,
        session: Arc<W>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            source,
            orchestrator: ClaimOrchestrator::new(submitter, session, notifier),
            config,
            last_batch: Arc::new(RwLock::new(None)),
        }
    }

    /// Fetch the current snapshots, keeping only grants that vest the
    /// configured token.
    pub async fn refresh(&self) -> Result<Vec<VestingRecord>, SourceError> {
        let records = self.source.fetch_vesting_records().await?;
        let total = records.len();
        let matching: Vec<VestingRecord> = records
            .into_iter()
            .filter(|r| r.token == self.config.token_address)
            .collect();
        tracing::debug!(total, matching = matching.len(), "records refreshed");
        Ok(matching)
    }

    /// Derive the display card for one record at `now`. Evaluation or parse
    /// failures degrade the affected fields of this card only.
    pub fn card(&self, record: &VestingRecord, now: u64) -> VestingCard {
        let status = match evaluate(record, now) {
            Ok(status) => status.status_text,
            Err(error) => {
                tracing::warn!(contract = %record.contract, %error, "schedule unavailable");
                UNAVAILABLE.to_string()
            }
        };
        VestingCard {
            contract: record.contract.clone(),
            token_symbol: record.token_symbol.clone(),
            total_locked: format_grouped(&record.total_locked)
                .unwrap_or_else(|_| UNAVAILABLE.to_string()),
            claimed: format_grouped(&record.total_claimed)
                .unwrap_or_else(|_| UNAVAILABLE.to_string()),
            withdrawable: format_plain(&record.unclaimed)
                .unwrap_or_else(|_| UNAVAILABLE.to_string()),
            end_date: format_date(record.end_time).unwrap_or_else(|| UNAVAILABLE.to_string()),
            status,
        }
    }

    /// Cards for a whole record set; one bad record never hides its siblings.
    pub fn cards(&self, records: &[VestingRecord], now: u64) -> Vec<VestingCard> {
        records.iter().map(|r| self.card(r, now)).collect()
    }

    /// Accrual curve for the external charting collaborator.
    pub fn chart(&self, record: &VestingRecord) -> Result<ChartSeries, ScheduleError> {
        ChartSeries::for_record(record)
    }

    /// Claim one grant's unclaimed amount.
    pub async fn claim(&self, record: &VestingRecord) -> ClaimAttempt {
        self.orchestrator.claim_one(record).await
    }

    /// Claim across all given grants; the settled aggregate is retained and
    /// returned.
    pub async fn claim_all(&self, records: &[VestingRecord]) -> AggregateClaimResult {
        let result = self.orchestrator.claim_all(records).await;
        *self.last_batch.write().await = Some(result.clone());
        result
    }

    /// Latest settled batch result, if any.
    pub async fn last_batch_result(&self) -> Option<AggregateClaimResult> {
        self.last_batch.read().await.clone()
    }
}
