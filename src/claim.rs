// src/claim.rs
//! Claim orchestration: one submission per attempt, no retries, and batch
//! claims that always settle every attempt before folding an aggregate
//! outcome.

use crate::amount::{parse_amount, to_base_units, AmountError};
use crate::types::{Address, VestingRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClaimError {
    /// No connected beneficiary; checked before any submitter interaction.
    #[error("no signer available")]
    NoSignerAvailable,

    /// The record reports nothing claimable.
    #[error("nothing to claim for {0}")]
    NothingToClaim(Address),

    /// The wallet or network rejected the transaction before it was mined.
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    /// The transaction was mined but its receipt reports failure.
    #[error("claim transaction reverted")]
    ClaimFailed,

    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Error reported by an external submitter implementation.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct SubmitError(pub String);

/// Handle returned once a claim transaction is accepted by the network.
#[derive(Clone, Debug)]
pub struct SubmittedTx {
    pub transaction_hash: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

/// Mined-transaction receipt delivered by the submitter.
#[derive(Clone, Debug)]
pub struct Receipt {
    pub status: ReceiptStatus,
}

/// External transaction-submission collaborator. One `submit_claim` call per
/// attempt; confirmation is a separate suspension on `wait_for_receipt`.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn submit_claim(
        &self,
        contract: &Address,
        recipient: &Address,
        base_units: u128,
    ) -> Result<SubmittedTx, SubmitError>;

    async fn wait_for_receipt(&self, tx: &SubmittedTx) -> Result<Receipt, SubmitError>;
}

/// External wallet/session collaborator exposing the connected beneficiary.
pub trait WalletSession: Send + Sync {
    fn beneficiary(&self) -> Option<Address>;
}

/// Opaque key for a transient loading notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoticeToken(pub u64);

/// Transient user-feedback collaborator. Feedback only - the orchestrator
/// never branches on anything a sink does.
pub trait NotificationSink: Send + Sync {
    fn loading(&self, message: &str) -> NoticeToken;
    fn dismiss(&self, token: NoticeToken);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Attempt lifecycle; transitions are strictly Pending -> Submitted ->
/// {Confirmed, Failed}, with Pending -> Failed reserved for precondition
/// failures that never reached the submitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ClaimStatus {
    Pending,
    Submitted,
    Confirmed,
    Failed,
}

/// Ephemeral record of one claim action, owned by the orchestrator call that
/// created it and handed back once terminal.
#[derive(Clone, Debug)]
pub struct ClaimAttempt {
    /// The grant contract this attempt targets.
    pub record_id: Address,
    /// Human-unit amount requested, zero when the record's amount failed to parse.
    pub amount_requested: Decimal,
    pub status: ClaimStatus,
    pub transaction_hash: Option<String>,
    pub failure: Option<ClaimError>,
    pub created_at: DateTime<Utc>,
}

impl ClaimAttempt {
    fn new(record_id: Address) -> Self {
        Self {
            record_id,
            amount_requested: Decimal::ZERO,
            status: ClaimStatus::Pending,
            transaction_hash: None,
            failure: None,
            created_at: Utc::now(),
        }
    }

    fn mark_submitted(&mut self, tx: &SubmittedTx) {
        debug_assert_eq!(self.status, ClaimStatus::Pending);
        self.status = ClaimStatus::Submitted;
        self.transaction_hash = Some(tx.transaction_hash.clone());
    }

    fn mark_confirmed(&mut self) {
        debug_assert_eq!(self.status, ClaimStatus::Submitted);
        self.status = ClaimStatus::Confirmed;
    }

    fn mark_failed(&mut self, error: ClaimError) {
        debug_assert_ne!(self.status, ClaimStatus::Confirmed);
        self.status = ClaimStatus::Failed;
        self.failure = Some(error);
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, ClaimStatus::Confirmed | ClaimStatus::Failed)
    }
}

/// Terminal result of a claim-all batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BatchOutcome {
    AllSucceeded,
    PartialFailure,
    AllFailed,
}

/// All attempts of one batch, in input order, plus the folded outcome.
/// Built only after every attempt is terminal.
#[derive(Clone, Debug)]
pub struct AggregateClaimResult {
    pub attempts: Vec<ClaimAttempt>,
    pub outcome: BatchOutcome,
}

impl AggregateClaimResult {
    fn from_attempts(attempts: Vec<ClaimAttempt>) -> Self {
        debug_assert!(attempts.iter().all(ClaimAttempt::is_terminal));
        let confirmed = attempts
            .iter()
            .filter(|a| a.status == ClaimStatus::Confirmed)
            .count();
        let outcome = if confirmed == attempts.len() {
            BatchOutcome::AllSucceeded
        } else if confirmed == 0 {
            BatchOutcome::AllFailed
        } else {
            BatchOutcome::PartialFailure
        };
        Self { attempts, outcome }
    }
}

/// Executes claim actions against the external collaborators. Holds no state
/// between calls; every attempt lives and dies inside one invocation.
pub struct ClaimOrchestrator<S, W, N> {
    submitter: Arc<S>,
    session: Arc<W>,
    notifier: Arc<N>,
}

impl<S, W, N> ClaimOrchestrator<S, W, N>
where
    S: TransactionSubmitter,
    W: WalletSession,
    N: NotificationSink,
{
    pub fn new(submitter: Arc<S>, session: Arc<W>, notifier: Arc<N>) -> Self {
        Self {
            submitter,
            session,
            notifier,
        }
    }

    /// Claim the reported unclaimed amount of one grant, notifying the user
    /// of the outcome. Always returns a terminal attempt.
    pub async fn claim_one(&self, record: &VestingRecord) -> ClaimAttempt {
        let attempt = self.execute(record).await;
        match &attempt.failure {
            None => self
                .notifier
                .success(&format!("Successfully claimed {}", record.token_symbol)),
            Some(error) => {
                tracing::warn!(contract = %record.contract, %error, "claim failed");
                self.notifier
                    .error(&format!("Failed to claim {}", record.token_symbol));
            }
        }
        attempt
    }

    /// Claim across many grants concurrently. Each attempt is independent:
    /// a rejection never cancels or blocks siblings, and the aggregate is
    /// folded only after every attempt has settled.
    pub async fn claim_all(&self, records: &[VestingRecord]) -> AggregateClaimResult {
        let label = records
            .first()
            .map(|r| r.token_symbol.clone())
            .unwrap_or_default();
        let token = self.notifier.loading(&format!("Claiming all {label}..."));

        let attempts = join_all(records.iter().map(|record| self.execute(record))).await;

        let result = AggregateClaimResult::from_attempts(attempts);
        self.notifier.dismiss(token);
        match result.outcome {
            BatchOutcome::AllSucceeded => self.notifier.success("Confirmed transactions"),
            BatchOutcome::PartialFailure => {
                self.notifier.error(&format!("Failed to claim some {label}"))
            }
            BatchOutcome::AllFailed => self.notifier.error(&format!("Failed to claim all {label}")),
        }
        tracing::info!(
            attempts = result.attempts.len(),
            outcome = ?result.outcome,
            "claim batch settled"
        );
        result
    }

    /// Run a single attempt through its lifecycle without user notification.
    async fn execute(&self, record: &VestingRecord) -> ClaimAttempt {
        let mut attempt = ClaimAttempt::new(record.contract.clone());

        // Signer check comes before everything else: without a beneficiary
        // there must be zero submitter interaction.
        let Some(beneficiary) = self.session.beneficiary() else {
            attempt.mark_failed(ClaimError::NoSignerAvailable);
            return attempt;
        };

        let claimable = match parse_amount(&record.unclaimed) {
            Ok(amount) => amount,
            Err(error) => {
                attempt.mark_failed(error.into());
                return attempt;
            }
        };
        attempt.amount_requested = claimable;
        if claimable <= Decimal::ZERO {
            attempt.mark_failed(ClaimError::NothingToClaim(record.contract.clone()));
            return attempt;
        }

        let base_units = match to_base_units(claimable, record.token_decimals) {
            Ok(units) => units,
            Err(error) => {
                attempt.mark_failed(error.into());
                return attempt;
            }
        };

        let tx = match self
            .submitter
            .submit_claim(&record.contract, &beneficiary, base_units)
            .await
        {
            Ok(tx) => tx,
            Err(error) => {
                attempt.mark_failed(ClaimError::SubmissionRejected(error.to_string()));
                return attempt;
            }
        };
        attempt.mark_submitted(&tx);
        tracing::debug!(
            contract = %record.contract,
            tx_hash = %tx.transaction_hash,
            base_units,
            "claim submitted"
        );

        match self.submitter.wait_for_receipt(&tx).await {
            Ok(receipt) if receipt.status == ReceiptStatus::Success => attempt.mark_confirmed(),
            Ok(_) => attempt.mark_failed(ClaimError::ClaimFailed),
            Err(error) => attempt.mark_failed(ClaimError::SubmissionRejected(error.to_string())),
        }
        attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_outcomes() {
        let confirmed = || {
            let mut a = ClaimAttempt::new("0xa".into());
            a.mark_submitted(&SubmittedTx {
                transaction_hash: "0xhash".into(),
            });
            a.mark_confirmed();
            a
        };
        let failed = || {
            let mut a = ClaimAttempt::new("0xb".into());
            a.mark_failed(ClaimError::ClaimFailed);
            a
        };

        let all_ok = AggregateClaimResult::from_attempts(vec![confirmed(), confirmed()]);
        assert_eq!(all_ok.outcome, BatchOutcome::AllSucceeded);

        let partial = AggregateClaimResult::from_attempts(vec![confirmed(), failed()]);
        assert_eq!(partial.outcome, BatchOutcome::PartialFailure);

        let none = AggregateClaimResult::from_attempts(vec![failed()]);
        assert_eq!(none.outcome, BatchOutcome::AllFailed);

        // Nothing to do is not a failure.
        let empty = AggregateClaimResult::from_attempts(Vec::new());
        assert_eq!(empty.outcome, BatchOutcome::AllSucceeded);
    }

    #[test]
    fn test_attempt_lifecycle_ordering() {
        let mut attempt = ClaimAttempt::new("0xa".into());
        assert_eq!(attempt.status, ClaimStatus::Pending);
        assert!(!attempt.is_terminal());

        attempt.mark_submitted(&SubmittedTx {
            transaction_hash: "0xhash".into(),
        });
        assert_eq!(attempt.status, ClaimStatus::Submitted);
        assert_eq!(attempt.transaction_hash.as_deref(), Some("0xhash"));

        attempt.mark_confirmed();
        assert!(attempt.is_terminal());
        assert!(attempt.failure.is_none());
    }
}
