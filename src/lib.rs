// src/lib.rs
// Vesting Wallet - client-side schedule evaluation and claim orchestration
// for on-chain vesting grants.
//
// The crate owns no rendering, no wallet session and no network protocol:
// records arrive through a `RecordSource`, transactions leave through a
// `TransactionSubmitter`, and user feedback goes through a `NotificationSink`.
// Everything in between - schedule phases, status text, chart series, amount
// scaling, display formatting and batch claim aggregation - is computed here.

pub mod amount;
pub mod claim;
pub mod client;
pub mod duration;
pub mod format;
pub mod logging;
pub mod schedule;
pub mod types;

// Re-exports for easy access
pub use amount::{parse_amount, round_display, to_base_units, AmountError};
pub use claim::{
    AggregateClaimResult, BatchOutcome, ClaimAttempt, ClaimError, ClaimOrchestrator, ClaimStatus,
    NotificationSink, NoticeToken, Receipt, ReceiptStatus, SubmitError, SubmittedTx,
    TransactionSubmitter, WalletSession,
};
pub use client::{ClientConfig, RecordSource, SourceError, VestingCard, VestingClient};
pub use duration::{DurationUnit, SECONDS_PER_DAY, SECONDS_PER_MONTH};
pub use format::{format_date, format_days, format_grouped, format_plain};
pub use schedule::{evaluate, ChartPoint, ChartSeries, Phase, ScheduleError, ScheduleStatus};
pub use types::{Address, VestingRecord};
