//! Order-triggered wallet and reward ledger.
//!
//! The reactive core behind a digital-menu ordering app: it listens to
//! order write events and keeps two independent ledgers consistent under
//! at-least-once event delivery —
//!
//! - the **owner wallet** (per-merchant revenue, credited once per order
//!   creation and reversed once on cancellation), and
//! - the **customer reward balance** (coins/rupees granted as pending at
//!   placement, confirmed or cleared when the order settles), with an
//!   append-only audit log.
//!
//! Embedding surfaces call [`reward::grant_on_placement`] synchronously
//! from the ordering flow and feed order write events to
//! [`dispatch::handle_order_write`] (directly or through
//! [`worker::LedgerWorker`]).

pub mod db;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod logger;
pub mod owner_wallet;
pub mod reward;
pub mod worker;

pub use db::DbService;
pub use dispatch::handle_order_write;
pub use error::{LedgerError, LedgerResult};
pub use events::{OrderTransition, OrderWriteEvent};
pub use owner_wallet::{WalletOutcome, reconcile_owner_wallet};
pub use reward::{RewardOutcome, RewardPolicy, cancel_reward, confirm_reward, grant_on_placement};
pub use worker::LedgerWorker;
