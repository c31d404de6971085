//! Order Model
//!
//! One row per customer purchase. The ledger core never overwrites
//! customer-supplied fields; it only advances `status`-adjacent marker
//! fields (`already_added`, `cancel_processed`, `reward_*`).

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Monotonic: `pending → confirmed | cancelled`, `confirmed → cancelled`.
/// Never reverts to `pending`; `cancelled` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Dine-in vs delivery bucket for owner wallet splits.
///
/// Orders carry the raw string the storefront wrote; it is parsed once at
/// the reconciler boundary and anything unrecognized yields no wallet effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Inside,
    Outside,
}

impl OrderType {
    /// Parse the raw `order_type` field (trim + lowercase, unknown → None)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "inside" => Some(OrderType::Inside),
            "outside" => Some(OrderType::Outside),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Inside => "inside",
            OrderType::Outside => "outside",
        }
    }
}

/// Reward lifecycle on an order
///
/// `pending → confirmed` or `pending → cancelled`, both terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum RewardStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Reward granted at order placement (embedded view of the order row)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Reward {
    pub coins: i64,
    pub rupees: f64,
    pub status: RewardStatus,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub owner_id: String,
    pub user_id: String,
    /// Raw storefront value; see [`OrderType::parse`]
    pub order_type: String,
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub total: f64,
    pub status: OrderStatus,
    /// Single-use credit gate: set exactly once when the owner wallet is credited
    pub already_added: bool,
    /// Single-use debit gate: set exactly once when the credit is reversed
    pub cancel_processed: bool,
    pub reward_coins: Option<i64>,
    pub reward_rupees: Option<f64>,
    pub reward_status: Option<RewardStatus>,
    pub first_order_applied: bool,
    pub created_at: i64,
}

impl Order {
    /// Embedded reward view, if a reward has been granted
    pub fn reward(&self) -> Option<Reward> {
        match (self.reward_coins, self.reward_rupees, self.reward_status) {
            (Some(coins), Some(rupees), Some(status)) => Some(Reward {
                coins,
                rupees,
                status,
            }),
            _ => None,
        }
    }
}

/// Create order payload (written by the storefront ordering flow)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub id: String,
    pub owner_id: String,
    pub user_id: String,
    pub order_type: String,
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub total: f64,
}
