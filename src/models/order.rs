use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Order lifecycle status.
///
/// The Russian labels are both the display text and the API payload value, so
/// they must match the server byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Новый")]
    New,
    #[serde(rename = "В обработке")]
    Processing,
    #[serde(rename = "В доставке")]
    Shipping,
    #[serde(rename = "Выполнен")]
    Completed,
    #[serde(rename = "Отменен")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::New,
        OrderStatus::Processing,
        OrderStatus::Shipping,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "Новый",
            OrderStatus::Processing => "В обработке",
            OrderStatus::Shipping => "В доставке",
            OrderStatus::Completed => "Выполнен",
            OrderStatus::Cancelled => "Отменен",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| AppError::bad_request(format!("unknown order status: {s}")))
    }
}

/// Order as returned by `GET /orders/{id}`. Everything except `status` is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub public_order_id: String,
    pub client_id: i64,
    #[serde(default)]
    pub order_date: Option<String>,
    pub status: OrderStatus,
    pub total_amount: String,
    pub delivery_method: String,
    pub payment_method: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub office_id: Option<i64>,
    #[serde(default)]
    pub last_change: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderStatusUpdateRequest {
    pub status: OrderStatus,
}
