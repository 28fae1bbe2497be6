//! Remote API collaborators

mod http;

pub use http::HttpOrderApi;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{Order, OrderStatus};

/// Order-management API.
///
/// Failures carry the reason to show staff as [`crate::errors::AppError::Remote`].
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn get_order(&self, order_id: i64) -> AppResult<Order>;

    /// Persist a new status. The server is the final arbiter and may reject it.
    async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> AppResult<()>;
}
