pub mod order;
pub mod user;

pub use order::{Order, OrderStatus, OrderStatusUpdateRequest};
pub use user::{LoginRequest, LoginResponse};
