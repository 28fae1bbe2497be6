pub mod api;
pub mod authz;
pub mod config;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod orders;

// Re-export commonly used items for tests
pub use api::{HttpOrderApi, OrderApi};
pub use authz::{can_access, Actor, Requirement, RoleFlags};
pub use models::{Order, OrderStatus};
pub use orders::{OrderStatusService, StatusAction, TransitionOutcome};
