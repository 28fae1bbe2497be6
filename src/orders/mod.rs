//! Order lifecycle: status state machine, action panel and transitions.

pub mod actions;
pub mod service;
pub mod states;

pub use actions::{available_actions, StatusAction};
pub use service::{OrderStatusService, Refusal, TransitionOutcome};
pub use states::{
    is_cancelable, is_finishable, is_restorable, is_terminal, next_status, previous_status, show_back_action,
};
