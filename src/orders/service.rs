//! Status transitions against the remote order API.
//!
//! The local order is mutated only after the API confirms the change; a failed
//! request leaves it untouched and hands the reason back to the caller.

use crate::api::OrderApi;
use crate::authz::{Actor, DefaultPolicyEvaluator, PolicyEvaluator};
use crate::errors::AppResult;
use crate::models::{Order, OrderStatus};

use super::actions::StatusAction;

/// Why a transition was not attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// The actor carries none of the admin / moderator / staff flags
    Unauthorized,
    /// The action has no legal target from the order's current status
    Unavailable { action: StatusAction, status: OrderStatus },
}

/// Result of a transition attempt that did not fail remotely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied { from: OrderStatus, to: OrderStatus },
    Refused(Refusal),
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied { .. })
    }

    pub fn new_status(&self) -> Option<OrderStatus> {
        match self {
            TransitionOutcome::Applied { to, .. } => Some(*to),
            TransitionOutcome::Refused(_) => None,
        }
    }
}

pub struct OrderStatusService<A> {
    api: A,
    policy: DefaultPolicyEvaluator,
}

impl<A: OrderApi> OrderStatusService<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            policy: DefaultPolicyEvaluator::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run `action` on `order`.
    ///
    /// Refusals never reach the API. Remote failures return `Err` with the
    /// server's reason and leave `order.status` as it was.
    pub async fn apply(
        &self,
        actor: Option<&Actor>,
        order: &mut Order,
        action: StatusAction,
    ) -> AppResult<TransitionOutcome> {
        if !self.policy.can_change_order_status(actor) {
            return Ok(TransitionOutcome::Refused(Refusal::Unauthorized));
        }

        let from = order.status;
        let Some(to) = action.target(from) else {
            return Ok(TransitionOutcome::Refused(Refusal::Unavailable { action, status: from }));
        };

        self.api.update_order_status(order.order_id, to).await?;

        order.status = to;
        Ok(TransitionOutcome::Applied { from, to })
    }

    pub async fn next(&self, actor: Option<&Actor>, order: &mut Order) -> AppResult<TransitionOutcome> {
        self.apply(actor, order, StatusAction::Next).await
    }

    pub async fn finish(&self, actor: Option<&Actor>, order: &mut Order) -> AppResult<TransitionOutcome> {
        self.apply(actor, order, StatusAction::Finish).await
    }

    pub async fn back(&self, actor: Option<&Actor>, order: &mut Order) -> AppResult<TransitionOutcome> {
        self.apply(actor, order, StatusAction::Back).await
    }

    pub async fn cancel(&self, actor: Option<&Actor>, order: &mut Order) -> AppResult<TransitionOutcome> {
        self.apply(actor, order, StatusAction::Cancel).await
    }

    pub async fn restore(&self, actor: Option<&Actor>, order: &mut Order) -> AppResult<TransitionOutcome> {
        self.apply(actor, order, StatusAction::Restore).await
    }
}
