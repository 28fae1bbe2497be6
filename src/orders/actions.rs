use std::fmt;

use serde::Serialize;

use crate::authz::{Actor, DefaultPolicyEvaluator, PolicyEvaluator};
use crate::models::OrderStatus;

use super::states::{is_cancelable, is_finishable, is_restorable, next_status, previous_status, show_back_action};

/// Status-changing action offered on the order details page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    Back,
    Next,
    Finish,
    Restore,
    Cancel,
}

impl StatusAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAction::Back => "back",
            StatusAction::Next => "next",
            StatusAction::Finish => "finish",
            StatusAction::Restore => "restore",
            StatusAction::Cancel => "cancel",
        }
    }

    /// Button caption
    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::Back => "Назад",
            StatusAction::Next => "Далее",
            StatusAction::Finish => "Завершить",
            StatusAction::Restore => "Восстановить",
            StatusAction::Cancel => "Отменить",
        }
    }

    /// Status this action moves an order in `current` to, if the move is legal.
    pub fn target(&self, current: OrderStatus) -> Option<OrderStatus> {
        match self {
            StatusAction::Back => show_back_action(current).then(|| previous_status(current)).flatten(),
            StatusAction::Next => next_status(current),
            StatusAction::Finish => is_finishable(current).then(|| next_status(current)).flatten(),
            StatusAction::Restore => is_restorable(current).then_some(OrderStatus::New),
            StatusAction::Cancel => is_cancelable(current).then_some(OrderStatus::Cancelled),
        }
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions the actor can trigger for an order in `current`, in display order.
///
/// Returns nothing for actors that fail the status-change gate.
pub fn available_actions(actor: Option<&Actor>, current: OrderStatus) -> Vec<StatusAction> {
    if !DefaultPolicyEvaluator.can_change_order_status(actor) {
        return Vec::new();
    }

    let mut actions = Vec::new();
    if show_back_action(current) {
        actions.push(StatusAction::Back);
    }
    if is_finishable(current) {
        actions.push(StatusAction::Finish);
    } else if next_status(current).is_some() {
        actions.push(StatusAction::Next);
    }
    if is_restorable(current) {
        actions.push(StatusAction::Restore);
    }
    if is_cancelable(current) {
        actions.push(StatusAction::Cancel);
    }
    actions
}
