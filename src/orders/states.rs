//! Order status state machine
//!
//! Forward progression: Новый → В обработке → В доставке → Выполнен.
//! Отменен sits outside the line: reachable from every non-completed status and
//! left only through a restore back to Новый.

use crate::models::OrderStatus;

/// Forward edge. The В доставке → Выполнен edge is the "finish" action.
pub fn next_status(current: OrderStatus) -> Option<OrderStatus> {
    match current {
        OrderStatus::New => Some(OrderStatus::Processing),
        OrderStatus::Processing => Some(OrderStatus::Shipping),
        OrderStatus::Shipping => Some(OrderStatus::Completed),
        OrderStatus::Completed | OrderStatus::Cancelled => None,
    }
}

/// Backward edge used by the "back" action.
pub fn previous_status(current: OrderStatus) -> Option<OrderStatus> {
    match current {
        OrderStatus::Processing => Some(OrderStatus::New),
        OrderStatus::Shipping => Some(OrderStatus::Processing),
        OrderStatus::Completed => Some(OrderStatus::Shipping),
        OrderStatus::New | OrderStatus::Cancelled => None,
    }
}

pub fn is_cancelable(current: OrderStatus) -> bool {
    !matches!(current, OrderStatus::Completed | OrderStatus::Cancelled)
}

/// Restoring always lands on Новый; the status before cancellation is not tracked.
pub fn is_restorable(current: OrderStatus) -> bool {
    current == OrderStatus::Cancelled
}

pub fn is_finishable(current: OrderStatus) -> bool {
    current == OrderStatus::Shipping
}

pub fn show_back_action(current: OrderStatus) -> bool {
    // previous_status(Cancelled) is already None; the explicit check stays.
    previous_status(current).is_some() && current != OrderStatus::Cancelled
}

pub fn is_terminal(current: OrderStatus) -> bool {
    current == OrderStatus::Completed
}
