use super::principal::Actor;
use super::Requirement;

/// Policy evaluator trait for pluggable gating logic
pub trait PolicyEvaluator: Send + Sync {
    /// Check whether the actor may open a route or trigger an action with the given requirement
    fn can(&self, actor: Option<&Actor>, requirement: Requirement) -> bool;

    /// Check whether the actor may change an order's status
    fn can_change_order_status(&self, actor: Option<&Actor>) -> bool;
}

/// Default policy evaluator with the dashboard's gating rules
///
/// Evaluation order:
/// 1. no actor -> deny
/// 2. no requirement -> allow
/// 3. admin requirement -> admin flag
/// 4. moderator requirement -> admin or moderator flag
#[derive(Debug, Clone, Default)]
pub struct DefaultPolicyEvaluator;

impl DefaultPolicyEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl PolicyEvaluator for DefaultPolicyEvaluator {
    fn can(&self, actor: Option<&Actor>, requirement: Requirement) -> bool {
        let Some(actor) = actor else {
            tracing::debug!(requirement = %requirement, "no authenticated actor");
            return false;
        };

        let allowed = match requirement {
            Requirement::None => true,
            Requirement::Admin => actor.is_admin(),
            Requirement::Moderator => actor.is_admin() || actor.is_moderator(),
        };

        tracing::debug!(
            user_id = actor.user_id,
            requirement = %requirement,
            allowed,
            "access evaluated"
        );
        allowed
    }

    fn can_change_order_status(&self, actor: Option<&Actor>) -> bool {
        actor.map(|a| a.is_admin() || a.is_moderator() || a.is_staff()).unwrap_or(false)
    }
}

/// Shorthand for [`DefaultPolicyEvaluator::can`].
pub fn can_access(actor: Option<&Actor>, requirement: Requirement) -> bool {
    DefaultPolicyEvaluator.can(actor, requirement)
}

/// Shorthand for [`DefaultPolicyEvaluator::can_change_order_status`].
pub fn can_change_order_status(actor: Option<&Actor>) -> bool {
    DefaultPolicyEvaluator.can_change_order_status(actor)
}
