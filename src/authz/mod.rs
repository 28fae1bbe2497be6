//! Authorization module - staff role gating
//!
//! This module implements the dashboard's access rules:
//! - Capability flags on the actor (admin / moderator / staff)
//! - Route and action requirements (none / admin / moderator)
//! - The route table and sidebar filtering built on top of them

mod evaluator;
mod principal;
pub mod routes;

pub use evaluator::{can_access, can_change_order_status, DefaultPolicyEvaluator, PolicyEvaluator};
pub use principal::{Actor, RoleFlags};

use std::fmt;

use serde::Serialize;

/// Capability a route or action requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    /// Any authenticated staff member
    #[default]
    None,
    /// Admin flag
    Admin,
    /// Admin or moderator flag
    Moderator,
}

impl Requirement {
    pub const ALL: [Requirement; 3] = [Requirement::None, Requirement::Admin, Requirement::Moderator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::None => "none",
            Requirement::Admin => "admin",
            Requirement::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
