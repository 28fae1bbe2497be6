use serde::{Deserialize, Serialize};

/// Capability flags attached to a staff member.
///
/// The flags are independent: an account may carry any combination, and the
/// server stores them as-is rather than deriving one from another. Flags missing
/// from the payload deserialize as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleFlags {
    pub admin: bool,
    pub moderator: bool,
    pub staff: bool,
}

impl RoleFlags {
    pub fn new(admin: bool, moderator: bool, staff: bool) -> Self {
        Self {
            admin,
            moderator,
            staff,
        }
    }

    pub fn admin() -> Self {
        Self::new(true, false, false)
    }

    pub fn moderator() -> Self {
        Self::new(false, true, false)
    }

    pub fn staff() -> Self {
        Self::new(false, false, true)
    }
}

/// Actor represents the authenticated staff member performing an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: i64,
    #[serde(default)]
    pub role: RoleFlags,
    /// Home office, used by the office selector to scope listings.
    #[serde(default)]
    pub office_id: Option<i64>,
}

impl Actor {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            role: RoleFlags::default(),
            office_id: None,
        }
    }

    pub fn with_role(mut self, role: RoleFlags) -> Self {
        self.role = role;
        self
    }

    pub fn with_office(mut self, office_id: i64) -> Self {
        self.office_id = Some(office_id);
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role.admin
    }

    pub fn is_moderator(&self) -> bool {
        self.role.moderator
    }

    pub fn is_staff(&self) -> bool {
        self.role.staff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flags_deserialize_as_false() {
        let role: RoleFlags = serde_json::from_str(r#"{"admin": true}"#).unwrap();
        assert_eq!(role, RoleFlags::new(true, false, false));

        let actor: Actor = serde_json::from_str(r#"{"user_id": 7}"#).unwrap();
        assert_eq!(actor.role, RoleFlags::default());
        assert_eq!(actor.office_id, None);
    }

    #[test]
    fn flags_are_independent() {
        let actor = Actor::new(1)
            .with_role(RoleFlags::new(true, true, true))
            .with_office(3);
        assert!(actor.is_admin());
        assert!(actor.is_moderator());
        assert!(actor.is_staff());
        assert_eq!(actor.office_id, Some(3));
    }
}
