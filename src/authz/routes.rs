//! Dashboard route table, route guard and sidebar filtering.

use serde::Serialize;

use super::{can_access, Actor, Requirement};

/// A guarded dashboard route. `:name` segments match any non-empty segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub pattern: &'static str,
    pub requirement: Requirement,
}

const fn route(pattern: &'static str, requirement: Requirement) -> Route {
    Route { pattern, requirement }
}

pub const ROUTES: &[Route] = &[
    route("/", Requirement::None),
    route("/profile", Requirement::None),
    route("/employees", Requirement::Admin),
    route("/products", Requirement::None),
    route("/products/:id", Requirement::None),
    route("/products/prices", Requirement::None),
    route("/products/warehouses", Requirement::None),
    route("/products/sync", Requirement::Moderator),
    route("/products/images", Requirement::Moderator),
    route("/orders", Requirement::None),
    route("/orders/:orderId", Requirement::None),
    route("/client", Requirement::None),
    route("/client/:clientId/orders", Requirement::None),
];

/// Outcome of running the route guard for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    Deny,
    NotFound,
}

impl GuardDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardDecision::Allow => "allow",
            GuardDecision::RedirectToLogin => "redirect_to_login",
            GuardDecision::Deny => "deny",
            GuardDecision::NotFound => "not_found",
        }
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Number of literal segments matched, or None when the pattern does not match.
fn match_score(pattern: &str, path: &[&str]) -> Option<usize> {
    let pattern = segments(pattern);
    if pattern.len() != path.len() {
        return None;
    }

    let mut literals = 0;
    for (expected, actual) in pattern.iter().zip(path) {
        if expected.starts_with(':') {
            continue;
        }
        if expected != actual {
            return None;
        }
        literals += 1;
    }
    Some(literals)
}

/// Find the route serving `path`. Literal segments win over parameters.
pub fn resolve(path: &str) -> Option<&'static Route> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let parts = segments(path);

    ROUTES
        .iter()
        .filter_map(|r| match_score(r.pattern, &parts).map(|score| (score, r)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, r)| r)
}

/// Decide what happens when `actor` navigates to `path`
pub fn guard(actor: Option<&Actor>, path: &str) -> GuardDecision {
    if actor.is_none() {
        return GuardDecision::RedirectToLogin;
    }

    match resolve(path) {
        None => GuardDecision::NotFound,
        Some(route) if can_access(actor, route.requirement) => GuardDecision::Allow,
        Some(_) => GuardDecision::Deny,
    }
}

/// Sidebar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub path: &'static str,
    pub requirement: Requirement,
}

/// Top-level sidebar section with optional sub-entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub title: &'static str,
    pub path: &'static str,
    pub requirement: Requirement,
    pub items: Vec<NavItem>,
}

fn item(title: &'static str, path: &'static str, requirement: Requirement) -> NavItem {
    NavItem {
        title,
        path,
        requirement,
    }
}

fn navigation() -> Vec<NavSection> {
    vec![
        NavSection {
            title: "Панель управления",
            path: "/",
            requirement: Requirement::None,
            items: vec![],
        },
        NavSection {
            title: "Сотрудники",
            path: "/employees",
            requirement: Requirement::Admin,
            items: vec![],
        },
        NavSection {
            title: "Товары",
            path: "/products",
            requirement: Requirement::None,
            items: vec![
                item("Список товаров", "/products", Requirement::None),
                item("Цены", "/products/prices", Requirement::None),
                item("Склады", "/products/warehouses", Requirement::None),
                item("Синхронизация", "/products/sync", Requirement::Moderator),
                item("Изображения", "/products/images", Requirement::Moderator),
            ],
        },
        NavSection {
            title: "Заказы",
            path: "/orders",
            requirement: Requirement::None,
            items: vec![],
        },
    ]
}

/// Sidebar sections and entries the actor may see
pub fn visible_sections(actor: Option<&Actor>) -> Vec<NavSection> {
    navigation()
        .into_iter()
        .filter(|section| can_access(actor, section.requirement))
        .map(|mut section| {
            section.items.retain(|entry| can_access(actor, entry.requirement));
            section
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::RoleFlags;

    fn actor(role: RoleFlags) -> Actor {
        Actor::new(10).with_role(role).with_office(1)
    }

    #[test]
    fn test_literal_segment_beats_parameter() {
        assert_eq!(resolve("/products/sync").map(|r| r.pattern), Some("/products/sync"));
        assert_eq!(resolve("/products/42").map(|r| r.pattern), Some("/products/:id"));
        assert_eq!(
            resolve("/client/5/orders").map(|r| r.pattern),
            Some("/client/:clientId/orders")
        );
    }

    #[test]
    fn test_resolve_ignores_query_and_trailing_slash() {
        assert_eq!(resolve("/orders/?offset=20").map(|r| r.pattern), Some("/orders"));
        assert_eq!(resolve("/").map(|r| r.pattern), Some("/"));
        assert!(resolve("/nowhere").is_none());
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        assert_eq!(guard(None, "/orders"), GuardDecision::RedirectToLogin);
        assert_eq!(guard(None, "/nowhere"), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn test_admin_reaches_moderator_routes() {
        let admin = actor(RoleFlags::admin());
        assert_eq!(guard(Some(&admin), "/products/sync"), GuardDecision::Allow);
        assert_eq!(guard(Some(&admin), "/products/images"), GuardDecision::Allow);
        assert_eq!(guard(Some(&admin), "/employees"), GuardDecision::Allow);
    }

    #[test]
    fn test_staff_is_denied_elevated_routes() {
        let staff = actor(RoleFlags::staff());
        assert_eq!(guard(Some(&staff), "/employees"), GuardDecision::Deny);
        assert_eq!(guard(Some(&staff), "/products/sync"), GuardDecision::Deny);
        assert_eq!(guard(Some(&staff), "/orders/15"), GuardDecision::Allow);
        assert_eq!(guard(Some(&staff), "/unknown/page"), GuardDecision::NotFound);
    }

    #[test]
    fn test_moderator_sidebar() {
        let moderator = actor(RoleFlags::moderator());
        let sections = visible_sections(Some(&moderator));
        let titles: Vec<_> = sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Панель управления", "Товары", "Заказы"]);

        let products = &sections[1];
        assert_eq!(products.items.len(), 5);
    }

    #[test]
    fn test_staff_sidebar_hides_moderator_entries() {
        let staff = actor(RoleFlags::staff());
        let sections = visible_sections(Some(&staff));
        let products = sections.iter().find(|s| s.path == "/products").unwrap();
        let paths: Vec<_> = products.items.iter().map(|i| i.path).collect();
        assert_eq!(paths, vec!["/products", "/products/prices", "/products/warehouses"]);
        assert!(sections.iter().all(|s| s.path != "/employees"));
    }

    #[test]
    fn test_sidebar_empty_without_actor() {
        assert!(visible_sections(None).is_empty());
    }
}
