//! Static route tables consulted by the guard.
//!
//! All tables are built once at startup, validated, and then only read. Prefix
//! membership is segment-aware: `/admin` covers `/admin` and `/admin/...` but
//! not `/administrator`.

use std::collections::HashSet;

use thiserror::Error;

use crate::Role;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteConfigError {
    #[error("invalid route prefix '{0}' (must start with '/', must not end with '/')")]
    InvalidPrefix(String),

    #[error("route prefix '{0}' listed more than once")]
    DuplicatePrefix(String),

    #[error("role restriction on '{0}' has no accepted roles")]
    EmptyRoleSet(String),

    #[error("role restriction on '{0}' is not a protected route")]
    UnprotectedRestriction(String),

    #[error("invalid matcher pattern '{0}'")]
    InvalidPattern(String),

    #[error("protected route '{0}' is not covered by any matcher pattern")]
    UncoveredPrefix(String),
}

/// Returns true when `path` equals `prefix` or lies beneath it.
pub fn path_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn validate_prefix(prefix: &str) -> Result<(), RouteConfigError> {
    if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
        return Err(RouteConfigError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// Route classification table: path prefixes that require a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedRoutes {
    prefixes: Vec<String>,
}

impl ProtectedRoutes {
    pub fn new<I, S>(prefixes: I) -> Result<Self, RouteConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for prefix in prefixes {
            let prefix = prefix.into();
            validate_prefix(&prefix)?;
            if !seen.insert(prefix.clone()) {
                return Err(RouteConfigError::DuplicatePrefix(prefix));
            }
            out.push(prefix);
        }
        Ok(Self { prefixes: out })
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.prefixes.iter().any(|p| path_matches(p, path))
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }
}

/// One entry of the role restriction table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRestriction {
    prefix: String,
    roles: HashSet<Role>,
}

impl RoleRestriction {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn accepts(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }
}

/// Role restriction table: protected prefixes that also require a role.
///
/// When several entries cover a path the longest prefix wins, so a specific
/// sub-route can carry a different role set than its parent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleRestrictions {
    // Sorted by descending prefix length; first match is the most specific.
    entries: Vec<RoleRestriction>,
}

impl RoleRestrictions {
    pub fn new<I, S, R>(entries: I) -> Result<Self, RouteConfigError>
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<String>,
        R: IntoIterator<Item = Role>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (prefix, roles) in entries {
            let prefix = prefix.into();
            validate_prefix(&prefix)?;
            if !seen.insert(prefix.clone()) {
                return Err(RouteConfigError::DuplicatePrefix(prefix));
            }
            let roles: HashSet<Role> = roles.into_iter().collect();
            if roles.is_empty() {
                return Err(RouteConfigError::EmptyRoleSet(prefix));
            }
            out.push(RoleRestriction { prefix, roles });
        }
        out.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Ok(Self { entries: out })
    }

    /// Most specific restriction covering `path`, if any.
    pub fn restriction_for(&self, path: &str) -> Option<&RoleRestriction> {
        self.entries.iter().find(|r| path_matches(&r.prefix, path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleRestriction> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Exact(String),
    /// `root/*`: the root itself and anything beneath it.
    Subtree(String),
}

/// Glob-style request matcher deciding which requests reach the guard at all.
///
/// Patterns are either exact paths (`/login`) or a root with a trailing
/// wildcard (`/admin/*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    patterns: Vec<Pattern>,
}

impl Matcher {
    pub fn new<I, S>(patterns: I) -> Result<Self, RouteConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Self::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// One `<prefix>/*` pattern per protected prefix.
    pub fn covering(routes: &ProtectedRoutes) -> Self {
        Self {
            patterns: routes.prefixes().map(|p| Pattern::Subtree(p.to_string())).collect(),
        }
    }

    fn parse(raw: &str) -> Result<Pattern, RouteConfigError> {
        let invalid = || RouteConfigError::InvalidPattern(raw.to_string());
        match raw.strip_suffix("/*") {
            Some(root) => {
                validate_prefix(root).map_err(|_| invalid())?;
                if root.contains('*') {
                    return Err(invalid());
                }
                Ok(Pattern::Subtree(root.to_string()))
            }
            None => {
                if !raw.starts_with('/') || raw.contains('*') {
                    return Err(invalid());
                }
                Ok(Pattern::Exact(raw.to_string()))
            }
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| match p {
            Pattern::Exact(exact) => path == exact,
            Pattern::Subtree(root) => path_matches(root, path),
        })
    }

    /// True when every path under `prefix` would be matched.
    fn covers_prefix(&self, prefix: &str) -> bool {
        self.patterns.iter().any(|p| match p {
            Pattern::Exact(_) => false,
            Pattern::Subtree(root) => path_matches(root, prefix),
        })
    }
}

/// Where the guard sends rejected requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPaths {
    pub login: String,
    pub callback_param: String,
    pub fallback: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            callback_param: "callbackUrl".to_string(),
            fallback: "/".to_string(),
        }
    }
}

/// Complete, validated guard configuration for one deployment.
///
/// Only obtainable through [`GuardConfig::new`], so the cross-table checks
/// cannot be skipped:
///
/// ```compile_fail
/// use c500_auth::{GuardConfig, GuardPaths, Matcher, ProtectedRoutes, RoleRestrictions};
///
/// let protected = ProtectedRoutes::new(["/admin"]).unwrap();
/// let config = GuardConfig {
///     protected,
///     restrictions: RoleRestrictions::default(),
///     matcher: Matcher::new(["/login"]).unwrap(),
///     paths: GuardPaths::default(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    protected: ProtectedRoutes,
    restrictions: RoleRestrictions,
    matcher: Matcher,
    paths: GuardPaths,
}

impl GuardConfig {
    /// Cross-check the tables: every restriction must sit on a protected
    /// route and the matcher must reach every protected route.
    pub fn new(
        protected: ProtectedRoutes,
        restrictions: RoleRestrictions,
        matcher: Matcher,
        paths: GuardPaths,
    ) -> Result<Self, RouteConfigError> {
        for restriction in restrictions.iter() {
            if !protected.is_protected(restriction.prefix()) {
                return Err(RouteConfigError::UnprotectedRestriction(
                    restriction.prefix().to_string(),
                ));
            }
        }
        for prefix in protected.prefixes() {
            if !matcher.covers_prefix(prefix) {
                return Err(RouteConfigError::UncoveredPrefix(prefix.to_string()));
            }
        }
        Ok(Self {
            protected,
            restrictions,
            matcher,
            paths,
        })
    }

    pub fn protected(&self) -> &ProtectedRoutes {
        &self.protected
    }

    pub fn restrictions(&self) -> &RoleRestrictions {
        &self.restrictions
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn paths(&self) -> &GuardPaths {
        &self.paths
    }

    /// Route tables of the Commander 500 site.
    pub fn commander500() -> Result<Self, RouteConfigError> {
        let protected = ProtectedRoutes::new([
            "/admin",
            "/articles/create",
            "/articles/edit",
            "/tournaments/create",
            "/tournaments/manage",
            "/forum/new-topic",
            "/profile",
        ])?;

        let restrictions = RoleRestrictions::new([
            ("/admin", vec![Role::ADMIN]),
            ("/articles/create", vec![Role::ADMIN, Role::EDITOR]),
            ("/articles/edit", vec![Role::ADMIN, Role::EDITOR]),
            ("/tournaments/create", vec![Role::ADMIN, Role::ORGANIZER]),
            ("/tournaments/manage", vec![Role::ADMIN, Role::ORGANIZER]),
        ])?;

        let matcher = Matcher::covering(&protected);
        Self::new(protected, restrictions, matcher, GuardPaths::default())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn prefix_match_is_segment_aware() {
        assert!(path_matches("/admin", "/admin"));
        assert!(path_matches("/admin", "/admin/settings"));
        assert!(path_matches("/admin", "/admin/"));
        assert!(!path_matches("/admin", "/administrator"));
        assert!(!path_matches("/admin", "/"));
        assert!(!path_matches("/articles/create", "/articles"));
    }

    #[test]
    fn protected_routes_reject_bad_prefixes() {
        assert_eq!(
            ProtectedRoutes::new(["admin"]),
            Err(RouteConfigError::InvalidPrefix("admin".to_string()))
        );
        assert_eq!(
            ProtectedRoutes::new(["/admin/"]),
            Err(RouteConfigError::InvalidPrefix("/admin/".to_string()))
        );
        assert_eq!(
            ProtectedRoutes::new(["/"]),
            Err(RouteConfigError::InvalidPrefix("/".to_string()))
        );
        assert_eq!(
            ProtectedRoutes::new(["/admin", "/admin"]),
            Err(RouteConfigError::DuplicatePrefix("/admin".to_string()))
        );
    }

    #[test]
    fn longest_restriction_prefix_wins() {
        let restrictions = RoleRestrictions::new([
            ("/admin", vec![Role::ADMIN]),
            ("/admin/reports", vec![Role::ADMIN, Role::ORGANIZER]),
        ])
        .unwrap();

        let r = restrictions.restriction_for("/admin/reports/2024").unwrap();
        assert_eq!(r.prefix(), "/admin/reports");
        assert!(r.accepts(&Role::ORGANIZER));

        let r = restrictions.restriction_for("/admin/users").unwrap();
        assert_eq!(r.prefix(), "/admin");
        assert!(!r.accepts(&Role::ORGANIZER));
    }

    #[test]
    fn precedence_does_not_depend_on_listing_order() {
        let a = RoleRestrictions::new([
            ("/admin/reports", vec![Role::ORGANIZER]),
            ("/admin", vec![Role::ADMIN]),
        ])
        .unwrap();
        let b = RoleRestrictions::new([
            ("/admin", vec![Role::ADMIN]),
            ("/admin/reports", vec![Role::ORGANIZER]),
        ])
        .unwrap();

        assert_eq!(
            a.restriction_for("/admin/reports").map(|r| r.prefix()),
            b.restriction_for("/admin/reports").map(|r| r.prefix())
        );
    }

    #[test]
    fn empty_role_set_is_rejected() {
        let err = RoleRestrictions::new([("/admin", Vec::<Role>::new())]).unwrap_err();
        assert_eq!(err, RouteConfigError::EmptyRoleSet("/admin".to_string()));
    }

    #[test]
    fn matcher_patterns() {
        let matcher = Matcher::new(["/admin/*", "/login"]).unwrap();
        assert!(matcher.matches("/admin"));
        assert!(matcher.matches("/admin/settings"));
        assert!(matcher.matches("/login"));
        assert!(!matcher.matches("/login/help"));
        assert!(!matcher.matches("/forum"));

        assert!(Matcher::new(["admin/*"]).is_err());
        assert!(Matcher::new(["/a*b"]).is_err());
        assert!(Matcher::new(["/*"]).is_err());
    }

    #[test]
    fn config_rejects_restriction_on_public_route() {
        let protected = ProtectedRoutes::new(["/admin"]).unwrap();
        let restrictions = RoleRestrictions::new([("/forum", vec![Role::ADMIN])]).unwrap();
        let matcher = Matcher::covering(&protected);

        let err = GuardConfig::new(protected, restrictions, matcher, GuardPaths::default()).unwrap_err();
        assert_eq!(err, RouteConfigError::UnprotectedRestriction("/forum".to_string()));
    }

    #[test]
    fn config_rejects_matcher_that_misses_a_protected_route() {
        let protected = ProtectedRoutes::new(["/admin", "/profile"]).unwrap();
        let matcher = Matcher::new(["/admin/*", "/profile"]).unwrap();

        let err = GuardConfig::new(protected, RoleRestrictions::default(), matcher, GuardPaths::default())
            .unwrap_err();
        assert_eq!(err, RouteConfigError::UncoveredPrefix("/profile".to_string()));
    }

    #[test]
    fn commander500_tables_are_valid() {
        let config = GuardConfig::commander500().unwrap();
        assert!(config.protected().is_protected("/admin/settings"));
        assert!(config.protected().is_protected("/profile"));
        assert!(!config.protected().is_protected("/forum"));
        assert!(!config.protected().is_protected("/tournaments"));
        assert!(config.restrictions().restriction_for("/profile").is_none());
        assert!(config.matcher().matches("/tournaments/manage/42"));
    }

    proptest! {
        #[test]
        fn sibling_names_never_match(root in "[a-z]{1,8}", suffix in "[a-z0-9]{1,8}") {
            let prefix = format!("/{root}");
            let sibling = format!("/{root}{suffix}");
            prop_assert!(!path_matches(&prefix, &sibling));
        }

        #[test]
        fn descendants_always_match(root in "[a-z]{1,8}", child in "[a-z0-9/]{0,16}") {
            let prefix = format!("/{root}");
            let path = format!("{prefix}/{child}");
            prop_assert!(path_matches(&prefix, &path));
        }
    }
}
