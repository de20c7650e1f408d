use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier carried in a session token.
///
/// Roles are opaque strings compared exactly; the set of roles a route accepts
/// lives in the route restriction table, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Site administrators (full access to `/admin`).
    pub const ADMIN: Role = Role(Cow::Borrowed("ADMIN"));
    /// Article authors and editors.
    pub const EDITOR: Role = Role(Cow::Borrowed("EDITOR"));
    /// Tournament organizers.
    pub const ORGANIZER: Role = Role(Cow::Borrowed("ORGANIZER"));
    /// Signed-in community member with no elevated rights.
    pub const VIEWER: Role = Role(Cow::Borrowed("VIEWER"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
