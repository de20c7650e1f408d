use c500_auth::{PrincipalId, Role, SessionClaims};

/// Principal context for a request (verified identity + role).
///
/// Attached by the guard middleware on protected routes only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
    role: Role,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId, role: Role) -> Self {
        Self { principal_id, role }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}

impl From<SessionClaims> for PrincipalContext {
    fn from(claims: SessionClaims) -> Self {
        Self::new(claims.sub, claims.role)
    }
}
