/// Identity of the player invoking a kit request: a stable user ID plus the
/// roles they carry at call time.
#[derive(Debug, Clone)]
pub struct KitRequester {
    pub id: u64,
    pub role_ids: Vec<u64>,
}

pub trait PermissionGate: Send + Sync {
    fn has_permission(&self, requester: &KitRequester) -> bool;
}

/// Role-based gate: open to everyone when no role is configured, otherwise
/// restricted to members carrying the configured role ID.
#[derive(Debug)]
pub struct RoleGate {
    required_role: Option<u64>,
}

impl RoleGate {
    pub fn new(required_role: Option<u64>) -> Self {
        Self { required_role }
    }
}

impl PermissionGate for RoleGate {
    fn has_permission(&self, requester: &KitRequester) -> bool {
        match self.required_role {
            None => true,
            Some(role) => requester.role_ids.contains(&role),
        }
    }
}
