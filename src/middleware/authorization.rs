use crate::pb::methods;
use std::collections::{HashMap, HashSet};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Static table of which roles may call which gRPC method.
///
/// Methods missing from the table are public.
#[derive(Debug, Clone, Default)]
pub struct AccessRoles {
    roles: HashMap<String, HashSet<String>>,
}

impl AccessRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow<I, R>(mut self, method: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.roles
            .entry(method.to_string())
            .or_default()
            .extend(roles.into_iter().map(Into::into));
        self
    }

    /// `None` when the method is public, otherwise the roles allowed to call it.
    pub fn allowed(&self, method: &str) -> Option<&HashSet<String>> {
        self.roles.get(method)
    }
}

/// Admins manage the catalog, users may only rate it; search and login stay public.
pub fn default_roles() -> AccessRoles {
    AccessRoles::new()
        .allow(methods::CREATE_LAPTOP, [ROLE_ADMIN])
        .allow(methods::UPLOAD_IMAGE, [ROLE_ADMIN])
        .allow(methods::RATE_LAPTOP, [ROLE_ADMIN, ROLE_USER])
}
