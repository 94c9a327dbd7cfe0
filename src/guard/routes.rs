//! Route table shared by the guard and the CLI.

pub const SIGN_IN: &str = "/login";
pub const ADMIN_SIGN_IN: &str = "/admin/login";

pub const DASHBOARD: &str = "/dashboard";
pub const PROFILE: &str = "/profile";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const ADMIN_BROADCAST: &str = "/admin/broadcast";
pub const ADMIN_PROFILE: &str = "/admin/profile";

/// Views that require a valid session.
pub const PROTECTED: [&str; 5] = [
    DASHBOARD,
    PROFILE,
    ADMIN_DASHBOARD,
    ADMIN_BROADCAST,
    ADMIN_PROFILE,
];

#[must_use]
pub fn is_protected(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    PROTECTED.contains(&path)
}
