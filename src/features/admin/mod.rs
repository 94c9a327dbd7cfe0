//! Admin console calls: user listing by status and broadcast email. These endpoints
//! require an admin bearer token; the API answers 403 for other accounts.

pub mod client;
pub mod types;

pub use client::{list_users, send_broadcast, send_test_broadcast};
pub use types::{AdminUser, Broadcast, UserStatusFilter};
