//! Account lifecycle calls: registration, sign-in for users and admins, email
//! verification, password reset, and sign-out. Sign-in and verification branch on the
//! HTTP status themselves, so they request every status as a plain response. Passwords
//! and tokens are held as secrets and must never be logged.

pub mod client;
pub mod types;
mod validate;

pub use client::{
    admin_sign_in, forgot_password, register, reset_password, sign_in, sign_out, verify_email,
};
pub use types::{Credentials, Portal, Registration, SignInOutcome, Verification};
pub use validate::{valid_email, MIN_PASSWORD_LENGTH};
