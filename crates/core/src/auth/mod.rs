//! Account credentials.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Signup field rules

mod password;
mod signup;

pub use password::{MIN_PASSWORD_LEN, PasswordError, hash_password, verify_password};
pub use signup::{MIN_USERNAME_LEN, SignupError, validate_signup};
