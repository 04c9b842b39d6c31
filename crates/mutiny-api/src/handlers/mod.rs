//! Route handlers.

pub mod auth;
pub mod home;
