//! # mutiny-api
//!
//! Thin HTML front end over the session and authentication stores: login,
//! registration, logout, and a home page showing the current session.
//!
//! The session identifier travels in an HTTP-only cookie named `id`.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
