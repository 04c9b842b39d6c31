//! Request payloads.

pub mod request;

pub use request::CredentialsForm;
