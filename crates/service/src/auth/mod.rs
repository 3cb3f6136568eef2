//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Centralizes registration, login and bearer-token handling under the
//! service crate.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::AuthService;
