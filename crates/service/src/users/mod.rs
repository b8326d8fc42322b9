//! Users module: three-layer architecture (domain, repository, service).
//!
//! `UserService` is the only component allowed to talk to a `UserRepository`;
//! controllers receive it through the container.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;

pub use service::UserService;
