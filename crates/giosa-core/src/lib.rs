//! # Giosa Core
//!
//! The domain layer of the Giosa blog.
//! Posts, comments, their validation rules, the ports infrastructure must
//! implement, and the services that orchestrate mutations and broadcasts.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
