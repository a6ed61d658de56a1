//! Credential and token based identification.
//!
//! Existence is always checked before the password, and a token is always
//! verified before the store is consulted.

pub mod errors;
pub mod models;
pub mod ports;
pub mod service;
