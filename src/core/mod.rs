//! Core authorization types, catalogs, and validation rules.
//!
//! Everything here is pure: authorizations, invoices and journals as plain
//! data, the derived `active` flag, range checks and format checks.

mod authorization;
mod builder;
pub mod catalog;
mod clock;
mod config;
mod error;
mod types;
mod validation;

pub use authorization::is_active;
pub use builder::*;
pub use clock::*;
pub use config::EngineConfig;
pub use error::*;
pub use types::*;
pub use validation::*;
