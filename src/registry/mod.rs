//! Authorization registry and selector.
//!
//! Stores authorizations per partner in insertion order, guards creation
//! against a second active authorization for the same issuing point, and
//! refuses to delete authorizations that documents still reference.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use fiscal_auth::core::*;
//! use fiscal_auth::registry::AuthorizationRegistry;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let mut registry = AuthorizationRegistry::new();
//! let supplier = PartnerId(42);
//!
//! let new = AuthorizationBuilder::new(supplier, DocumentKind::InInvoice, "001", "001")
//!     .range(1, 100)
//!     .build()
//!     .unwrap();
//! let id = registry.create(new, today).unwrap();
//!
//! let selected = registry.select(supplier, DocumentKind::InInvoice, today).unwrap();
//! assert_eq!(selected.id, id);
//! ```

mod store;

pub use store::{AuthorizationReferences, AuthorizationRegistry};
