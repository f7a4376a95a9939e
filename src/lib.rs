//! # fiscal-auth
//!
//! Tax-authority document authorizations and invoice numbering.
//!
//! An *authorization* is the permit a tax authority issues to print or emit
//! a class of fiscal documents from one establishment (`entity`) and
//! emission point, either for a fixed range of sequentials or for unlimited
//! electronic issuance. This crate decides which authorization applies to an
//! invoice, checks typed references against the authorized range, draws
//! definitive numbers for emitted documents and formats the printed document
//! number (`entity + emission_point + reference`).
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fiscal_auth::core::*;
//! use fiscal_auth::engine::NumberingEngine;
//! use fiscal_auth::numbering::{NumberSequence, Sequences};
//!
//! let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
//! let mut engine = NumberingEngine::with_parts(Sequences::new(), clock);
//! let (company, customer) = (PartnerId(1), PartnerId(2));
//!
//! let seq = engine.sequences_mut().create(NumberSequence::starting_at(1));
//! let auth = engine
//!     .create_authorization(
//!         AuthorizationBuilder::new(company, DocumentKind::OutInvoice, "001", "002")
//!             .electronic()
//!             .in_type(InType::Internal)
//!             .sequence(seq)
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//! let journal = engine.add_journal(Journal::new("Sales").out_invoice(auth));
//!
//! let id = engine
//!     .create_invoice(Invoice::draft(DocumentKind::OutInvoice, customer, company).with_journal(journal))
//!     .unwrap();
//! engine.open_invoice(id).unwrap();
//! assert_eq!(engine.invoice_number(id).unwrap(), "001002000000001");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, catalogs, validation, registry, sequences |
//! | `engine` (default) | Invoice numbering engine |
//! | `config` | Load [`EngineConfig`](crate::core::EngineConfig) from JSON |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod numbering;

#[cfg(feature = "core")]
pub mod registry;

#[cfg(feature = "engine")]
pub mod engine;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
