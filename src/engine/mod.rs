//! Invoice numbering engine.
//!
//! Hooks invoked by the host application over an invoice's life:
//!
//! | Hook | When |
//! |------|------|
//! | [`NumberingEngine::on_partner_changed`] | partner or company of a received document changed |
//! | [`NumberingEngine::on_reference_changed`] | the user typed a reference |
//! | [`NumberingEngine::assign_next_number`] | "assign next number" on an emitted document |
//! | [`NumberingEngine::open_invoice`] | the invoice is posted |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use fiscal_auth::core::*;
//! use fiscal_auth::engine::NumberingEngine;
//! use fiscal_auth::numbering::Sequences;
//!
//! let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
//! let mut engine = NumberingEngine::with_parts(Sequences::new(), clock);
//! let (company, supplier) = (PartnerId(1), PartnerId(2));
//!
//! engine
//!     .create_authorization(
//!         AuthorizationBuilder::new(supplier, DocumentKind::InInvoice, "001", "001")
//!             .name("1234567890")
//!             .range(1, 100)
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! let id = engine
//!     .create_invoice(Invoice::draft(DocumentKind::InInvoice, supplier, company))
//!     .unwrap();
//! engine.on_partner_changed(id).unwrap();
//! assert!(engine.on_reference_changed(id, "50").unwrap().is_none());
//! assert_eq!(engine.invoice_number(id).unwrap(), "001001000000050");
//! ```

mod book;
mod numbering;

pub use book::InvoiceBook;
pub use numbering::NumberingEngine;
