//! Voucher-type and sustento catalogs.
//!
//! Voucher types are the two-character codes the tax authority assigns to
//! each class of fiscal document. Sustento codes justify a purchase for tax
//! reporting and are only shown to the user.

use super::types::DocumentKind;

/// Authority code for a document kind.
pub fn document_code(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::OutInvoice => "18",
        DocumentKind::InInvoice => "01",
        DocumentKind::OutRefund => "04",
        DocumentKind::InRefund => "05",
        DocumentKind::LiqPurchase => "03",
        DocumentKind::RetInInvoice => "07",
    }
}

/// Document kind selected by an authority code, if any.
pub fn kind_for_code(code: &str) -> Option<DocumentKind> {
    DocumentKind::ALL
        .into_iter()
        .find(|kind| document_code(*kind) == code)
}

/// Check whether `code` is a known voucher type.
pub fn is_known_voucher_type(code: &str) -> bool {
    voucher_type_name(code).is_some()
}

/// Name of the voucher type with `code`.
pub fn voucher_type_name(code: &str) -> Option<&'static str> {
    VOUCHER_TYPES
        .binary_search_by(|(c, _)| c.cmp(&code))
        .ok()
        .map(|i| VOUCHER_TYPES[i].1)
}

/// Sustento entry rendered as `"{code} - {type}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sustento {
    pub code: &'static str,
    pub kind: &'static str,
}

impl Sustento {
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.code, self.kind)
    }
}

/// Look up a sustento by code.
pub fn sustento(code: &str) -> Option<Sustento> {
    SUSTENTOS
        .binary_search_by(|(c, _)| c.cmp(&code))
        .ok()
        .map(|i| Sustento {
            code: SUSTENTOS[i].0,
            kind: SUSTENTOS[i].1,
        })
}

/// All sustento entries in code order.
pub fn sustentos() -> impl Iterator<Item = Sustento> {
    SUSTENTOS
        .iter()
        .map(|&(code, kind)| Sustento { code, kind })
}

/// Voucher types (sorted by code for binary search).
static VOUCHER_TYPES: &[(&str, &str)] = &[
    ("01", "Invoice"),
    ("03", "Purchase liquidation"),
    ("04", "Credit note"),
    ("05", "Debit note"),
    ("07", "Withholding receipt"),
    ("18", "Sales document"),
];

/// Sustento codes (sorted by code for binary search).
static SUSTENTOS: &[(&str, &str)] = &[
    ("00", "Special cases without supporting tax credit"),
    ("01", "VAT tax credit for goods and services"),
    ("02", "Cost or expense for income tax"),
    ("03", "VAT tax credit on fixed assets"),
    ("04", "Cost or expense on fixed assets"),
    ("05", "Settlement of travel, lodging and food expenses"),
    ("06", "VAT tax credit on inventory"),
    ("07", "Retention"),
];
