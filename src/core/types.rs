use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog;
use super::error::AuthorizationError;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Business partner: the company itself, a supplier or a customer.
    PartnerId
);
record_id!(
    /// Stored authorization record.
    AuthorizationId
);
record_id!(
    /// Counter used to draw outbound document numbers.
    SequenceId
);
record_id!(
    /// Invoice held in an [`InvoiceBook`](crate::engine::InvoiceBook).
    InvoiceId
);
record_id!(
    /// Accounting journal carrying the company's outbound authorizations.
    JournalId
);

/// Kind of fiscal document an authorization or invoice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Customer invoice issued by the company.
    OutInvoice,
    /// Supplier invoice received by the company.
    InInvoice,
    /// Credit note issued by the company.
    OutRefund,
    /// Credit/debit note received from a supplier.
    InRefund,
    /// Purchase liquidation, issued by the company on behalf of a supplier.
    LiqPurchase,
    /// Withholding receipt.
    RetInInvoice,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        Self::OutInvoice,
        Self::InInvoice,
        Self::OutRefund,
        Self::InRefund,
        Self::LiqPurchase,
        Self::RetInInvoice,
    ];

    /// Wire name, e.g. `"out_invoice"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OutInvoice => "out_invoice",
            Self::InInvoice => "in_invoice",
            Self::OutRefund => "out_refund",
            Self::InRefund => "in_refund",
            Self::LiqPurchase => "liq_purchase",
            Self::RetInInvoice => "ret_in_invoice",
        }
    }

    /// Parse from the wire name.
    pub fn from_name(name: &str) -> Result<Self, AuthorizationError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| AuthorizationError::UnknownDocumentType(name.to_string()))
    }

    /// Two-character authority code of the voucher type.
    pub fn code(&self) -> &'static str {
        catalog::document_code(*self)
    }

    /// Documents the company emits itself and numbers from its own sequences.
    pub fn is_outbound(&self) -> bool {
        matches!(self, Self::OutInvoice | Self::LiqPurchase | Self::OutRefund)
    }

    /// Received documents whose authorization comes from the partner.
    pub fn is_inbound(&self) -> bool {
        !self.is_outbound()
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocumentKind {
    type Err = AuthorizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Whether an authorization belongs to the company or to a third party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InType {
    Internal,
    #[default]
    External,
}

/// Government-issued permit to emit a class of fiscal documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub id: AuthorizationId,
    /// Owning partner.
    pub partner: PartnerId,
    /// Authorization number issued by the tax authority.
    pub name: Option<String>,
    /// Two-character voucher type code (see [`catalog::voucher_type_name`]).
    pub type_code: String,
    /// Establishment code, 3 characters.
    pub entity: String,
    /// Emission point code, 3 characters.
    pub emission_point: String,
    /// First printable number (ignored when electronic).
    pub num_start: u64,
    /// Last printable number (ignored when electronic).
    pub num_end: u64,
    pub is_electronic: bool,
    pub expiration_date: Option<NaiveDate>,
    pub in_type: InType,
    /// Sequence used for outbound numbering, attached by the operator.
    pub sequence: Option<SequenceId>,
}

/// Accounting journal with the authorizations used for outbound documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub name: String,
    pub auth_out_invoice: Option<AuthorizationId>,
    pub auth_out_refund: Option<AuthorizationId>,
    pub auth_retention: Option<AuthorizationId>,
}

impl Journal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn out_invoice(mut self, id: AuthorizationId) -> Self {
        self.auth_out_invoice = Some(id);
        self
    }

    pub fn out_refund(mut self, id: AuthorizationId) -> Self {
        self.auth_out_refund = Some(id);
        self
    }

    pub fn retention(mut self, id: AuthorizationId) -> Self {
        self.auth_retention = Some(id);
        self
    }
}

/// Lifecycle state of an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceState {
    #[default]
    Draft,
    Open,
    Paid,
    Cancelled,
}

/// Authorization-relevant facet of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub kind: DocumentKind,
    /// Customer or supplier on the document.
    pub partner: PartnerId,
    /// Partner record of the issuing company.
    pub company_partner: PartnerId,
    pub journal: Option<JournalId>,
    pub state: InvoiceState,
    /// Zero-padded document sequential.
    pub reference: Option<String>,
    /// Authorization the document is emitted under.
    pub auth_inv_id: Option<AuthorizationId>,
    /// Authorization number as printed on the document.
    pub auth_number: Option<String>,
    /// Definitive number already drawn for this document.
    pub internal_inv_number: Option<String>,
    /// Sustento code, display only.
    pub sustento: Option<String>,
}

impl Invoice {
    /// New draft document of `kind` between the company and `partner`.
    pub fn draft(kind: DocumentKind, partner: PartnerId, company_partner: PartnerId) -> Self {
        Self {
            kind,
            partner,
            company_partner,
            journal: None,
            state: InvoiceState::Draft,
            reference: None,
            auth_inv_id: None,
            auth_number: None,
            internal_inv_number: None,
            sustento: None,
        }
    }

    pub fn with_journal(mut self, journal: JournalId) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn with_sustento(mut self, code: impl Into<String>) -> Self {
        self.sustento = Some(code.into());
        self
    }

    /// Printed document number: entity, emission point and reference, or
    /// `placeholder` while no reference is set.
    pub fn document_number(&self, auth: Option<&Authorization>, placeholder: &str) -> String {
        match self.reference.as_deref() {
            Some(reference) if !reference.is_empty() => match auth {
                Some(auth) => format!("{}{}{}", auth.entity, auth.emission_point, reference),
                None => reference.to_string(),
            },
            _ => placeholder.to_string(),
        }
    }

    /// Partner whose authorizations govern this document: the supplier for
    /// received documents, the company for emitted ones.
    pub fn issuer(&self) -> PartnerId {
        if self.kind.is_outbound() {
            self.company_partner
        } else {
            self.partner
        }
    }
}
