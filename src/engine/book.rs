use std::collections::BTreeMap;

use crate::core::{AuthorizationError, AuthorizationId, Invoice, InvoiceId};
use crate::registry::AuthorizationReferences;

/// In-memory invoice store.
///
/// Enforces uniqueness of (reference, kind, partner, state) for invoices
/// that carry a reference.
#[derive(Debug, Clone, Default)]
pub struct InvoiceBook {
    invoices: BTreeMap<InvoiceId, Invoice>,
    next_id: u64,
}

impl InvoiceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, invoice: Invoice) -> Result<InvoiceId, AuthorizationError> {
        self.check_unique(None, &invoice)?;
        self.next_id += 1;
        let id = InvoiceId(self.next_id);
        self.invoices.insert(id, invoice);
        Ok(id)
    }

    pub fn get(&self, id: InvoiceId) -> Result<&Invoice, AuthorizationError> {
        self.invoices
            .get(&id)
            .ok_or_else(|| AuthorizationError::not_found("invoice", id.0))
    }

    /// Overwrite an existing invoice in one step.
    pub(crate) fn replace(
        &mut self,
        id: InvoiceId,
        invoice: Invoice,
    ) -> Result<(), AuthorizationError> {
        if !self.invoices.contains_key(&id) {
            return Err(AuthorizationError::not_found("invoice", id.0));
        }
        self.check_unique(Some(id), &invoice)?;
        self.invoices.insert(id, invoice);
        Ok(())
    }

    fn check_unique(
        &self,
        own: Option<InvoiceId>,
        candidate: &Invoice,
    ) -> Result<(), AuthorizationError> {
        let Some(reference) = candidate.reference.as_deref().filter(|r| !r.is_empty()) else {
            return Ok(());
        };
        let clash = self.invoices.iter().find(|(id, other)| {
            Some(**id) != own
                && other.reference.as_deref() == Some(reference)
                && other.kind == candidate.kind
                && other.partner == candidate.partner
                && other.state == candidate.state
        });
        match clash {
            Some((existing, _)) => Err(AuthorizationError::DuplicateInvoiceNumber {
                reference: reference.to_string(),
                existing: *existing,
            }),
            None => Ok(()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (InvoiceId, &Invoice)> {
        self.invoices.iter().map(|(id, inv)| (*id, inv))
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }
}

impl AuthorizationReferences for InvoiceBook {
    fn is_referenced(&self, id: AuthorizationId) -> bool {
        self.invoices.values().any(|inv| inv.auth_inv_id == Some(id))
    }
}
