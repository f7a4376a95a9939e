use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::book::InvoiceBook;
use crate::core::*;
use crate::numbering::{SequenceGenerator, Sequences};
use crate::registry::AuthorizationRegistry;

/// Authorization selection and document numbering for invoices.
///
/// Each operation either completes or returns an error with the invoice,
/// the registry and the invoice book left as they were.
#[derive(Debug)]
pub struct NumberingEngine<G = Sequences, C = SystemClock> {
    registry: AuthorizationRegistry,
    invoices: InvoiceBook,
    journals: BTreeMap<JournalId, Journal>,
    next_journal: u64,
    sequences: G,
    clock: C,
    config: EngineConfig,
}

impl NumberingEngine {
    /// Engine with in-memory sequences and the system clock.
    pub fn new() -> Self {
        Self::with_parts(Sequences::new(), SystemClock)
    }
}

impl Default for NumberingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SequenceGenerator, C: Clock> NumberingEngine<G, C> {
    pub fn with_parts(sequences: G, clock: C) -> Self {
        Self {
            registry: AuthorizationRegistry::new(),
            invoices: InvoiceBook::new(),
            journals: BTreeMap::new(),
            next_journal: 0,
            sequences,
            clock,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn registry(&self) -> &AuthorizationRegistry {
        &self.registry
    }

    pub fn invoices(&self) -> &InvoiceBook {
        &self.invoices
    }

    pub fn sequences(&self) -> &G {
        &self.sequences
    }

    pub fn sequences_mut(&mut self) -> &mut G {
        &mut self.sequences
    }

    // --- Authorizations ---

    pub fn create_authorization(
        &mut self,
        new: NewAuthorization,
    ) -> Result<AuthorizationId, AuthorizationError> {
        let today = self.clock.today();
        self.registry.create(new, today)
    }

    /// Delete an authorization no invoice points at.
    pub fn delete_authorization(
        &mut self,
        id: AuthorizationId,
    ) -> Result<Authorization, AuthorizationError> {
        self.registry.delete(id, &self.invoices)
    }

    /// Active authorization of `partner` for documents of `kind`.
    #[doc(alias = "get_authorisation")]
    pub fn select(
        &self,
        partner: PartnerId,
        kind: DocumentKind,
    ) -> Result<&Authorization, AuthorizationError> {
        self.registry.select(partner, kind, self.clock.today())
    }

    // --- Journals ---

    pub fn add_journal(&mut self, journal: Journal) -> JournalId {
        self.next_journal += 1;
        let id = JournalId(self.next_journal);
        self.journals.insert(id, journal);
        id
    }

    pub fn journal(&self, id: JournalId) -> Result<&Journal, AuthorizationError> {
        self.journals
            .get(&id)
            .ok_or_else(|| AuthorizationError::not_found("journal", id.0))
    }

    // --- Invoices ---

    pub fn create_invoice(&mut self, invoice: Invoice) -> Result<InvoiceId, AuthorizationError> {
        check_reference(&invoice, &self.config.auth_number_lengths)?;
        self.invoices.insert(invoice)
    }

    pub fn invoice(&self, id: InvoiceId) -> Result<&Invoice, AuthorizationError> {
        self.invoices.get(id)
    }

    /// Printed document number of an invoice.
    pub fn invoice_number(&self, id: InvoiceId) -> Result<String, AuthorizationError> {
        let invoice = self.invoices.get(id)?;
        let auth = invoice
            .auth_inv_id
            .map(|a| self.registry.get(a))
            .transpose()?;
        Ok(invoice.document_number(auth, &self.config.placeholder))
    }

    /// Authorization number length rule for received documents.
    pub fn check_reference(&self, id: InvoiceId) -> Result<(), AuthorizationError> {
        check_reference(self.invoices.get(id)?, &self.config.auth_number_lengths)
    }

    pub fn change_partner(
        &mut self,
        id: InvoiceId,
        partner: PartnerId,
    ) -> Result<(), AuthorizationError> {
        let mut updated = self.invoices.get(id)?.clone();
        updated.partner = partner;
        self.resolve_inbound(&mut updated)?;
        self.invoices.replace(id, updated)
    }

    pub fn change_company(
        &mut self,
        id: InvoiceId,
        company_partner: PartnerId,
    ) -> Result<(), AuthorizationError> {
        let mut updated = self.invoices.get(id)?.clone();
        updated.company_partner = company_partner;
        self.resolve_inbound(&mut updated)?;
        self.invoices.replace(id, updated)
    }

    /// Re-select the authorization of a received document after its partner
    /// or company changed. Emitted documents are left alone.
    pub fn on_partner_changed(&mut self, id: InvoiceId) -> Result<(), AuthorizationError> {
        let mut updated = self.invoices.get(id)?.clone();
        self.resolve_inbound(&mut updated)?;
        self.invoices.replace(id, updated)
    }

    fn resolve_inbound(&self, invoice: &mut Invoice) -> Result<(), AuthorizationError> {
        if invoice.kind.is_outbound() {
            return Ok(());
        }
        let auth = self
            .registry
            .select(invoice.partner, invoice.kind, self.clock.today())?;
        invoice.auth_inv_id = Some(auth.id);
        apply_auth_number(invoice, auth);
        check_reference(invoice, &self.config.auth_number_lengths)
    }

    /// Pick an authorization directly.
    pub fn on_authorization_changed(
        &mut self,
        id: InvoiceId,
        auth: Option<AuthorizationId>,
    ) -> Result<(), AuthorizationError> {
        let mut updated = self.invoices.get(id)?.clone();
        updated.auth_inv_id = auth;
        if let Some(auth) = auth {
            apply_auth_number(&mut updated, self.registry.get(auth)?);
        }
        check_reference(&updated, &self.config.auth_number_lengths)?;
        self.invoices.replace(id, updated)
    }

    /// Type the printed authorization number of a received document.
    pub fn set_auth_number(
        &mut self,
        id: InvoiceId,
        auth_number: Option<String>,
    ) -> Result<(), AuthorizationError> {
        let mut updated = self.invoices.get(id)?.clone();
        updated.auth_number = auth_number;
        check_reference(&updated, &self.config.auth_number_lengths)?;
        self.invoices.replace(id, updated)
    }

    /// Reference typed by the user.
    ///
    /// The value is zero-padded. When it falls outside the range of the
    /// invoice's (non-electronic) authorization, or is not a number, the
    /// reference is cleared and a warning is returned instead of an error.
    pub fn on_reference_changed(
        &mut self,
        id: InvoiceId,
        raw: &str,
    ) -> Result<Option<RangeMismatchWarning>, AuthorizationError> {
        let mut updated = self.invoices.get(id)?.clone();
        let raw = raw.trim();
        if raw.is_empty() {
            updated.reference = None;
            self.invoices.replace(id, updated)?;
            return Ok(None);
        }

        let padded = pad_reference(raw, self.config.reference_width);
        let auth = updated
            .auth_inv_id
            .map(|a| self.registry.get(a))
            .transpose()?;
        let warning = match parse_reference(&padded) {
            None => Some(RangeMismatchWarning::new(format!(
                "reference '{raw}' is not a number"
            ))),
            Some(number) => match auth {
                Some(auth) if !auth.is_electronic && !auth.is_valid_number(number) => {
                    Some(RangeMismatchWarning::new(
                        "number does not match the entered authorization",
                    ))
                }
                _ => None,
            },
        };

        match warning {
            Some(warning) => {
                warn!(invoice = %id, reference = %padded, "{}", warning.message);
                updated.reference = None;
                self.invoices.replace(id, updated)?;
                Ok(Some(warning))
            }
            None => {
                updated.reference = Some(padded);
                self.invoices.replace(id, updated)?;
                Ok(None)
            }
        }
    }

    /// Draw the definitive number of an emitted document.
    ///
    /// Works on exactly one invoice. A number already drawn is reused, so
    /// calling this twice yields the same number. Received documents are
    /// ignored and yield `None`.
    pub fn assign_next_number(
        &mut self,
        selection: &[InvoiceId],
    ) -> Result<Option<String>, AuthorizationError> {
        let [id] = selection else {
            return Err(AuthorizationError::Precondition(format!(
                "expected a single invoice, got {}",
                selection.len()
            )));
        };
        let id = *id;
        let mut updated = self.invoices.get(id)?.clone();
        if !updated.kind.is_outbound() {
            return Ok(None);
        }

        let number = match updated.internal_inv_number.clone() {
            Some(number) => {
                debug!(invoice = %id, number = %number, "reusing drawn number");
                number
            }
            None => {
                let auth_id = match updated.auth_inv_id {
                    Some(auth_id) => auth_id,
                    None => {
                        let today = self.clock.today();
                        let auth = self.registry.select(updated.issuer(), updated.kind, today)?;
                        updated.auth_inv_id = Some(auth.id);
                        auth.id
                    }
                };
                let sequence = self
                    .registry
                    .get(auth_id)?
                    .sequence
                    .ok_or(AuthorizationError::MissingSequence(auth_id))?;
                let number = self.sequences.next_value(sequence)?;
                info!(invoice = %id, authorization = %auth_id, number = %number, "number assigned");
                number
            }
        };

        updated.reference = Some(number.clone());
        updated.internal_inv_number = Some(number.clone());
        self.invoices.replace(id, updated)?;
        Ok(Some(number))
    }

    /// Post a draft invoice.
    ///
    /// Emitted documents with a journal take the journal's authorization
    /// (purchase liquidations keep their own) and draw their final number,
    /// which must be exactly `reference_width` digits.
    pub fn open_invoice(&mut self, id: InvoiceId) -> Result<(), AuthorizationError> {
        let mut updated = self.invoices.get(id)?.clone();
        if updated.state != InvoiceState::Draft {
            return Err(AuthorizationError::InvalidState(format!(
                "invoice {id} is {:?}, only drafts can be opened",
                updated.state
            )));
        }

        if let (true, Some(journal_id)) = (updated.kind.is_outbound(), updated.journal) {
            let journal = self.journal(journal_id)?;
            let auth_id = match updated.kind {
                DocumentKind::OutInvoice => journal.auth_out_invoice.ok_or_else(|| {
                    AuthorizationError::MissingJournalAuthorization(updated.kind.to_string())
                })?,
                DocumentKind::OutRefund => journal.auth_out_refund.ok_or_else(|| {
                    AuthorizationError::MissingJournalAuthorization(updated.kind.to_string())
                })?,
                _ => updated.auth_inv_id.ok_or_else(|| {
                    AuthorizationError::Precondition(format!(
                        "{} invoice {id} has no authorization",
                        updated.kind
                    ))
                })?,
            };
            let sequence = self
                .registry
                .get(auth_id)?
                .sequence
                .ok_or(AuthorizationError::MissingSequence(auth_id))?;
            check_reference(&updated, &self.config.auth_number_lengths)?;

            let number = self.sequences.next_value(sequence)?;
            if let Err(e) = check_sequence_value(&number, self.config.reference_width) {
                warn!(invoice = %id, number = %number, "sequence value is not zero-padded");
                return Err(e);
            }
            updated.auth_inv_id = Some(auth_id);
            updated.reference = Some(number);
        } else {
            check_reference(&updated, &self.config.auth_number_lengths)?;
        }

        updated.state = InvoiceState::Open;
        let reference = updated.reference.clone();
        self.invoices.replace(id, updated)?;
        info!(invoice = %id, reference = ?reference, "invoice opened");
        Ok(())
    }
}

/// Received documents print the authorization number of a physical
/// authorization.
fn apply_auth_number(invoice: &mut Invoice, auth: &Authorization) {
    if !auth.is_electronic {
        invoice.auth_number = auth.name.clone();
    }
}
