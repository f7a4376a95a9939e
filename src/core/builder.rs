use chrono::NaiveDate;

use super::catalog;
use super::error::AuthorizationError;
use super::types::*;
use super::validation;

/// Authorization data ready to be stored, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthorization {
    pub partner: PartnerId,
    pub name: Option<String>,
    pub type_code: String,
    pub entity: String,
    pub emission_point: String,
    pub num_start: u64,
    pub num_end: u64,
    pub is_electronic: bool,
    pub expiration_date: Option<NaiveDate>,
    pub in_type: InType,
    pub sequence: Option<SequenceId>,
}

impl NewAuthorization {
    /// Attach the storage id.
    pub fn into_authorization(self, id: AuthorizationId) -> Authorization {
        Authorization {
            id,
            partner: self.partner,
            name: self.name,
            type_code: self.type_code,
            entity: self.entity,
            emission_point: self.emission_point,
            num_start: self.num_start,
            num_end: self.num_end,
            is_electronic: self.is_electronic,
            expiration_date: self.expiration_date,
            in_type: self.in_type,
            sequence: self.sequence,
        }
    }
}

/// Builder for new authorizations.
///
/// ```
/// use fiscal_auth::core::*;
/// use chrono::NaiveDate;
///
/// let new = AuthorizationBuilder::new(PartnerId(7), DocumentKind::InInvoice, "001", "001")
///     .name("1122334455")
///     .range(1, 100)
///     .expires(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(new.type_code, "01");
/// ```
pub struct AuthorizationBuilder {
    partner: PartnerId,
    name: Option<String>,
    type_code: String,
    entity: String,
    emission_point: String,
    num_start: u64,
    num_end: u64,
    is_electronic: bool,
    expiration_date: Option<NaiveDate>,
    in_type: InType,
    sequence: Option<SequenceId>,
}

impl AuthorizationBuilder {
    pub fn new(
        partner: PartnerId,
        kind: DocumentKind,
        entity: impl Into<String>,
        emission_point: impl Into<String>,
    ) -> Self {
        Self::with_code(partner, kind.code(), entity, emission_point)
    }

    /// Start from a raw voucher-type code; unknown codes fail in [`build`](Self::build).
    pub fn with_code(
        partner: PartnerId,
        type_code: impl Into<String>,
        entity: impl Into<String>,
        emission_point: impl Into<String>,
    ) -> Self {
        Self {
            partner,
            name: None,
            type_code: type_code.into(),
            entity: entity.into(),
            emission_point: emission_point.into(),
            num_start: 0,
            num_end: 0,
            is_electronic: false,
            expiration_date: None,
            in_type: InType::default(),
            sequence: None,
        }
    }

    pub fn partner(mut self, partner: PartnerId) -> Self {
        self.partner = partner;
        self
    }

    /// Authorization number issued by the tax authority.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn range(mut self, num_start: u64, num_end: u64) -> Self {
        self.num_start = num_start;
        self.num_end = num_end;
        self
    }

    pub fn electronic(mut self) -> Self {
        self.is_electronic = true;
        self
    }

    pub fn expires(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn in_type(mut self, in_type: InType) -> Self {
        self.in_type = in_type;
        self
    }

    pub fn sequence(mut self, sequence: SequenceId) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Check the input and produce a [`NewAuthorization`].
    /// Reports all field errors at once.
    pub fn build(self) -> Result<NewAuthorization, AuthorizationError> {
        if !catalog::is_known_voucher_type(&self.type_code) {
            return Err(AuthorizationError::UnknownDocumentType(self.type_code));
        }

        let new = NewAuthorization {
            partner: self.partner,
            name: self.name,
            type_code: self.type_code,
            entity: self.entity,
            emission_point: self.emission_point,
            num_start: self.num_start,
            num_end: self.num_end,
            is_electronic: self.is_electronic,
            expiration_date: self.expiration_date,
            in_type: self.in_type,
            sequence: self.sequence,
        };

        let errors = validation::validate_new_authorization(&new);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AuthorizationError::Validation(msg));
        }

        Ok(new)
    }
}

/// Caller context used to prefill interactive authorization creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Partner record of the current company.
    pub company_partner: PartnerId,
    /// Document kind the user is working on, if any.
    pub document_kind: Option<DocumentKind>,
    /// Partner the user is working on, if any.
    pub partner_override: Option<PartnerId>,
}

impl Session {
    pub fn new(company_partner: PartnerId) -> Self {
        Self {
            company_partner,
            document_kind: None,
            partner_override: None,
        }
    }

    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.document_kind = Some(kind);
        self
    }

    pub fn with_partner(mut self, partner: PartnerId) -> Self {
        self.partner_override = Some(partner);
        self
    }

    /// Builder with the session defaults: the overriding partner or the
    /// company, the current document kind or `in_invoice`, external type.
    pub fn new_authorization(
        &self,
        entity: impl Into<String>,
        emission_point: impl Into<String>,
    ) -> AuthorizationBuilder {
        let partner = self.partner_override.unwrap_or(self.company_partner);
        let kind = self.document_kind.unwrap_or(DocumentKind::InInvoice);
        AuthorizationBuilder::new(partner, kind, entity, emission_point)
    }
}
