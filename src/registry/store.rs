use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::core::{
    Authorization, AuthorizationError, AuthorizationId, DocumentKind, NewAuthorization, PartnerId,
};

/// Answers whether any document still points at an authorization.
pub trait AuthorizationReferences {
    fn is_referenced(&self, id: AuthorizationId) -> bool;
}

impl AuthorizationReferences for [AuthorizationId] {
    fn is_referenced(&self, id: AuthorizationId) -> bool {
        self.contains(&id)
    }
}

/// In-memory authorization store.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationRegistry {
    records: Vec<Authorization>,
    next_id: u64,
}

impl AuthorizationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new authorization.
    ///
    /// Fails with [`AuthorizationError::DuplicateActiveAuthorization`] when an
    /// authorization active on `today` already exists for the same partner,
    /// voucher type, entity and emission point; the existing one must expire
    /// first. Fails with [`AuthorizationError::UniqueViolation`] when another
    /// record has the same partner, voucher type and expiration date.
    pub fn create(
        &mut self,
        new: NewAuthorization,
        today: NaiveDate,
    ) -> Result<AuthorizationId, AuthorizationError> {
        if let Some(existing) = self.records.iter().find(|a| {
            a.partner == new.partner
                && a.type_code == new.type_code
                && a.entity == new.entity
                && a.emission_point == new.emission_point
                && a.is_active_on(today)
        }) {
            warn!(
                partner = %new.partner,
                code = %new.type_code,
                existing = %existing.id,
                "active authorization already exists"
            );
            return Err(AuthorizationError::DuplicateActiveAuthorization {
                partner: new.partner,
                code: new.type_code,
                entity: new.entity,
                emission_point: new.emission_point,
            });
        }

        // Undated records never collide, like NULLs under a unique index.
        if let Some(expiration) = new.expiration_date {
            if self.records.iter().any(|a| {
                a.partner == new.partner
                    && a.type_code == new.type_code
                    && a.expiration_date == Some(expiration)
            }) {
                return Err(AuthorizationError::UniqueViolation(format!(
                    "partner {} already has a {} authorization expiring {}",
                    new.partner, new.type_code, expiration
                )));
            }
        }

        self.next_id += 1;
        let id = AuthorizationId(self.next_id);
        let auth = new.into_authorization(id);
        info!(
            id = %id,
            partner = %auth.partner,
            code = %auth.type_code,
            label = %auth.display_name(),
            "authorization created"
        );
        self.records.push(auth);
        Ok(id)
    }

    /// Remove an authorization no document references.
    pub fn delete<R>(
        &mut self,
        id: AuthorizationId,
        references: &R,
    ) -> Result<Authorization, AuthorizationError>
    where
        R: AuthorizationReferences + ?Sized,
    {
        let index = self
            .records
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AuthorizationError::not_found("authorization", id.0))?;
        if references.is_referenced(id) {
            warn!(id = %id, "refusing to delete authorization in use");
            return Err(AuthorizationError::AuthorizationInUse(id));
        }
        info!(id = %id, "authorization deleted");
        Ok(self.records.remove(index))
    }

    pub fn get(&self, id: AuthorizationId) -> Result<&Authorization, AuthorizationError> {
        self.records
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AuthorizationError::not_found("authorization", id.0))
    }

    /// Find the active authorization for documents of `kind` issued by
    /// `partner`.
    ///
    /// Scans in insertion order; the creation guard keeps at most one active
    /// record per issuing point.
    #[doc(alias = "get_authorisation")]
    pub fn select(
        &self,
        partner: PartnerId,
        kind: DocumentKind,
        today: NaiveDate,
    ) -> Result<&Authorization, AuthorizationError> {
        let code = kind.code();
        match self
            .partner_authorizations(partner)
            .find(|a| a.type_code == code && a.is_active_on(today))
        {
            Some(auth) => {
                debug!(partner = %partner, code, id = %auth.id, "authorization selected");
                Ok(auth)
            }
            None => {
                debug!(partner = %partner, code, "no active authorization");
                Err(AuthorizationError::NoActiveAuthorization(code.to_string()))
            }
        }
    }

    /// A partner's authorizations in insertion order.
    pub fn partner_authorizations(
        &self,
        partner: PartnerId,
    ) -> impl Iterator<Item = &Authorization> + '_ {
        self.records.iter().filter(move |a| a.partner == partner)
    }

    /// All authorizations, latest expiration first and undated ones last.
    pub fn list_by_expiration(&self) -> Vec<&Authorization> {
        let mut list: Vec<_> = self.records.iter().collect();
        list.sort_by(|a, b| match (a.expiration_date, b.expiration_date) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        list
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AuthorizationBuilder;

    const NO_REFS: &[AuthorizationId] = &[];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn new_auth(partner: u64, kind: DocumentKind) -> AuthorizationBuilder {
        AuthorizationBuilder::new(PartnerId(partner), kind, "001", "001").range(1, 100)
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let mut reg = AuthorizationRegistry::new();
        let a = reg
            .create(new_auth(1, DocumentKind::InInvoice).build().unwrap(), today())
            .unwrap();
        let b = reg
            .create(new_auth(1, DocumentKind::InRefund).build().unwrap(), today())
            .unwrap();
        assert!(a < b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn duplicate_active_is_rejected() {
        let mut reg = AuthorizationRegistry::new();
        reg.create(new_auth(1, DocumentKind::InInvoice).build().unwrap(), today())
            .unwrap();
        let err = reg
            .create(
                new_auth(1, DocumentKind::InInvoice)
                    .range(101, 200)
                    .build()
                    .unwrap(),
                today(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            AuthorizationError::DuplicateActiveAuthorization { .. }
        ));
    }

    #[test]
    fn expired_authorization_can_be_replaced() {
        let mut reg = AuthorizationRegistry::new();
        reg.create(
            new_auth(1, DocumentKind::InInvoice)
                .expires(date(2024, 1, 1))
                .build()
                .unwrap(),
            today(),
        )
        .unwrap();
        let id = reg
            .create(
                new_auth(1, DocumentKind::InInvoice)
                    .range(101, 200)
                    .build()
                    .unwrap(),
                today(),
            )
            .unwrap();
        assert_eq!(
            reg.select(PartnerId(1), DocumentKind::InInvoice, today())
                .unwrap()
                .id,
            id
        );
    }

    #[test]
    fn other_emission_point_is_not_a_duplicate() {
        let mut reg = AuthorizationRegistry::new();
        reg.create(new_auth(1, DocumentKind::InInvoice).build().unwrap(), today())
            .unwrap();
        let other = AuthorizationBuilder::new(PartnerId(1), DocumentKind::InInvoice, "001", "002")
            .range(1, 100)
            .build()
            .unwrap();
        assert!(reg.create(other, today()).is_ok());
    }

    #[test]
    fn same_expiration_violates_storage_uniqueness() {
        let mut reg = AuthorizationRegistry::new();
        let expiry = date(2024, 1, 1);
        reg.create(
            new_auth(1, DocumentKind::InInvoice).expires(expiry).build().unwrap(),
            today(),
        )
        .unwrap();
        let other = AuthorizationBuilder::new(PartnerId(1), DocumentKind::InInvoice, "002", "001")
            .range(1, 100)
            .expires(expiry)
            .build()
            .unwrap();
        let err = reg.create(other, today()).unwrap_err();
        assert!(matches!(err, AuthorizationError::UniqueViolation(_)));
    }

    #[test]
    fn select_misses_report_the_code() {
        let reg = AuthorizationRegistry::new();
        let err = reg
            .select(PartnerId(1), DocumentKind::LiqPurchase, today())
            .unwrap_err();
        assert!(matches!(err, AuthorizationError::NoActiveAuthorization(c) if c == "03"));
    }

    #[test]
    fn select_skips_expired_and_other_partners() {
        let mut reg = AuthorizationRegistry::new();
        reg.create(
            new_auth(1, DocumentKind::InInvoice)
                .expires(date(2024, 6, 15))
                .build()
                .unwrap(),
            date(2024, 1, 1),
        )
        .unwrap();
        reg.create(new_auth(2, DocumentKind::InInvoice).build().unwrap(), today())
            .unwrap();
        assert!(
            reg.select(PartnerId(1), DocumentKind::InInvoice, today())
                .is_err()
        );
        assert!(
            reg.select(PartnerId(2), DocumentKind::InInvoice, today())
                .is_ok()
        );
    }

    #[test]
    fn delete_refuses_referenced() {
        let mut reg = AuthorizationRegistry::new();
        let id = reg
            .create(new_auth(1, DocumentKind::InInvoice).build().unwrap(), today())
            .unwrap();
        let err = reg.delete(id, &[id][..]).unwrap_err();
        assert!(matches!(err, AuthorizationError::AuthorizationInUse(x) if x == id));
        assert_eq!(reg.len(), 1);

        let removed = reg.delete(id, NO_REFS).unwrap();
        assert_eq!(removed.id, id);
        assert!(reg.is_empty());
    }

    #[test]
    fn delete_unknown() {
        let mut reg = AuthorizationRegistry::new();
        let err = reg.delete(AuthorizationId(9), NO_REFS).unwrap_err();
        assert!(matches!(err, AuthorizationError::NotFound { id: 9, .. }));
    }

    #[test]
    fn list_orders_by_expiration_desc() {
        let mut reg = AuthorizationRegistry::new();
        let early = reg
            .create(
                new_auth(1, DocumentKind::InInvoice)
                    .expires(date(2025, 1, 1))
                    .build()
                    .unwrap(),
                today(),
            )
            .unwrap();
        let undated = reg
            .create(new_auth(1, DocumentKind::InRefund).build().unwrap(), today())
            .unwrap();
        let late = reg
            .create(
                new_auth(2, DocumentKind::InInvoice)
                    .expires(date(2026, 1, 1))
                    .build()
                    .unwrap(),
                today(),
            )
            .unwrap();
        let ids: Vec<_> = reg.list_by_expiration().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![late, early, undated]);
    }
}
