use chrono::NaiveDate;

use super::catalog;
use super::types::{Authorization, DocumentKind, PartnerId};

/// Derived `active` flag of an authorization.
///
/// Electronic authorizations and authorizations without an expiration date
/// never expire. Otherwise the authorization is active strictly before its
/// expiration date.
pub fn is_active(is_electronic: bool, expiration_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    if is_electronic {
        return true;
    }
    match expiration_date {
        None => true,
        Some(due) => today < due,
    }
}

impl Authorization {
    /// Whether the authorization can be used on `today`. Never cached.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        is_active(self.is_electronic, self.expiration_date, today)
    }

    /// Label shown wherever the authorization is picked.
    ///
    /// ```
    /// # use fiscal_auth::core::*;
    /// let auth = AuthorizationBuilder::new(PartnerId(1), DocumentKind::InInvoice, "001", "002")
    ///     .range(1, 500)
    ///     .build()
    ///     .unwrap()
    ///     .into_authorization(AuthorizationId(1));
    /// assert_eq!(auth.display_name(), "01 (1-500)");
    /// ```
    pub fn display_name(&self) -> String {
        if self.is_electronic {
            format!("{} (Electronic)", self.type_code)
        } else {
            format!("{} ({}-{})", self.type_code, self.num_start, self.num_end)
        }
    }

    /// Verify that `number` lies in `[num_start, num_end]`.
    ///
    /// Meaningless for electronic authorizations; callers skip it there.
    pub fn is_valid_number(&self, number: u64) -> bool {
        self.num_start <= number && number <= self.num_end
    }

    /// Name of the voucher type this authorization covers.
    pub fn voucher_name(&self) -> Option<&'static str> {
        catalog::voucher_type_name(&self.type_code)
    }

    /// Same partner, voucher type, entity and emission point.
    pub fn same_issuing_point(&self, other: &Authorization) -> bool {
        self.partner == other.partner
            && self.type_code == other.type_code
            && self.entity == other.entity
            && self.emission_point == other.emission_point
    }

    /// Active on `today` and covering documents of `kind` for `partner`.
    pub fn covers(&self, partner: PartnerId, kind: DocumentKind, today: NaiveDate) -> bool {
        self.partner == partner && self.type_code == kind.code() && self.is_active_on(today)
    }

    /// Printed document number prefix, e.g. `"001002"`.
    pub fn establishment_prefix(&self) -> String {
        format!("{}{}", self.entity, self.emission_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AuthorizationId, InType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn auth(is_electronic: bool, expiration_date: Option<NaiveDate>) -> Authorization {
        Authorization {
            id: AuthorizationId(1),
            partner: PartnerId(10),
            name: Some("1112223334".into()),
            type_code: "01".into(),
            entity: "001".into(),
            emission_point: "001".into(),
            num_start: 1,
            num_end: 100,
            is_electronic,
            expiration_date,
            in_type: InType::External,
            sequence: None,
        }
    }

    #[test]
    fn no_expiration_is_active() {
        assert!(auth(false, None).is_active_on(date(2030, 1, 1)));
    }

    #[test]
    fn past_expiration_is_inactive() {
        let a = auth(false, Some(date(2024, 6, 30)));
        assert!(a.is_active_on(date(2024, 6, 29)));
        assert!(!a.is_active_on(date(2024, 6, 30)));
        assert!(!a.is_active_on(date(2025, 1, 1)));
    }

    #[test]
    fn electronic_ignores_expiration() {
        let a = auth(true, Some(date(2000, 1, 1)));
        assert!(a.is_active_on(date(2024, 6, 30)));
    }

    #[test]
    fn display_names() {
        assert_eq!(auth(false, None).display_name(), "01 (1-100)");
        let mut e = auth(true, None);
        e.type_code = "18".into();
        assert_eq!(e.display_name(), "18 (Electronic)");
    }

    #[test]
    fn range_is_inclusive() {
        let a = auth(false, None);
        assert!(!a.is_valid_number(0));
        assert!(a.is_valid_number(1));
        assert!(a.is_valid_number(50));
        assert!(a.is_valid_number(100));
        assert!(!a.is_valid_number(101));
    }

    #[test]
    fn covers_checks_partner_code_and_activity() {
        let a = auth(false, Some(date(2024, 6, 30)));
        let today = date(2024, 1, 1);
        assert!(a.covers(PartnerId(10), DocumentKind::InInvoice, today));
        assert!(!a.covers(PartnerId(11), DocumentKind::InInvoice, today));
        assert!(!a.covers(PartnerId(10), DocumentKind::InRefund, today));
        assert!(!a.covers(PartnerId(10), DocumentKind::InInvoice, date(2024, 7, 1)));
    }

    #[test]
    fn voucher_name_and_prefix() {
        let a = auth(false, None);
        assert_eq!(a.voucher_name(), Some("Invoice"));
        assert_eq!(a.establishment_prefix(), "001001");
    }
}
