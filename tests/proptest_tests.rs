//! Property-based tests for authorization selection and range checks.
//!
//! Run with: `cargo test --test proptest_tests`

use chrono::{Days, NaiveDate};
use fiscal_auth::core::*;
use fiscal_auth::registry::AuthorizationRegistry;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 6, 15)
}

// ── Proptest Strategies ─────────────────────────────────────────────────────

fn arb_kind() -> impl Strategy<Value = DocumentKind> {
    prop::sample::select(DocumentKind::ALL.to_vec())
}

/// Expiration within two years around `today()`, or none.
fn arb_expiration() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of((0u64..730).prop_map(|offset| {
        date(2023, 6, 15).checked_add_days(Days::new(offset)).unwrap()
    }))
}

/// Authorization request for one of three partners and a handful of
/// issuing points, so that collisions are frequent.
fn arb_request() -> impl Strategy<Value = NewAuthorization> {
    (
        1u64..=3,
        arb_kind(),
        prop::sample::select(vec!["001", "002"]),
        prop::sample::select(vec!["001", "002"]),
        any::<bool>(),
        arb_expiration(),
        0u64..1000,
        0u64..1000,
    )
        .prop_map(|(partner, kind, entity, point, electronic, expiration, a, b)| {
            let mut builder = AuthorizationBuilder::new(PartnerId(partner), kind, entity, point)
                .range(a.min(b), a.max(b));
            if electronic {
                builder = builder.electronic();
            }
            if let Some(expiration) = expiration {
                builder = builder.expires(expiration);
            }
            builder.build().unwrap()
        })
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    /// is_valid_number() is exactly the inclusive range check.
    #[test]
    fn range_check_is_inclusive(start in 0u64..10_000, len in 0u64..10_000, n in 0u64..30_000) {
        let end = start + len;
        let auth = AuthorizationBuilder::new(PartnerId(1), DocumentKind::InInvoice, "001", "001")
            .range(start, end)
            .build()
            .unwrap()
            .into_authorization(AuthorizationId(1));
        prop_assert_eq!(auth.is_valid_number(n), start <= n && n <= end);
        prop_assert!(auth.is_valid_number(start));
        prop_assert!(auth.is_valid_number(end));
        prop_assert!(!auth.is_valid_number(end + 1));
        if start > 0 {
            prop_assert!(!auth.is_valid_number(start - 1));
        }
    }

    /// Electronic authorizations are active whatever their expiration date.
    #[test]
    fn electronic_is_always_active(expiration in arb_expiration()) {
        prop_assert!(is_active(true, expiration, today()));
    }

    /// Physical authorizations are active strictly before expiration.
    #[test]
    fn physical_activity_follows_expiration(expiration in arb_expiration()) {
        let active = is_active(false, expiration, today());
        match expiration {
            None => prop_assert!(active),
            Some(due) => prop_assert_eq!(active, today() < due),
        }
    }

    /// Whatever sequence of creations succeeds, every issuing point keeps at
    /// most one active authorization and select() returns an active match.
    #[test]
    fn select_returns_the_single_active_match(requests in prop::collection::vec(arb_request(), 1..30)) {
        let mut registry = AuthorizationRegistry::new();
        for request in requests {
            let _ = registry.create(request, today());
        }

        let records = registry.list_by_expiration();
        for (i, a) in records.iter().enumerate() {
            for b in &records[i + 1..] {
                if a.same_issuing_point(b) {
                    prop_assert!(
                        !(a.is_active_on(today()) && b.is_active_on(today())),
                        "two active authorizations for one issuing point: {} and {}",
                        a.id,
                        b.id
                    );
                }
            }
        }

        for partner in 1u64..=3 {
            for kind in DocumentKind::ALL {
                let partner = PartnerId(partner);
                match registry.select(partner, kind, today()) {
                    Ok(auth) => {
                        prop_assert!(auth.covers(partner, kind, today()));
                        let first = registry
                            .partner_authorizations(partner)
                            .find(|a| a.covers(partner, kind, today()))
                            .map(|a| a.id);
                        prop_assert_eq!(first, Some(auth.id));
                    }
                    Err(AuthorizationError::NoActiveAuthorization(code)) => {
                        prop_assert_eq!(code.as_str(), kind.code());
                        prop_assert!(registry
                            .partner_authorizations(partner)
                            .all(|a| !a.covers(partner, kind, today())));
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {e}"),
                }
            }
        }
    }

    /// A second active authorization for the same issuing point is refused.
    #[test]
    fn duplicate_active_always_fails(request in arb_request()) {
        let mut registry = AuthorizationRegistry::new();
        let active = request.is_electronic
            || request.expiration_date.is_none_or(|due| today() < due);
        registry.create(request.clone(), today()).unwrap();

        let mut again = request;
        again.expiration_date = None;
        let result = registry.create(again, today());
        if active {
            let is_duplicate = matches!(
                result,
                Err(AuthorizationError::DuplicateActiveAuthorization { .. })
            );
            prop_assert!(is_duplicate);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Padding never changes the numeric value of a reference.
    #[test]
    fn padding_preserves_value(n in 0u64..1_000_000_000) {
        let padded = pad_reference(&n.to_string(), REFERENCE_WIDTH);
        prop_assert_eq!(padded.len(), REFERENCE_WIDTH);
        prop_assert_eq!(parse_reference(&padded), Some(n));
        prop_assert!(check_sequence_value(&padded, REFERENCE_WIDTH).is_ok());
    }
}

// ── Edge Case Tests ─────────────────────────────────────────────────────────

#[test]
fn range_at_u64_bounds() {
    let auth = AuthorizationBuilder::new(PartnerId(1), DocumentKind::InInvoice, "001", "001")
        .range(0, u64::MAX)
        .build()
        .unwrap()
        .into_authorization(AuthorizationId(1));
    assert!(auth.is_valid_number(0));
    assert!(auth.is_valid_number(u64::MAX));
}

#[test]
fn expiring_today_is_inactive() {
    assert!(!is_active(false, Some(today()), today()));
    assert!(is_active(false, today().succ_opt(), today()));
}
