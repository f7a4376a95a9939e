use super::builder::NewAuthorization;
use super::error::{AuthorizationError, ValidationError};
use super::types::{DocumentKind, Invoice};

/// Width of a document sequential.
pub const REFERENCE_WIDTH: usize = 9;

/// Accepted authorization number lengths: physical receipt, online
/// electronic receipt, offline electronic receipt.
pub const AUTH_NUMBER_LENGTHS: [usize; 3] = [10, 35, 49];

const NAME_MAX_LEN: usize = 128;

/// Validate a new authorization's fields.
/// Returns all validation errors found (not just the first).
pub fn validate_new_authorization(new: &NewAuthorization) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_code(&new.entity, "entity", &mut errors);
    validate_code(&new.emission_point, "emission_point", &mut errors);

    if !new.is_electronic && new.num_start > new.num_end {
        errors.push(ValidationError::new(
            "num_start",
            format!(
                "range start {} is greater than range end {}",
                new.num_start, new.num_end
            ),
        ));
    }

    if let Some(name) = &new.name {
        if name.chars().count() > NAME_MAX_LEN {
            errors.push(ValidationError::new(
                "name",
                format!("authorization number cannot exceed {NAME_MAX_LEN} characters"),
            ));
        }
    }

    errors
}

fn validate_code(value: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if value.chars().count() != 3 {
        errors.push(ValidationError::new(
            field,
            format!("must be exactly 3 characters, got '{value}'"),
        ));
    }
}

/// Check the printed authorization number of a received document.
///
/// Only purchase invoices and purchase liquidations carry the constraint.
pub fn check_reference(invoice: &Invoice, lengths: &[usize]) -> Result<(), AuthorizationError> {
    if !matches!(
        invoice.kind,
        DocumentKind::InInvoice | DocumentKind::LiqPurchase
    ) {
        return Ok(());
    }
    match &invoice.auth_number {
        Some(number) if !number.is_empty() => {
            let len = number.chars().count();
            if lengths.contains(&len) {
                Ok(())
            } else {
                Err(AuthorizationError::InvalidAuthorizationFormat {
                    len,
                    expected: lengths.to_vec(),
                })
            }
        }
        _ => Ok(()),
    }
}

/// Left-pad a reference with zeros to `width`. Longer input is kept as is.
pub fn pad_reference(raw: &str, width: usize) -> String {
    format!("{:0>width$}", raw.trim(), width = width)
}

/// Numeric value of a reference, if it is made of ASCII digits only.
pub fn parse_reference(reference: &str) -> Option<u64> {
    if reference.is_empty() || !reference.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    reference.parse().ok()
}

/// A drawn sequence value must be exactly `width` decimal digits.
pub fn check_sequence_value(value: &str, width: usize) -> Result<(), AuthorizationError> {
    if value.len() == width && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AuthorizationError::SequenceFormat {
            value: value.to_string(),
            width,
        })
    }
}
