//! Custom `validator` rules and error flattening for HTTP responses.

use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors};

use crate::types::DbId;

/// Accepts `#RGB` and `#RRGGBB` hex colors.
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let valid = value
        .strip_prefix('#')
        .filter(|hex| hex.len() == 3 || hex.len() == 6)
        .is_some_and(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color")
            .with_message("Color must be a hex value such as #1A2B3C".into()))
    }
}

/// Every id in the list must be positive.
#[allow(clippy::ptr_arg)]
pub fn validate_positive_ids(ids: &Vec<DbId>) -> Result<(), ValidationError> {
    if ids.iter().any(|id| *id < 1) {
        return Err(ValidationError::new("range").with_message("Ids must be positive".into()));
    }
    Ok(())
}

/// Flatten `validator` output into `field -> [message]`.
///
/// Field names are reported in camelCase to match the JSON payloads. Errors
/// without an explicit message fall back to their rule code.
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Failed rule '{}'", e.code),
                })
                .collect();
            (camel_case(&field), messages)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// One-line summary of a set of field errors, used as the envelope message.
pub fn summarize(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, msgs)| format!("{field}: {}", msgs.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
