use missinglink_api::types::CaseID;
use missinglink_api::SortDirection;

use crate::error::MissingLinkError;

pub const MAX_SORT_FIELD_LENGTH: usize = 64;

/// Parses a case id as typed by a user.
pub fn parse_case_id(input: &str) -> Result<CaseID, MissingLinkError> {
    input
        .trim()
        .parse::<CaseID>()
        .map_err(|_| MissingLinkError::InvalidInput(format!("Invalid Case Id {}", input)))
}

/// Parses `Field`, `Field:asc`, `Field:desc` or `Field desc` into a sort
/// criterion. Field names are limited to ASCII letters, digits, `_` and `.`.
pub fn parse_sort(input: &str) -> Result<(String, SortDirection), MissingLinkError> {
    let trimmed = input.trim();
    let (field, direction) = match trimmed.split_once(|c: char| c == ':' || c == ' ') {
        Some((field, dir)) => {
            let direction = dir.parse::<SortDirection>().map_err(|_| {
                MissingLinkError::InvalidInput(format!(
                    "unknown sort direction '{}' (expected asc or desc)",
                    dir.trim()
                ))
            })?;
            (field.trim(), direction)
        }
        None => (trimmed, SortDirection::Asc),
    };
    validate_sort_field(field)?;
    Ok((field.to_string(), direction))
}

fn validate_sort_field(field: &str) -> Result<(), MissingLinkError> {
    if field.is_empty() {
        return Err(MissingLinkError::InvalidInput(
            "sort field must not be empty".to_string(),
        ));
    }
    if field.len() > MAX_SORT_FIELD_LENGTH {
        return Err(MissingLinkError::InvalidInput(format!(
            "sort field exceeds maximum length of {} bytes",
            MAX_SORT_FIELD_LENGTH
        )));
    }
    if let Some(bad) = field
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '.'))
    {
        return Err(MissingLinkError::InvalidInput(format!(
            "invalid character '{}' in sort field '{}'",
            bad, field
        )));
    }
    Ok(())
}
