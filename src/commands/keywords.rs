//! Keyword management commands
//!
//! Validation happens client-side before any request is sent; conflict
//! and not-found responses surface as transient warnings, while server
//! errors escalate to error messaging because they indicate systemic
//! trouble rather than a single bad request.

use crate::api::{ApiClient, MonitorApi};
use crate::api::error::ApiError;
use crate::consts::cli_consts::keywords::MAX_VALUE_LEN;
use crate::{print_cmd_error, print_cmd_info, print_cmd_success, print_cmd_warn};
use std::error::Error;

/// Client-side validation: trimmed, non-empty, at most the server's
/// maximum length. Resolved before any request leaves the process.
pub fn validate_keyword_value(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Keyword must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_VALUE_LEN {
        return Err(format!(
            "Keyword must be at most {} characters",
            MAX_VALUE_LEN
        ));
    }
    Ok(trimmed.to_string())
}

fn report_server_error(title: &str, error: &ApiError) {
    match error.status() {
        Some(status) if status >= 500 => {
            print_cmd_error!(title, "The monitor backend is failing; try again later");
        }
        _ => {
            print_cmd_error!(title, error.to_string().as_str());
        }
    }
}

/// List configured keywords.
pub async fn run_list(api: &ApiClient) -> Result<(), Box<dyn Error>> {
    match api.keywords().await {
        Ok(list) => {
            print_cmd_info!("Keywords", "{} configured", list.total);
            for keyword in &list.items {
                println!(
                    "  {}  {}  [{}]  added {}",
                    keyword.keyword_id, keyword.value, keyword.status, keyword.created_at
                );
            }
            Ok(())
        }
        Err(e) => {
            report_server_error("Failed to list keywords", &e);
            Err(Box::new(e))
        }
    }
}

/// Add a keyword.
pub async fn run_add(api: &ApiClient, value: &str) -> Result<(), Box<dyn Error>> {
    let value = match validate_keyword_value(value) {
        Ok(value) => value,
        Err(message) => {
            print_cmd_error!("Validation error", message.as_str());
            return Err(message.into());
        }
    };

    match api.create_keyword(&value).await {
        Ok(keyword) => {
            print_cmd_success!(
                "Keyword added",
                "\"{}\" ({})",
                keyword.value,
                keyword.keyword_id
            );
            Ok(())
        }
        Err(e) => match e.status() {
            Some(409) => {
                print_cmd_warn!("Duplicate keyword", "\"{}\" already exists", value);
                Err(Box::new(e))
            }
            Some(400) => {
                print_cmd_error!("Invalid keyword", e.to_string().as_str());
                Err(Box::new(e))
            }
            _ => {
                report_server_error("Failed to add keyword", &e);
                Err(Box::new(e))
            }
        },
    }
}

/// Remove a keyword by id. Deleting an already-gone keyword is treated
/// as done: the listing it was invalidating no longer references it.
pub async fn run_remove(api: &ApiClient, keyword_id: &str) -> Result<(), Box<dyn Error>> {
    match api.delete_keyword(keyword_id).await {
        Ok(()) => {
            print_cmd_success!("Keyword removed", "{}", keyword_id);
            Ok(())
        }
        Err(e) => match e.status() {
            Some(404) => {
                print_cmd_warn!("Keyword not found", "{} was already deleted", keyword_id);
                Ok(())
            }
            _ => {
                report_server_error("Failed to remove keyword", &e);
                Err(Box::new(e))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_empty_and_whitespace() {
        assert!(validate_keyword_value("").is_err());
        assert!(validate_keyword_value("   ").is_err());
    }

    #[test]
    fn validation_trims_and_accepts_normal_values() {
        assert_eq!(validate_keyword_value("  acme  ").unwrap(), "acme");
    }

    #[test]
    fn validation_enforces_max_length() {
        let max = "a".repeat(MAX_VALUE_LEN);
        assert!(validate_keyword_value(&max).is_ok());
        let too_long = "a".repeat(MAX_VALUE_LEN + 1);
        assert!(validate_keyword_value(&too_long).is_err());
    }
}
