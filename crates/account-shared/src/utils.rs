//! Utility functions

/// Mask the local part of an email for log output: `jane@x.io` -> `ja***@x.io`.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) if at_pos > 0 => {
            let (local, domain) = email.split_at(at_pos);
            let keep = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 });
            format!("{}***{}", keep.collect::<String>(), domain)
        }
        _ => "***".to_string(),
    }
}

/// Digits with an optional leading `+`.
pub fn is_valid_mobile(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
