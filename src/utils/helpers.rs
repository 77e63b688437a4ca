/// Helper utilities shared by the panels and the CLI

use chrono::{DateTime, Local};
use rand::Rng;

/// Format bytes to human-readable size
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Format duration to human-readable string
pub fn format_duration(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}

/// Wall-clock time of day, as shown in front of console lines
pub fn format_clock(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Truncate string with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Mask sensitive data (show only first and last N characters)
pub fn mask_sensitive(value: &str, visible_chars: usize) -> String {
    if value.len() <= visible_chars * 2 {
        "*".repeat(value.len())
    } else {
        let start = &value[..visible_chars];
        let end = &value[value.len() - visible_chars..];
        format!("{}...{}", start, end)
    }
}

/// Generate a random lowercase base-36 string of the given length
pub fn generate_token(length: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Validate domain name (basic check)
pub fn is_valid_domain(domain: &str) -> bool {
    let parts: Vec<&str> = domain.split('.').collect();
    if parts.len() < 2 {
        return false;
    }

    parts.iter().all(|part| {
        !part.is_empty()
        && part.chars().all(|c| c.is_alphanumeric() || c == '-')
        && !part.starts_with('-')
        && !part.ends_with('-')
    })
}

/// Validate email address (basic check)
pub fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    !parts[0].is_empty() && is_valid_domain(parts[1])
}
