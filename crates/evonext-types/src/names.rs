//! Name-label helpers for the platform name service.
//!
//! Labels are normalized to a homograph-safe form before resolution so that
//! visually confusable registrations (`alice` vs `a1ice`) resolve to the
//! same entry.

/// Minimum label length accepted for resolution.
pub const MIN_LABEL_LEN: usize = 3;

/// Maximum label length accepted for resolution.
pub const MAX_LABEL_LEN: usize = 20;

/// Fold a label to its homograph-safe form: lowercase, with `o` mapped to
/// `0` and `i`/`l` mapped to `1`.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'o' => '0',
            'i' | 'l' => '1',
            other => other,
        })
        .collect()
}

/// Whether a label is acceptable for resolution: 3 to 20 characters, each
/// ASCII alphanumeric or underscore.
pub fn is_valid_label(label: &str) -> bool {
    let len = label.chars().count();
    if !(MIN_LABEL_LEN..=MAX_LABEL_LEN).contains(&len) {
        return false;
    }
    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_homographs() {
        assert_eq!(normalize_label("Alice"), "a11ce");
        assert_eq!(normalize_label("BOB_01"), "b0b_01");
        assert_eq!(normalize_label("lol"), "101");
    }

    #[test]
    fn normalize_leaves_safe_chars() {
        assert_eq!(normalize_label("user_42"), "user_42");
    }

    #[test]
    fn valid_labels() {
        assert!(is_valid_label("abc"));
        assert!(is_valid_label("user_42"));
        assert!(is_valid_label("A2345678901234567890")); // exactly 20 chars
    }

    #[test]
    fn invalid_labels() {
        assert!(!is_valid_label("ab")); // too short
        assert!(!is_valid_label("a".repeat(21).as_str())); // too long
        assert!(!is_valid_label("has space"));
        assert!(!is_valid_label("dash-name"));
        assert!(!is_valid_label(""));
    }
}
