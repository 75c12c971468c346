//! Hashtag and mention extraction.
//!
//! A candidate is a `#` or `@` followed by a run of ASCII alphanumeric or
//! underscore characters. Runs longer than [`MAX_TAG_CHARS`] are truncated
//! to the limit, matching the platform schema's field bound.

/// Maximum characters in a hashtag or mention label.
pub const MAX_TAG_CHARS: usize = 100;

/// All hashtag labels in `content`, in order, without the `#`.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    extract_tagged(content, '#')
}

/// All mention labels in `content`, in order, without the `@`.
pub fn extract_mentions(content: &str) -> Vec<String> {
    extract_tagged(content, '@')
}

fn extract_tagged(content: &str, sigil: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c != sigil {
            continue;
        }
        let mut label = String::new();
        while let Some(&next) = chars.peek() {
            if !(next.is_ascii_alphanumeric() || next == '_') {
                break;
            }
            if label.len() < MAX_TAG_CHARS {
                label.push(next);
            }
            chars.next();
        }
        if !label.is_empty() {
            out.push(label);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_all_hashtags_in_order() {
        assert_eq!(extract_hashtags("hi #one #two"), vec!["one", "two"]);
    }

    #[test]
    fn finds_all_mentions_in_order() {
        assert_eq!(extract_mentions("cc @alice and @bob_1"), vec!["alice", "bob_1"]);
    }

    #[test]
    fn bare_sigil_is_not_a_tag() {
        assert!(extract_hashtags("just a # sign").is_empty());
        assert!(extract_mentions("end of sentence @").is_empty());
    }

    #[test]
    fn run_stops_at_non_word_chars() {
        assert_eq!(extract_hashtags("#tag!more"), vec!["tag"]);
        assert_eq!(extract_hashtags("#a-b"), vec!["a"]);
    }

    #[test]
    fn sigil_inside_word_still_matches() {
        assert_eq!(extract_hashtags("a#b"), vec!["b"]);
    }

    #[test]
    fn long_runs_are_truncated() {
        let long = "x".repeat(150);
        let tags = extract_hashtags(&format!("#{long}"));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].len(), MAX_TAG_CHARS);
    }

    #[test]
    fn unicode_content_is_skipped_safely() {
        assert_eq!(extract_hashtags("héllo #tag café"), vec!["tag"]);
        // Run stops at the first non-ASCII character
        assert_eq!(extract_hashtags("#héllo"), vec!["h"]);
    }

    #[test]
    fn empty_and_plain_content() {
        assert!(extract_hashtags("").is_empty());
        assert!(extract_hashtags("no tags here").is_empty());
    }
}
