//! URL-safety transform for tokens.
//!
//! Forward: `+` -> `-`, `/` -> `_`, `=` dropped, `:` -> `~`.
//! The inverse is exact for hex-with-delimiter and Base64 output, since
//! neither alphabet contains `-`, `_` or `~`.

use crate::error::ShareError;

/// Apply the URL-safety substitutions.
pub fn to_url_safe(value: &str) -> String {
    value
        .chars()
        .filter_map(|c| match c {
            '+' => Some('-'),
            '/' => Some('_'),
            '=' => None,
            ':' => Some('~'),
            other => Some(other),
        })
        .collect()
}

/// Undo the URL-safety substitutions (padding is not restored).
pub fn from_url_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            '~' => ':',
            other => other,
        })
        .collect()
}

/// Right-pad with `=` to a multiple of four characters.
pub fn restore_padding(value: &str) -> String {
    let mut padded = value.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}

/// Reject any character outside the token alphabet.
///
/// `[A-Za-z0-9_-]`, plus `~` when `allow_tilde` is set.
pub fn check_alphabet(token: &str, allow_tilde: bool) -> Result<(), ShareError> {
    let allowed = |c: char| {
        c.is_ascii_alphanumeric() || c == '-' || c == '_' || (allow_tilde && c == '~')
    };
    match token.chars().find(|&c| !allowed(c)) {
        Some(bad) => Err(ShareError::MalformedToken(format!(
            "invalid character {bad:?} in token"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_unsafe_characters() {
        assert_eq!(to_url_safe("a+b/c=="), "a-b_c");
        assert_eq!(to_url_safe("00ff:11ee:22dd"), "00ff~11ee~22dd");
    }

    #[test]
    fn restores_delimiters() {
        assert_eq!(from_url_safe("00ff~11ee~22dd"), "00ff:11ee:22dd");
        assert_eq!(from_url_safe("a-b_c"), "a+b/c");
    }

    #[test]
    fn hex_with_delimiter_is_bijective() {
        let sealed = "0123456789abcdef:ABCDEF0123456789:deadbeef";
        assert_eq!(from_url_safe(&to_url_safe(sealed)), sealed);
    }

    #[test]
    fn restores_padding_to_multiple_of_four() {
        assert_eq!(restore_padding("abc"), "abc=");
        assert_eq!(restore_padding("ab"), "ab==");
        assert_eq!(restore_padding("abcd"), "abcd");
        assert_eq!(restore_padding(""), "");
    }

    #[test]
    fn alphabet_check() {
        assert!(check_alphabet("abc_DEF-123~x", true).is_ok());
        assert!(check_alphabet("abc~x", false).is_err());
        assert!(check_alphabet("a+b", true).is_err());
        assert!(check_alphabet("a/b", true).is_err());
        assert!(check_alphabet("a=b", true).is_err());
        assert!(check_alphabet("a:b", true).is_err());
        assert!(check_alphabet("é", true).is_err());
    }
}
