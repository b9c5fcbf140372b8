//! Token classification.
//!
//! A hand-written character scanner classifies each raw token; no regex
//! engine is involved here. The accepted grammar:
//!
//! - short option cluster: `-` followed by one or more ASCII alphanumerics
//!   (`-v`, `-abc`); the first character is the flag, the remainder is
//!   re-queued by the parse driver as a fresh `-<rest>` token.
//! - long option: `--` followed by an ASCII letter, then letters, digits or
//!   dashes, optionally `=value` (`--verbose`, `--level=3`).
//! - the exact token `--`: literal-mode marker.
//! - anything else: operand or subcommand candidate.

/// Classification of one raw input token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Short option cluster. `flag` is the dash plus first character
    /// (`"-a"`); `rest` holds any trailing cluster characters (`"bc"` for
    /// `-abc`, empty for a lone `-a`).
    Short { flag: String, rest: String },
    /// Long option. `flag` is the name including the leading dashes;
    /// `attached` holds the part after `=`, if present (`--x=` yields
    /// `Some("")`).
    Long { flag: String, attached: Option<String> },
    /// The literal marker `--`.
    LiteralMarker,
    /// Not an option shape; candidate operand or subcommand name.
    Word,
}

/// Classifies one raw token.
///
/// # Examples
///
/// ```
/// use argtree_core::{classify, Token};
///
/// assert_eq!(
///     classify("-abc"),
///     Token::Short { flag: "-a".into(), rest: "bc".into() }
/// );
/// assert_eq!(
///     classify("--level=3"),
///     Token::Long { flag: "--level".into(), attached: Some("3".into()) }
/// );
/// assert_eq!(classify("--"), Token::LiteralMarker);
/// assert_eq!(classify("build"), Token::Word);
/// ```
pub fn classify(token: &str) -> Token {
    if token == "--" {
        return Token::LiteralMarker;
    }

    if let Some(body) = token.strip_prefix("--") {
        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (body, None),
        };
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) => {
                first.is_ascii_alphabetic()
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
            }
            None => false,
        };
        if valid {
            return Token::Long {
                flag: format!("--{name}"),
                attached,
            };
        }
        return Token::Word;
    }

    if let Some(body) = token.strip_prefix('-') {
        if !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric()) {
            let first = body.chars().next().unwrap_or_default();
            return Token::Short {
                flag: format!("-{first}"),
                rest: body[first.len_utf8()..].to_string(),
            };
        }
        return Token::Word;
    }

    Token::Word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_cluster_shapes() {
        assert_eq!(
            classify("-v"),
            Token::Short {
                flag: "-v".into(),
                rest: String::new()
            }
        );
        assert_eq!(
            classify("-vvv"),
            Token::Short {
                flag: "-v".into(),
                rest: "vv".into()
            }
        );
        assert_eq!(
            classify("-1"),
            Token::Short {
                flag: "-1".into(),
                rest: String::new()
            }
        );
    }

    #[test]
    fn test_long_shapes() {
        assert_eq!(
            classify("--verbose"),
            Token::Long {
                flag: "--verbose".into(),
                attached: None
            }
        );
        assert_eq!(
            classify("--dry-run"),
            Token::Long {
                flag: "--dry-run".into(),
                attached: None
            }
        );
        assert_eq!(
            classify("--name=value=more"),
            Token::Long {
                flag: "--name".into(),
                attached: Some("value=more".into())
            }
        );
        assert_eq!(
            classify("--name="),
            Token::Long {
                flag: "--name".into(),
                attached: Some(String::new())
            }
        );
    }

    #[test]
    fn test_rejected_option_shapes_fall_through_to_word() {
        assert_eq!(classify("-"), Token::Word);
        assert_eq!(classify("-a-b"), Token::Word);
        assert_eq!(classify("--1abc"), Token::Word);
        assert_eq!(classify("--=x"), Token::Word);
        assert_eq!(classify("---x"), Token::Word);
        assert_eq!(classify("plain"), Token::Word);
        assert_eq!(classify(""), Token::Word);
    }

    #[test]
    fn test_literal_marker_is_exact() {
        assert_eq!(classify("--"), Token::LiteralMarker);
        assert_eq!(classify("---"), Token::Word);
    }
}
