//! Greedy word wrapping for help output.

/// Wraps `text` to `width` columns, indenting every line by `indent`
/// spaces. A word longer than the width gets a line of its own rather than
/// being split.
///
/// # Examples
///
/// ```
/// use argtree_core::wordwrap;
///
/// let wrapped = wordwrap("one two three", 2, 9);
/// assert_eq!(wrapped, "  one two\n  three");
/// ```
pub fn wordwrap(text: &str, indent: usize, width: usize) -> String {
    let prefix = " ".repeat(indent);
    let mut lines: Vec<String> = Vec::new();
    let mut buffer = prefix.clone();

    for word in text.split_whitespace() {
        if buffer.len() == prefix.len() {
            buffer.push_str(word);
        } else if buffer.len() + 1 + word.len() <= width {
            buffer.push(' ');
            buffer.push_str(word);
        } else {
            lines.push(buffer);
            buffer = format!("{prefix}{word}");
        }
    }

    if buffer.len() > prefix.len() {
        lines.push(buffer);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_at_width() {
        let wrapped = wordwrap("aa bb cc dd", 0, 5);
        assert_eq!(wrapped, "aa bb\ncc dd");
    }

    #[test]
    fn test_indents_every_line() {
        let wrapped = wordwrap("aa bb cc", 4, 10);
        assert_eq!(wrapped, "    aa bb\n    cc");
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let wrapped = wordwrap("short averyveryverylongword end", 0, 10);
        assert_eq!(wrapped, "short\naveryveryverylongword\nend");
    }

    #[test]
    fn test_empty_text_yields_empty_string() {
        assert_eq!(wordwrap("", 4, 78), "");
        assert_eq!(wordwrap("   ", 4, 78), "");
    }
}
