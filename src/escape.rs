//! Reversible protection of template-syntax characters inside argument
//! values.
//!
//! When a string argument is substituted into a message, any literal `{`,
//! `}`, or `'` it contains must not be confused with template syntax by an
//! outer formatting pass. [`protect`] swaps those characters for reserved
//! noncharacter codepoints before substitution; [`restore`] swaps them back
//! in one final pass over the fully assembled result. Both functions are
//! total: every input produces an output and `restore(protect(s)) == s`.

/// Stand-in for a literal `{` inside an argument value
const OPEN_MARK: char = '\u{FDD0}';
/// Stand-in for a literal `}` inside an argument value
const CLOSE_MARK: char = '\u{FDD1}';
/// Stand-in for a literal `'` inside an argument value
const QUOTE_MARK: char = '\u{FDD2}';

/// Replace template-syntax characters with their reserved stand-ins.
pub fn protect(value: &str) -> String {
    if !value.contains(['{', '}', '\'']) {
        return value.to_string();
    }
    value
        .chars()
        .map(|ch| match ch {
            '{' => OPEN_MARK,
            '}' => CLOSE_MARK,
            '\'' => QUOTE_MARK,
            other => other,
        })
        .collect()
}

/// Replace reserved stand-ins with their original characters.
pub fn restore(rendered: &str) -> String {
    if !rendered.contains([OPEN_MARK, CLOSE_MARK, QUOTE_MARK]) {
        return rendered.to_string();
    }
    rendered
        .chars()
        .map(|ch| match ch {
            OPEN_MARK => '{',
            CLOSE_MARK => '}',
            QUOTE_MARK => '\'',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let value = "it's {braced} text";
        assert_eq!(restore(&protect(value)), value);
    }

    #[test]
    fn test_protected_text_has_no_syntax_chars() {
        let protected = protect("{x} and '}'");
        assert!(!protected.contains('{'));
        assert!(!protected.contains('}'));
        assert!(!protected.contains('\''));
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(protect("no syntax here"), "no syntax here");
        assert_eq!(restore("no marks here"), "no marks here");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(protect(""), "");
        assert_eq!(restore(""), "");
    }
}
