//! The escape table shared by the quoted-value tokenizer and the writer.
//!
//! Quoted values support a fixed set of backslash escapes:
//!
//! | Escape | Character |
//! |--------|-----------|
//! | `\0`   | NUL       |
//! | `\a`   | BEL       |
//! | `\b`   | backspace |
//! | `\t`   | tab       |
//! | `\r`   | carriage return |
//! | `\n`   | line feed |
//! | `\;`   | `;`       |
//! | `\#`   | `#`       |
//! | `\"`   | `"`       |
//! | `\\`   | `\`       |
//!
//! Any other character after a backslash is taken literally (lenient parsing,
//! not an error). The writer escapes exactly the characters this table can
//! produce, so escaping and unescaping are inverses of each other.

/// Characters that force a value to be written quoted.
///
/// A value containing any of these, or with leading/trailing whitespace,
/// cannot survive the unquoted grammar and is auto-promoted to quoted form
/// by the writer.
pub(crate) const SPECIAL_CHARS: &[char] = &[
    ';', '#', '\r', '\n', '\t', '\0', '\u{0007}', '\u{0008}', '\\', '"',
];

/// Maps the character following a backslash to the character it denotes.
///
/// Unknown escapes pass the literal character through.
pub(crate) fn unescape_char(ch: char) -> char {
    match ch {
        '0' => '\0',
        'a' => '\u{0007}',
        'b' => '\u{0008}',
        't' => '\t',
        'r' => '\r',
        'n' => '\n',
        other => other, // covers ; # " \ and the lenient fallthrough
    }
}

/// Appends `value` to `out` with every special character escaped.
///
/// Exact inverse of the tokenizer: `unescape(escape(s)) == s` for any `s`.
pub(crate) fn escape_into(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '\0' => out.push_str("\\0"),
            '\u{0007}' => out.push_str("\\a"),
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ';' => out.push_str("\\;"),
            '#' => out.push_str("\\#"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
}

/// True when a value cannot be written unquoted without changing meaning.
pub(crate) fn needs_quoting(value: &str) -> bool {
    value.contains(SPECIAL_CHARS)
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_table_is_bijective() {
        for &ch in SPECIAL_CHARS {
            let mut escaped = String::new();
            escape_into(&ch.to_string(), &mut escaped);
            assert!(escaped.starts_with('\\'), "{ch:?} must escape");
            let tail = escaped.chars().nth(1).unwrap();
            assert_eq!(unescape_char(tail), ch);
        }
    }

    #[test]
    fn unknown_escape_passes_through() {
        assert_eq!(unescape_char('z'), 'z');
        assert_eq!(unescape_char('%'), '%');
    }

    #[test]
    fn plain_text_needs_no_quoting() {
        assert!(!needs_quoting("5432"));
        assert!(!needs_quoting("local host"));
        assert!(needs_quoting(" padded"));
        assert!(needs_quoting("trailing "));
        assert!(needs_quoting("a;b"));
        assert!(needs_quoting("a#b"));
        assert!(needs_quoting("he said \"hi\""));
    }
}
