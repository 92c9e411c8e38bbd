//! The line classifier and quoted-value tokenizer.
//!
//! Parsing is a single pass over physical lines. Each line is classified as
//! blank, comment, section header, or key/value; there are no continuation
//! lines. Comment lines queue up as "pending" comments and attach to the
//! next section or property. Malformed lines are skipped with a collected
//! diagnostic so one bad line never poisons the rest of the file, and the
//! configured [`Limits`](crate::Limits) bound sections, properties, line and
//! value lengths, and the pending-comment queue against adversarial input.
//!
//! After the pass the name indexes are rebuilt once and the duplicate
//! resolver applies the configured section and key policies.
//!
//! ## Usage
//!
//! Most users should use the entry points in the crate root:
//!
//! ```rust
//! let doc = inifile::from_str("[Db]\nHost = \"local host\"\n; note\nPort = 5432").unwrap();
//!
//! let db = doc.get("Db").unwrap();
//! assert_eq!(db.get("Host").unwrap().value(), "local host");
//! assert_eq!(db.get("Port").unwrap().pre_comments().to_text(), " note");
//! ```

use std::collections::VecDeque;

use indexmap::IndexSet;
use tracing::debug;

use crate::comment::{Comment, CommentCollection};
use crate::document::Document;
use crate::error::{ParseError, ParseErrorKind};
use crate::escape::unescape_char;
use crate::options::IniOptions;
use crate::property::Property;
use crate::resolve;
use crate::section::Section;
use crate::Result;

/// The INI parser.
///
/// Holds the configuration for a parse pass; one parser can parse any number
/// of inputs. Created via [`Parser::new`].
pub struct Parser {
    options: IniOptions,
}

/// Where parsed properties currently land.
enum Target {
    Default,
    /// Index into the document's raw section list.
    Named(usize),
}

impl Parser {
    #[must_use]
    pub fn new(options: IniOptions) -> Self {
        Parser { options }
    }

    /// Parses `input` into a [`Document`].
    ///
    /// # Errors
    ///
    /// Fails only when a `ThrowError` duplicate policy encounters a repeated
    /// name; every other problem is recorded as a collected
    /// [`ParseError`](crate::ParseError) and parsing continues.
    pub fn parse(&self, input: &str) -> Result<Document> {
        let mut doc = Document::new();
        doc.set_comment_prefixes(IndexSet::from_iter(
            self.options.comment_prefixes.iter().copied(),
        ));
        doc.set_default_comment_prefix(self.options.default_comment_prefix);

        let mut pending: VecDeque<Comment> = VecDeque::new();
        let mut target = Target::Default;

        for (number, raw) in input.lines().enumerate() {
            let number = number + 1;

            if !self.options.limits.allows_line_length(raw.chars().count()) {
                self.record(&mut doc, number, raw, ParseErrorKind::LineTooLong);
                continue;
            }

            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let first = line.chars().next().unwrap_or_default();
            if self.options.comment_prefixes.contains(&first) {
                self.queue_comment(&mut doc, &mut pending, number, raw, line, first);
            } else if first == '[' {
                self.parse_section_header(&mut doc, &mut pending, &mut target, number, raw, line);
            } else {
                self.parse_key_value(&mut doc, &mut pending, &target, number, raw, line);
            }
        }

        // One index rebuild for the whole pass, then duplicate resolution.
        doc.rebuild_index();
        for section in doc.sections_mut() {
            section.rebuild_index();
        }
        resolve::apply(
            &mut doc,
            self.options.section_policy,
            self.options.key_policy,
        )?;
        Ok(doc)
    }

    fn record(&self, doc: &mut Document, line: usize, raw: &str, kind: ParseErrorKind) {
        debug!(line, ?kind, "skipping malformed line");
        if self.options.collect_errors {
            doc.record_error(ParseError::new(line, raw, kind));
        }
    }

    fn queue_comment(
        &self,
        doc: &mut Document,
        pending: &mut VecDeque<Comment>,
        number: usize,
        raw: &str,
        line: &str,
        prefix: char,
    ) {
        let text = &line[prefix.len_utf8()..];
        if !self.options.limits.allows_pending_comments(pending.len()) {
            pending.pop_front();
            self.record(doc, number, raw, ParseErrorKind::TooManyPendingComments);
        }
        // Validation cannot fail: trimmed single lines carry no line break.
        if let Ok(comment) = Comment::with_prefix(text, prefix) {
            pending.push_back(comment);
        }
    }

    fn parse_section_header(
        &self,
        doc: &mut Document,
        pending: &mut VecDeque<Comment>,
        target: &mut Target,
        number: usize,
        raw: &str,
        line: &str,
    ) {
        let Some(close) = line.find(']') else {
            self.record(doc, number, raw, ParseErrorKind::MissingClosingBracket);
            return;
        };
        let name = line[1..close].trim();
        if name.is_empty() {
            self.record(doc, number, raw, ParseErrorKind::EmptySectionName);
            return;
        }
        if !self.options.limits.allows_section_count(doc.len()) {
            self.record(doc, number, raw, ParseErrorKind::TooManySections);
            return;
        }

        // Construction failures become collected errors, never a panic or
        // a propagated Err out of the parse.
        let Ok(mut section) = Section::new(name) else {
            self.record(doc, number, raw, ParseErrorKind::InvalidSectionName);
            return;
        };
        section.set_pre_comments(pending.drain(..).collect::<CommentCollection>());

        let rest = line[close + 1..].trim();
        if !rest.is_empty() {
            match self.split_inline_comment(rest) {
                Some(comment) => section.set_comment(Some(comment)),
                None => {
                    // Junk after `]`: report it, keep the section.
                    self.record(doc, number, raw, ParseErrorKind::TrailingContent);
                }
            }
        }

        *target = Target::Named(doc.len());
        doc.push_raw(section);
    }

    fn parse_key_value(
        &self,
        doc: &mut Document,
        pending: &mut VecDeque<Comment>,
        target: &Target,
        number: usize,
        raw: &str,
        line: &str,
    ) {
        let Some(equals) = line.find('=') else {
            self.record(doc, number, raw, ParseErrorKind::MissingEquals);
            return;
        };
        let key = line[..equals].trim();
        if key.is_empty() {
            self.record(doc, number, raw, ParseErrorKind::EmptyKey);
            return;
        }

        let region = line[equals + 1..].trim_start();
        let (value, quoted, inline) = match self.tokenize_value(region) {
            Ok(parts) => parts,
            Err(kind) => {
                self.record(doc, number, raw, kind);
                return;
            }
        };

        if !self.options.limits.allows_value_length(value.chars().count()) {
            self.record(doc, number, raw, ParseErrorKind::ValueTooLong);
            return;
        }
        let current_len = match target {
            Target::Default => doc.default_section().len(),
            Target::Named(i) => doc.sections()[*i].len(),
        };
        if !self.options.limits.allows_property_count(current_len) {
            self.record(doc, number, raw, ParseErrorKind::TooManyProperties);
            return;
        }

        let constructed = if quoted {
            Property::new_quoted(key, &value)
        } else {
            Property::new(key, &value)
        };
        let Ok(mut property) = constructed else {
            self.record(doc, number, raw, ParseErrorKind::EmptyKey);
            return;
        };
        property.set_pre_comments(pending.drain(..).collect::<CommentCollection>());
        property.set_comment(inline);

        match target {
            Target::Default => doc.default_section_mut().push_raw(property),
            Target::Named(i) => {
                // Raw append; duplicates are resolved after the pass.
                doc.section_raw_mut(*i).push_raw(property);
            }
        }
    }

    /// Tokenizes the value region (text after `=`, already left-trimmed).
    ///
    /// Returns the extracted value, whether the quoted branch was taken, and
    /// the inline comment if one followed.
    fn tokenize_value(
        &self,
        region: &str,
    ) -> std::result::Result<(String, bool, Option<Comment>), ParseErrorKind> {
        if region.is_empty() {
            return Ok((String::new(), false, None));
        }
        if region.starts_with('"') {
            self.tokenize_quoted(region)
        } else {
            self.tokenize_unquoted(region)
        }
    }

    fn tokenize_quoted(
        &self,
        region: &str,
    ) -> std::result::Result<(String, bool, Option<Comment>), ParseErrorKind> {
        let mut value = String::new();
        let mut chars = region.char_indices();
        chars.next(); // opening quote

        let mut close_end = None;
        while let Some((i, ch)) = chars.next() {
            match ch {
                '"' => {
                    close_end = Some(i + 1);
                    break;
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => value.push(unescape_char(escaped)),
                    None => return Err(ParseErrorKind::IncompleteEscape),
                },
                other => value.push(other),
            }
        }
        let Some(close_end) = close_end else {
            return Err(ParseErrorKind::UnterminatedQuote);
        };

        let rest = region[close_end..].trim();
        let inline = if rest.is_empty() {
            None
        } else {
            match self.split_inline_comment(rest) {
                Some(comment) => Some(comment),
                None => return Err(ParseErrorKind::TrailingContent),
            }
        };
        Ok((value, true, inline))
    }

    fn tokenize_unquoted(
        &self,
        region: &str,
    ) -> std::result::Result<(String, bool, Option<Comment>), ParseErrorKind> {
        let (value, inline) = match region.find(|c| self.options.comment_prefixes.contains(&c)) {
            Some(at) => {
                let prefix = region[at..].chars().next().unwrap_or_default();
                let text = &region[at + prefix.len_utf8()..];
                let comment = Comment::with_prefix(text, prefix)
                    .map_err(|_| ParseErrorKind::TrailingContent)?;
                (region[..at].trim_end(), Some(comment))
            }
            None => (region.trim_end(), None),
        };
        // A value ending in a quote suggests a misplaced opening quote.
        if value.ends_with('"') {
            return Err(ParseErrorKind::InvalidQuoteFormat);
        }
        Ok((value.to_string(), false, inline))
    }

    /// Splits `rest` into an inline comment if it starts with a recognized
    /// prefix character; `None` means the content is not a comment.
    fn split_inline_comment(&self, rest: &str) -> Option<Comment> {
        let first = rest.chars().next()?;
        if !self.options.comment_prefixes.contains(&first) {
            return None;
        }
        Comment::with_prefix(&rest[first.len_utf8()..], first).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DuplicatePolicy;

    fn parse(input: &str) -> Document {
        Parser::new(IniOptions::new()).parse(input).unwrap()
    }

    #[test]
    fn classifies_blank_comment_section_keyvalue() {
        let doc = parse("\n; banner\n[s]\nk = v\n\n");
        assert_eq!(doc.len(), 1);
        let section = doc.get("s").unwrap();
        assert_eq!(section.pre_comments().to_text(), " banner");
        assert_eq!(section.get("k").unwrap().value(), "v");
    }

    #[test]
    fn properties_before_any_header_go_to_default_section() {
        let doc = parse("top = 1\n[s]\ninner = 2");
        assert_eq!(doc.default_section().get("top").unwrap().value(), "1");
        assert_eq!(doc.get("s").unwrap().get("inner").unwrap().value(), "2");
    }

    #[test]
    fn quoted_value_with_escapes() {
        let doc = parse(r#"k = "a\tb\;c\"d\\e\zf""#);
        let value = doc.default_section().get("k").unwrap().value().to_string();
        assert_eq!(value, "a\tb;c\"d\\ezf");
        assert!(doc.default_section().get("k").unwrap().is_quoted());
    }

    #[test]
    fn unterminated_quote_and_incomplete_escape_are_distinct() {
        let doc = parse("a = \"open\nb = \"half\\");
        let kinds: Vec<_> = doc.parse_errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParseErrorKind::UnterminatedQuote,
                ParseErrorKind::IncompleteEscape
            ]
        );
        assert!(doc.default_section().is_empty());
    }

    #[test]
    fn trailing_content_after_closing_quote() {
        let doc = parse("a = \"v\" junk");
        assert_eq!(doc.parse_errors()[0].kind, ParseErrorKind::TrailingContent);
        assert!(doc.default_section().get("a").is_none());

        let doc = parse("a = \"v\" ; fine");
        let a = doc.default_section().get("a").unwrap();
        assert_eq!(a.value(), "v");
        assert_eq!(a.comment().unwrap().value(), " fine");
    }

    #[test]
    fn unquoted_value_stops_at_comment_prefix() {
        let doc = parse("path = /usr/bin # install dir");
        let p = doc.default_section().get("path").unwrap();
        assert_eq!(p.value(), "/usr/bin");
        assert_eq!(p.comment().unwrap().prefix(), '#');
        assert_eq!(p.comment().unwrap().value(), " install dir");
    }

    #[test]
    fn unquoted_value_ending_in_quote_is_invalid() {
        let doc = parse("k = oops\"");
        assert_eq!(
            doc.parse_errors()[0].kind,
            ParseErrorKind::InvalidQuoteFormat
        );
    }

    #[test]
    fn empty_value_is_empty_string() {
        let doc = parse("k =");
        assert_eq!(doc.default_section().get("k").unwrap().value(), "");
    }

    #[test]
    fn section_header_errors() {
        let doc = parse("[open\n[]\n[ok] trailing junk");
        let kinds: Vec<_> = doc.parse_errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParseErrorKind::MissingClosingBracket,
                ParseErrorKind::EmptySectionName,
                ParseErrorKind::TrailingContent,
            ]
        );
        // the junk is reported but the section itself survives
        assert!(doc.get("ok").is_some());
    }

    #[test]
    fn section_header_inline_comment() {
        let doc = parse("[db] ; connection settings");
        let section = doc.get("db").unwrap();
        assert_eq!(section.comment().unwrap().value(), " connection settings");
    }

    #[test]
    fn missing_equals_and_empty_key() {
        let doc = parse("no equals here\n= value");
        let kinds: Vec<_> = doc.parse_errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ParseErrorKind::MissingEquals, ParseErrorKind::EmptyKey]
        );
    }

    #[test]
    fn pending_comments_attach_fifo() {
        let doc = parse("; one\n; two\nk = v");
        let p = doc.default_section().get("k").unwrap();
        assert_eq!(p.pre_comments().to_text(), " one\n two");
    }

    #[test]
    fn pending_comment_bound_drops_oldest() {
        let options = IniOptions::new().with_max_pending_comments(2);
        let doc = Parser::new(options)
            .parse("; a\n; b\n; c\nk = v")
            .unwrap();
        let p = doc.default_section().get("k").unwrap();
        assert_eq!(p.pre_comments().to_text(), " b\n c");
        assert_eq!(
            doc.parse_errors()[0].kind,
            ParseErrorKind::TooManyPendingComments
        );
    }

    #[test]
    fn collect_errors_off_still_skips_lines() {
        let options = IniOptions::new().with_collect_errors(false);
        let doc = Parser::new(options).parse("[broken\nk = v").unwrap();
        assert!(doc.parse_errors().is_empty());
        assert_eq!(doc.default_section().get("k").unwrap().value(), "v");
    }

    #[test]
    fn throw_error_policy_aborts_load() {
        let options = IniOptions::new().with_section_policy(DuplicatePolicy::ThrowError);
        let result = Parser::new(options).parse("[a]\n[a]");
        assert!(result.is_err());
    }

    #[test]
    fn custom_comment_prefixes() {
        let options = IniOptions::new().with_comment_prefixes(&['!']);
        let doc = Parser::new(options).parse("! note\nk = a;b ! tail").unwrap();
        let p = doc.default_section().get("k").unwrap();
        // `;` is no longer a comment prefix, so it stays in the value
        assert_eq!(p.value(), "a;b");
        assert_eq!(p.comment().unwrap().value(), " tail");
        assert_eq!(p.pre_comments().to_text(), " note");
    }
}
