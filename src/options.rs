//! Configuration options for parsing.
//!
//! This module provides the types that control a parse pass:
//!
//! - [`IniOptions`]: main configuration struct with builder-style setters
//! - [`DuplicatePolicy`]: resolution strategy for repeated section/key names
//! - [`Limits`]: resource ceilings applied while parsing untrusted input
//!
//! ## Examples
//!
//! ```rust
//! use inifile::{from_str_with_options, DuplicatePolicy, IniOptions};
//!
//! let options = IniOptions::new()
//!     .with_section_policy(DuplicatePolicy::Merge)
//!     .with_key_policy(DuplicatePolicy::LastWin)
//!     .with_max_sections(1000);
//!
//! let doc = from_str_with_options("[a]\nx = 1\n[a]\nx = 2", options).unwrap();
//! assert_eq!(doc.len(), 1);
//! assert_eq!(doc.get("a").unwrap().get("x").unwrap().value(), "2");
//! ```

/// Strategy for resolving duplicate section or key names after a parse pass.
///
/// Section and key policies are independent; see
/// [`IniOptions::with_section_policy`] and [`IniOptions::with_key_policy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the earliest occurrence, drop the rest.
    #[default]
    FirstWin,
    /// Keep the latest occurrence of each name, preserving the relative
    /// order of the surviving entries.
    LastWin,
    /// Fold later occurrences into the first. For sections, later sections'
    /// properties are appended to the first and the key policy is reapplied;
    /// for keys, the first occurrence keeps its position and comments but
    /// takes the latest value.
    Merge,
    /// Treat any repeat as fatal, aborting the whole load.
    ThrowError,
}

/// Resource ceilings consulted while parsing.
///
/// Each limit of `0` means unlimited. A violated limit never aborts the
/// parse; the offending line or entity produces one collected error and is
/// skipped, which bounds memory growth from adversarial input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Limits {
    /// Maximum characters per physical line.
    pub max_line_length: usize,
    /// Maximum characters in an extracted value.
    pub max_value_length: usize,
    /// Maximum number of named sections.
    pub max_sections: usize,
    /// Maximum properties per section.
    pub max_properties: usize,
    /// Maximum comments queued for attachment to the next entity.
    pub max_pending_comments: usize,
}

impl Limits {
    fn within(limit: usize, n: usize) -> bool {
        limit == 0 || n <= limit
    }

    #[must_use]
    pub fn allows_line_length(&self, chars: usize) -> bool {
        Self::within(self.max_line_length, chars)
    }

    #[must_use]
    pub fn allows_value_length(&self, chars: usize) -> bool {
        Self::within(self.max_value_length, chars)
    }

    /// Whether one more section may be added to `current` already parsed.
    #[must_use]
    pub fn allows_section_count(&self, current: usize) -> bool {
        Self::within(self.max_sections, current + 1)
    }

    /// Whether one more property may be added to a section holding `current`.
    #[must_use]
    pub fn allows_property_count(&self, current: usize) -> bool {
        Self::within(self.max_properties, current + 1)
    }

    /// Whether one more comment may be queued alongside `current` pending.
    #[must_use]
    pub fn allows_pending_comments(&self, current: usize) -> bool {
        Self::within(self.max_pending_comments, current + 1)
    }
}

/// Configuration for a parse pass.
///
/// # Examples
///
/// ```rust
/// use inifile::{DuplicatePolicy, IniOptions};
///
/// // Defaults: `;` and `#` comments, FirstWin policies, no limits,
/// // error collection on.
/// let options = IniOptions::new();
///
/// // Hardened for untrusted input
/// let options = IniOptions::new()
///     .with_max_line_length(4096)
///     .with_max_sections(1000)
///     .with_max_properties(10_000)
///     .with_section_policy(DuplicatePolicy::ThrowError);
/// ```
#[derive(Clone, Debug)]
pub struct IniOptions {
    pub comment_prefixes: Vec<char>,
    pub default_comment_prefix: char,
    pub section_policy: DuplicatePolicy,
    pub key_policy: DuplicatePolicy,
    pub collect_errors: bool,
    pub limits: Limits,
}

impl Default for IniOptions {
    fn default() -> Self {
        IniOptions {
            comment_prefixes: vec![';', '#'],
            default_comment_prefix: ';',
            section_policy: DuplicatePolicy::default(),
            key_policy: DuplicatePolicy::default(),
            collect_errors: true,
            limits: Limits::default(),
        }
    }
}

impl IniOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set of characters that start a comment.
    ///
    /// The default comment prefix is kept in sync: if it is not in the new
    /// set, the first character of the set becomes the default.
    #[must_use]
    pub fn with_comment_prefixes(mut self, prefixes: &[char]) -> Self {
        self.comment_prefixes = prefixes.to_vec();
        if !self.comment_prefixes.contains(&self.default_comment_prefix) {
            if let Some(&first) = self.comment_prefixes.first() {
                self.default_comment_prefix = first;
            }
        }
        self
    }

    /// Sets the prefix character used when writing comments.
    ///
    /// The character is added to the recognized prefix set if absent.
    #[must_use]
    pub fn with_default_comment_prefix(mut self, prefix: char) -> Self {
        self.default_comment_prefix = prefix;
        if !self.comment_prefixes.contains(&prefix) {
            self.comment_prefixes.push(prefix);
        }
        self
    }

    /// Sets the duplicate-section resolution policy.
    #[must_use]
    pub fn with_section_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.section_policy = policy;
        self
    }

    /// Sets the duplicate-key resolution policy, applied per section.
    #[must_use]
    pub fn with_key_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.key_policy = policy;
        self
    }

    /// Toggles collection of per-line parse errors on the document.
    ///
    /// Malformed lines are skipped either way; with collection off the
    /// diagnostics are dropped instead of recorded. Default is on.
    #[must_use]
    pub fn with_collect_errors(mut self, collect: bool) -> Self {
        self.collect_errors = collect;
        self
    }

    /// Sets the maximum characters per physical line (0 = unlimited).
    #[must_use]
    pub fn with_max_line_length(mut self, limit: usize) -> Self {
        self.limits.max_line_length = limit;
        self
    }

    /// Sets the maximum characters per extracted value (0 = unlimited).
    #[must_use]
    pub fn with_max_value_length(mut self, limit: usize) -> Self {
        self.limits.max_value_length = limit;
        self
    }

    /// Sets the maximum number of named sections (0 = unlimited).
    #[must_use]
    pub fn with_max_sections(mut self, limit: usize) -> Self {
        self.limits.max_sections = limit;
        self
    }

    /// Sets the maximum properties per section (0 = unlimited).
    #[must_use]
    pub fn with_max_properties(mut self, limit: usize) -> Self {
        self.limits.max_properties = limit;
        self
    }

    /// Sets the maximum queued pre-comments (0 = unlimited). When exceeded
    /// the oldest pending comment is dropped.
    #[must_use]
    pub fn with_max_pending_comments(mut self, limit: usize) -> Self {
        self.limits.max_pending_comments = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_means_unlimited() {
        let limits = Limits::default();
        assert!(limits.allows_line_length(usize::MAX));
        assert!(limits.allows_section_count(usize::MAX - 1));
    }

    #[test]
    fn limits_are_inclusive() {
        let limits = Limits {
            max_sections: 2,
            ..Limits::default()
        };
        assert!(limits.allows_section_count(0));
        assert!(limits.allows_section_count(1));
        assert!(!limits.allows_section_count(2));
    }

    #[test]
    fn prefix_setters_stay_consistent() {
        let options = IniOptions::new().with_comment_prefixes(&['!']);
        assert_eq!(options.default_comment_prefix, '!');

        let options = IniOptions::new().with_default_comment_prefix('%');
        assert!(options.comment_prefixes.contains(&'%'));
    }
}
