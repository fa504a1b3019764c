//! Short name generation for the fixed-width name fields.

use std::collections::HashSet;

/// Characters that never make it into a name field.
pub const BAD_CHARS: &str = "\r\n\t";

/// Shortens names to fit a name field under a configurable set of rules.
#[derive(Debug, Clone)]
pub struct MakeShort {
    max_length: usize,
    bad_chars: String,
    must_upper: bool,
    must_unique: bool,
    whitespace_ok: bool,
    repeating_whitespace_ok: bool,
    default_name: String,
    issued: HashSet<String>,
}

impl MakeShort {
    /// Rules used by the device: at most `max_length` characters, control
    /// whitespace removed, case and spacing kept, duplicates allowed.
    pub fn new(max_length: usize, default_name: impl Into<String>) -> Self {
        Self {
            max_length: max_length.max(1),
            bad_chars: BAD_CHARS.to_string(),
            must_upper: false,
            must_unique: false,
            whitespace_ok: true,
            repeating_whitespace_ok: true,
            default_name: default_name.into(),
            issued: HashSet::new(),
        }
    }

    pub fn with_bad_chars(mut self, bad_chars: impl Into<String>) -> Self {
        self.bad_chars = bad_chars.into();
        self
    }

    pub fn with_must_upper(mut self, must_upper: bool) -> Self {
        self.must_upper = must_upper;
        self
    }

    pub fn with_must_unique(mut self, must_unique: bool) -> Self {
        self.must_unique = must_unique;
        self
    }

    pub fn with_whitespace_ok(mut self, whitespace_ok: bool) -> Self {
        self.whitespace_ok = whitespace_ok;
        self
    }

    pub fn with_repeating_whitespace_ok(mut self, repeating_whitespace_ok: bool) -> Self {
        self.repeating_whitespace_ok = repeating_whitespace_ok;
        self
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn shorten(&mut self, name: &str) -> String {
        let mut cleaned: String = name
            .chars()
            .filter(|c| !self.bad_chars.contains(*c))
            .collect();

        if self.must_upper {
            cleaned = cleaned.to_uppercase();
        }

        let cleaned = if !self.whitespace_ok {
            cleaned.chars().filter(|c| !c.is_whitespace()).collect()
        } else if !self.repeating_whitespace_ok {
            collapse_whitespace(cleaned.trim())
        } else {
            cleaned.trim().to_string()
        };

        let base = if cleaned.is_empty() {
            self.default_name.clone()
        } else {
            cleaned
        };

        let mut short = truncate_chars(&base, self.max_length);
        if self.must_unique {
            let mut counter = 1;
            while self.issued.contains(&short) {
                let suffix = format!(".{counter}");
                let keep = self.max_length.saturating_sub(suffix.chars().count());
                short = format!("{}{suffix}", truncate_chars(&base, keep));
                counter += 1;
            }
            self.issued.insert(short.clone());
        }
        short
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_space = false;
    for c in value.chars() {
        if c.is_whitespace() {
            if !previous_space {
                out.push(' ');
            }
            previous_space = true;
        } else {
            out.push(c);
            previous_space = false;
        }
    }
    out
}
