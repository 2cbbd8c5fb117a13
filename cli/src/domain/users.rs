//! Basic-auth (htpasswd) file model.
//!
//! The file is line-oriented `user:hash`. Lines that are not entries
//! (comments, blanks) are kept verbatim so rewrites never drop them.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::UserError;

#[allow(clippy::expect_used)] // pattern is a compile-time constant
static USER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Entry { user: String, hash: String },
    Other(String),
}

/// Parsed htpasswd file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtpasswdFile {
    lines: Vec<Line>,
}

impl HtpasswdFile {
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let lines = content
            .lines()
            .map(|line| match line.split_once(':') {
                Some((user, hash)) if !user.is_empty() && !user.starts_with('#') => Line::Entry {
                    user: user.to_string(),
                    hash: hash.to_string(),
                },
                _ => Line::Other(line.to_string()),
            })
            .collect();
        Self { lines }
    }

    /// User names in file order.
    #[must_use]
    pub fn users(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                Line::Entry { user, .. } => Some(user.as_str()),
                Line::Other(_) => None,
            })
            .collect()
    }

    #[must_use]
    pub fn contains(&self, user: &str) -> bool {
        self.users().contains(&user)
    }

    /// Append a new entry.
    ///
    /// # Errors
    ///
    /// Returns `UserError::AlreadyExists` without modifying the file when
    /// the user is already present.
    pub fn add(&mut self, user: &str, hash: &str) -> Result<(), UserError> {
        if self.contains(user) {
            return Err(UserError::AlreadyExists(user.to_string()));
        }
        self.lines.push(Line::Entry {
            user: user.to_string(),
            hash: hash.to_string(),
        });
        Ok(())
    }

    /// Remove every entry for `user`.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` when no entry matches.
    pub fn remove(&mut self, user: &str) -> Result<(), UserError> {
        if !self.contains(user) {
            return Err(UserError::NotFound(user.to_string()));
        }
        self.lines
            .retain(|l| !matches!(l, Line::Entry { user: u, .. } if u == user));
        Ok(())
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Entry { user, hash } => {
                    out.push_str(user);
                    out.push(':');
                    out.push_str(hash);
                }
                Line::Other(raw) => out.push_str(raw),
            }
            out.push('\n');
        }
        out
    }
}

/// Validates a basic-auth user name: ASCII letters only.
///
/// # Errors
///
/// Returns `UserError::InvalidName` otherwise.
pub fn validate_user_name(name: &str) -> Result<(), UserError> {
    if !USER_NAME_RE.is_match(name) {
        return Err(UserError::InvalidName(name.to_string()));
    }
    Ok(())
}
