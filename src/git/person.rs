// stg-rs: Stacked Git - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Author and committer identities.
//!
//! ```text
//! "A U Thor <author@example.com> 1700000000 +0100"
//!  '---+---' '--------+---------' '------+-------'
//!     name          email               date
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ObjectError, StgError, StgResult};

/// A commit timestamp: seconds since the epoch plus the author's UTC offset.
///
/// `-0000` (zone unknown) is kept apart from `+0000` so a parsed date
/// renders back to the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    timestamp: i64,
    offset_minutes: i32,
    unknown_zone: bool,
}

impl Date {
    #[must_use]
    pub const fn new(timestamp: i64, offset_minutes: i32) -> Self {
        Self {
            timestamp,
            offset_minutes,
            unknown_zone: false,
        }
    }

    /// A date written with git's `-0000` offset.
    #[must_use]
    pub const fn with_unknown_zone(timestamp: i64) -> Self {
        Self {
            timestamp,
            offset_minutes: 0,
            unknown_zone: true,
        }
    }

    #[must_use]
    pub const fn is_unknown_zone(self) -> bool {
        self.unknown_zone
    }

    #[must_use]
    pub const fn timestamp(self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub const fn offset_minutes(self) -> i32 {
        self.offset_minutes
    }

    fn parse_offset(tz: &str) -> Option<i32> {
        let (sign, digits) = match tz.as_bytes().first()? {
            b'+' => (1, &tz[1..]),
            b'-' => (-1, &tz[1..]),
            _ => return None,
        };
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let hours: i32 = digits[..2].parse().ok()?;
        let minutes: i32 = digits[2..].parse().ok()?;
        Some(sign * (hours * 60 + minutes))
    }
}

impl FromStr for Date {
    type Err = StgError;

    /// Parses `TIMESTAMP TZOFFSET`, e.g. `1700000000 +0100`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ObjectError::MalformedDate {
            value: s.to_string(),
        };
        let (timestamp, tz) = s.split_once(' ').ok_or_else(malformed)?;
        let timestamp = timestamp.parse().map_err(|_| malformed())?;
        if tz == "-0000" {
            return Ok(Self::with_unknown_zone(timestamp));
        }
        let offset_minutes = Self::parse_offset(tz).ok_or_else(malformed)?;
        Ok(Self::new(timestamp, offset_minutes))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.offset_minutes < 0 || self.unknown_zone { '-' } else { '+' };
        let offset = self.offset_minutes.unsigned_abs();
        write!(
            f,
            "{} {sign}{:02}{:02}",
            self.timestamp,
            offset / 60,
            offset % 60
        )
    }
}

/// Which identity a [`Person`] plays in a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Author,
    Committer,
}

impl Role {
    const fn env_prefix(self) -> &'static str {
        match self {
            Self::Author => "GIT_AUTHOR",
            Self::Committer => "GIT_COMMITTER",
        }
    }
}

/// A name, email and date triple. Any part may be unknown, in which case git
/// fills it in from its own environment and configuration at commit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Person {
    name: Option<String>,
    email: Option<String>,
    date: Option<Date>,
}

impl Person {
    pub fn new(name: impl Into<String>, email: impl Into<String>, date: Date) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            date: Some(date),
        }
    }

    /// Default author: everything left to git.
    #[must_use]
    pub const fn author() -> Self {
        Self {
            name: None,
            email: None,
            date: None,
        }
    }

    /// Default committer: everything left to git.
    #[must_use]
    pub const fn committer() -> Self {
        Self::author()
    }

    /// Parses an `author`/`committer` header value.
    ///
    /// # Errors
    ///
    /// Returns `ObjectError::MalformedPerson` unless the line has the form
    /// `NAME <EMAIL> TIMESTAMP TZOFFSET`.
    pub fn parse(line: &str) -> StgResult<Self> {
        let malformed = || ObjectError::MalformedPerson {
            line: line.to_string(),
        };

        let (ident, tz) = line.rsplit_once(' ').ok_or_else(malformed)?;
        let (ident, timestamp) = ident.rsplit_once(' ').ok_or_else(malformed)?;
        let date: Date = format!("{timestamp} {tz}")
            .parse()
            .map_err(|_| malformed())?;

        let ident = ident.strip_suffix('>').ok_or_else(malformed)?;
        let (name, email) = ident.rsplit_once('<').ok_or_else(malformed)?;
        if email.contains('>') || name.contains('>') {
            return Err(malformed().into());
        }

        Ok(Self::new(name.trim_end(), email, date))
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub const fn date(&self) -> Option<Date> {
        self.date
    }

    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_email(self, email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_date(self, date: Date) -> Self {
        Self {
            date: Some(date),
            ..self
        }
    }

    /// Environment entries that make git use this identity for `role`.
    /// Unknown parts are left out.
    #[must_use]
    pub fn env(&self, role: Role) -> Vec<(String, String)> {
        let prefix = role.env_prefix();
        let mut vars = Vec::new();
        if let Some(name) = &self.name {
            vars.push((format!("{prefix}_NAME"), name.clone()));
        }
        if let Some(email) = &self.email {
            vars.push((format!("{prefix}_EMAIL"), email.clone()));
        }
        if let Some(date) = self.date {
            vars.push((format!("{prefix}_DATE"), date.to_string()));
        }
        vars
    }
}

impl fmt::Display for Person {
    /// Renders `NAME <EMAIL> DATE`, the inverse of [`Person::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}>",
            self.name.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default()
        )?;
        if let Some(date) = self.date {
            write!(f, " {date}")?;
        }
        Ok(())
    }
}
