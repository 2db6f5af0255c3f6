//! Qualified names of signal PDFs.
//!
//! Grammar:
//!
//! ```text
//! prefix::name[@suffix][;key=value[,key=value]*]
//! ```
//!
//! `prefix` is everything before the first `::`. The option tail is the
//! embedded option set; it never takes part in registry keys.

use crate::error::{Result, SignalPdfError};
use crate::options::Options;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const FORBIDDEN: &[char] = &[';', '@', ',', '='];

/// A parsed, immutable signal PDF identifier.
///
/// Ordering and equality cover every component, options included. Registry
/// keys are always option-free (see [`QualifiedName::without_options`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    prefix: String,
    name: String,
    suffix: Option<String>,
    options: Options,
}

impl QualifiedName {
    /// Parse a raw qualified-name string.
    pub fn parse(raw: &str) -> Result<Self> {
        let Some((prefix, rest)) = raw.split_once("::") else {
            return Err(SignalPdfError::name_format(raw, "missing '::' separator"));
        };
        check_segment(raw, "prefix", prefix)?;

        let (head, option_clause) = match rest.split_once(';') {
            Some((head, clause)) => (head, Some(clause)),
            None => (rest, None),
        };
        let (name, suffix) = match head.split_once('@') {
            Some((name, suffix)) => (name, Some(suffix)),
            None => (head, None),
        };
        check_segment(raw, "name", name)?;
        check_colons(raw, "name", name)?;
        if let Some(suffix) = suffix {
            check_segment(raw, "suffix", suffix)?;
            check_colons(raw, "suffix", suffix)?;
        }

        let options = match option_clause {
            Some(clause) => parse_option_clause(raw, clause)?,
            None => Options::new(),
        };

        Ok(Self {
            prefix: prefix.to_string(),
            name: name.to_string(),
            suffix: suffix.map(str::to_string),
            options,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// The option set embedded in the name (possibly empty).
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The option-free `prefix::name[@suffix]` form.
    pub fn full(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}::{}@{}", self.prefix, self.name, suffix),
            None => format!("{}::{}", self.prefix, self.name),
        }
    }

    /// The same name with its embedded options dropped.
    pub fn without_options(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            name: self.name.clone(),
            suffix: self.suffix.clone(),
            options: Options::new(),
        }
    }

    /// Documentation anchor for this name.
    ///
    /// Punctuation is transliterated to two-letter codes and the result is
    /// lowercased, e.g. `B->Kll::BR` becomes `bmmtokllcocobr`.
    pub fn link_key(&self) -> String {
        let mut key = String::new();
        for c in self.full().chars() {
            match c {
                ':' => key.push_str("co"),
                '@' => key.push_str("at"),
                '/' => key.push_str("sl"),
                '_' => key.push_str("un"),
                '(' => key.push_str("po"),
                ')' => key.push_str("pc"),
                '+' => key.push_str("pp"),
                '-' => key.push_str("mm"),
                '>' => key.push_str("to"),
                other => key.extend(other.to_lowercase()),
            }
        }
        key
    }
}

fn check_segment(raw: &str, what: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(SignalPdfError::name_format(raw, format!("empty {what}")));
    }
    if let Some(c) = segment
        .chars()
        .find(|c| c.is_whitespace() || FORBIDDEN.contains(c))
    {
        return Err(SignalPdfError::name_format(
            raw,
            format!("{what} contains forbidden character {c:?}"),
        ));
    }
    Ok(())
}

/// Only the first `::` separates prefix from name.
fn check_colons(raw: &str, what: &str, segment: &str) -> Result<()> {
    if segment.starts_with(':') {
        return Err(SignalPdfError::name_format(
            raw,
            format!("{what} starts with ':'"),
        ));
    }
    if segment.contains("::") {
        return Err(SignalPdfError::name_format(raw, format!("{what} contains '::'")));
    }
    Ok(())
}

fn parse_option_clause(raw: &str, clause: &str) -> Result<Options> {
    if clause.is_empty() {
        return Err(SignalPdfError::name_format(raw, "unterminated option clause"));
    }
    let mut options = Options::new();
    for pair in clause.split(',') {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(SignalPdfError::name_format(
                raw,
                format!("option clause '{pair}' lacks '='"),
            ));
        };
        check_segment(raw, "option key", key)?;
        check_segment(raw, "option value", value)?;
        if options.insert(key, value).is_some() {
            return Err(SignalPdfError::name_format(
                raw,
                format!("option '{key}' given twice"),
            ));
        }
    }
    Ok(options)
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full())?;
        if !self.options.is_empty() {
            write!(f, ";{}", self.options)?;
        }
        Ok(())
    }
}

impl FromStr for QualifiedName {
    type Err = SignalPdfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for QualifiedName {
    type Error = SignalPdfError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QualifiedName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
