//! Executable suffixes recognized on Windows.

use crate::{Error, Result};

/// Name of the variable holding the executable suffixes.
const PATHEXT_VAR: &str = "PATHEXT";

/// `PATHEXT` items are always `;`-delimited.
const DELIMITER: &str = ";";

/// Suffixes in effect when `PATHEXT` is unset or empty.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".EXE", ".CMD", ".BAT", ".COM"];

/// Ordered, case-insensitively unique executable suffixes.
///
/// An empty list is never "nothing is executable": [`ExtensionList::effective`]
/// substitutes [`DEFAULT_EXTENSIONS`] at read time without storing them.
///
/// # Example
///
/// ```rust
/// use executable_discovery::ExtensionList;
///
/// let mut extensions = ExtensionList::default();
/// assert_eq!(extensions.effective(), vec![".EXE", ".CMD", ".BAT", ".COM"]);
///
/// extensions.add([".ps1"]).unwrap();
/// assert_eq!(extensions.effective(), vec![".PS1"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionList {
    values: Vec<String>,
}

impl ExtensionList {
    /// Build from already-split items. Empty items and duplicates are dropped.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for value in values {
            list.push(value.into());
        }
        list
    }

    /// Capture `PATHEXT` from the process environment.
    pub fn from_env() -> Self {
        std::env::var_os(PATHEXT_VAR)
            .map(|value| Self::new(value.to_string_lossy().split(DELIMITER)))
            .unwrap_or_default()
    }

    /// The stored items, possibly empty.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The suffixes in effect: the stored items, or the defaults when empty.
    pub fn effective(&self) -> Vec<&str> {
        if self.values.is_empty() {
            DEFAULT_EXTENSIONS.to_vec()
        } else {
            self.values.iter().map(String::as_str).collect()
        }
    }

    /// Add suffixes, stored upper-case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtension`] if a value does not start with
    /// `.`; nothing is added in that case.
    pub fn add<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in require_dot_prefix(values)? {
            self.push(value.to_uppercase());
        }
        Ok(())
    }

    /// Remove suffixes case-insensitively, returning whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtension`] if a value does not start with `.`.
    pub fn remove<I, S>(&mut self, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets = require_dot_prefix(values)?;
        let before = self.values.len();
        self.values
            .retain(|value| !targets.iter().any(|t| t.eq_ignore_ascii_case(value)));
        Ok(self.values.len() != before)
    }

    /// Encode back into a single `PATHEXT`-style value.
    pub fn to_env_value(&self) -> String {
        self.values.join(DELIMITER)
    }

    fn push(&mut self, value: String) {
        let value = value.trim();
        if value.is_empty() || self.values.iter().any(|v| v.eq_ignore_ascii_case(value)) {
            return;
        }
        self.values.push(value.to_string());
    }
}

fn require_dot_prefix<I, S>(values: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(Into::into)
        .map(|value: String| {
            if value.starts_with('.') {
                Ok(value)
            } else {
                Err(Error::InvalidExtension { value })
            }
        })
        .collect()
}
