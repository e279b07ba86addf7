//! Reader for snowsql-style INI files
//!
//! The dialect is the one Python's `configparser` reads with
//! `inline_comment_prefixes="#"`:
//!
//! - `[section]` headers, `key = value` or `key: value` options
//! - option names are case-insensitive (stored lower-cased)
//! - `#` and `;` start full-line comments; `#` after whitespace starts an
//!   inline comment
//! - a line indented deeper than the option it follows continues that
//!   option's value; blank lines inside such a value are kept
//! - options under `[DEFAULT]` are inherited by every section

use thiserror::Error;

/// Name of the section whose options every other section inherits
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Errors found while parsing an INI document (line numbers are 1-based)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IniError {
    #[error("line {line}: option found before any section header")]
    MissingSectionHeader { line: usize },

    #[error("line {line}: malformed section header")]
    MalformedHeader { line: usize },

    #[error("line {line}: expected `key = value`")]
    MissingDelimiter { line: usize },

    #[error("line {line}: empty option name")]
    EmptyKey { line: usize },

    #[error("line {line}: section [{name}] already defined")]
    DuplicateSection { line: usize, name: String },

    #[error("line {line}: option '{key}' already defined in [{section}]")]
    DuplicateOption {
        line: usize,
        section: String,
        key: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Which section subsequent options belong to
#[derive(Debug, Clone, Copy)]
enum Cursor {
    None,
    Defaults,
    Section(usize),
}

/// A parsed INI document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Section,
    sections: Vec<Section>,
}

impl IniDocument {
    /// Parse INI text
    pub fn parse(input: &str) -> Result<Self, IniError> {
        let mut doc = IniDocument {
            defaults: Section::named(DEFAULT_SECTION),
            sections: Vec::new(),
        };
        let mut cursor = Cursor::None;
        // The option a continuation line would extend
        let mut open_option: Option<usize> = None;
        // Indent of the last header or option line
        let mut indent_level = 0;

        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            let trimmed_raw = raw.trim();

            if trimmed_raw.starts_with('#') || trimmed_raw.starts_with(';') {
                continue;
            }

            let content = strip_inline_comment(raw).trim();
            if content.is_empty() {
                // Blank lines inside a multi-line value are kept
                if let (Some(entry), Some(section)) = (open_option, doc.cursor_section(cursor)) {
                    section.entries[entry].1.push('\n');
                }
                continue;
            }

            let indent = raw.len() - raw.trim_start().len();
            if indent > indent_level {
                if let (Some(entry), Some(section)) = (open_option, doc.cursor_section(cursor)) {
                    let value = &mut section.entries[entry].1;
                    value.push('\n');
                    value.push_str(content);
                    continue;
                }
            }
            indent_level = indent;

            if content.starts_with('[') {
                cursor = doc.open_section(content, line)?;
                open_option = None;
                continue;
            }

            let (key, value) = split_option(content, line)?;
            let section = doc
                .cursor_section(cursor)
                .ok_or(IniError::MissingSectionHeader { line })?;
            if section.get(&key).is_some() {
                return Err(IniError::DuplicateOption {
                    line,
                    section: section.name.clone(),
                    key,
                });
            }
            section.entries.push((key, value.to_string()));
            open_option = Some(section.entries.len() - 1);
        }

        doc.trim_values();
        Ok(doc)
    }

    /// Names of all sections except `DEFAULT`, in file order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    /// Options of `name` merged with `[DEFAULT]`
    ///
    /// Inherited options come first, in their `[DEFAULT]` order, with values
    /// overridden by the section; the section's own options follow. Returns
    /// `None` if the section does not exist.
    pub fn section(&self, name: &str) -> Option<Vec<(&str, &str)>> {
        if name == DEFAULT_SECTION {
            return Some(
                self.defaults
                    .entries
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect(),
            );
        }

        let section = self.sections.iter().find(|s| s.name == name)?;
        let mut merged: Vec<(&str, &str)> = self
            .defaults
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), section.get(k).unwrap_or(v.as_str())))
            .collect();
        merged.extend(
            section
                .entries
                .iter()
                .filter(|(k, _)| self.defaults.get(k).is_none())
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        Some(merged)
    }

    /// Look up a single option, falling back to `[DEFAULT]`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        if section != DEFAULT_SECTION {
            let section = self.sections.iter().find(|s| s.name == section)?;
            if let Some(value) = section.get(&key) {
                return Some(value);
            }
        }
        self.defaults.get(&key)
    }

    /// Drop trailing blank lines collected into multi-line values
    fn trim_values(&mut self) {
        let sections = std::iter::once(&mut self.defaults).chain(self.sections.iter_mut());
        for section in sections {
            for (_, value) in section.entries.iter_mut() {
                value.truncate(value.trim_end().len());
            }
        }
    }

    fn cursor_section(&mut self, cursor: Cursor) -> Option<&mut Section> {
        match cursor {
            Cursor::None => None,
            Cursor::Defaults => Some(&mut self.defaults),
            Cursor::Section(idx) => self.sections.get_mut(idx),
        }
    }

    fn open_section(&mut self, header: &str, line: usize) -> Result<Cursor, IniError> {
        let name = header
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .filter(|name| !name.is_empty())
            .ok_or(IniError::MalformedHeader { line })?;

        if name == DEFAULT_SECTION {
            return Ok(Cursor::Defaults);
        }
        if self.has_section(name) {
            return Err(IniError::DuplicateSection {
                line,
                name: name.to_string(),
            });
        }
        self.sections.push(Section::named(name));
        Ok(Cursor::Section(self.sections.len() - 1))
    }
}

/// Drop everything from the first `#` that follows whitespace
fn strip_inline_comment(line: &str) -> &str {
    let mut prev_is_space = false;
    for (idx, ch) in line.char_indices() {
        if ch == '#' && prev_is_space {
            return &line[..idx];
        }
        prev_is_space = ch.is_whitespace();
    }
    line
}

/// Split `key = value` / `key: value` at the first delimiter
fn split_option(content: &str, line: usize) -> Result<(String, &str), IniError> {
    let pos = content
        .find(['=', ':'])
        .ok_or(IniError::MissingDelimiter { line })?;
    let key = content[..pos].trim();
    if key.is_empty() {
        return Err(IniError::EmptyKey { line });
    }
    Ok((key.to_lowercase(), content[pos + 1..].trim()))
}
