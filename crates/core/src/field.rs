use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of output categories a spreadsheet column can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    Amount,
    Date,
    Description,
    DisallowableExpenses,
}

impl CanonicalField {
    /// Classification scans fields in this order; it is the tie-break order.
    pub const ALL: [CanonicalField; 4] = [
        CanonicalField::Amount,
        CanonicalField::Date,
        CanonicalField::Description,
        CanonicalField::DisallowableExpenses,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::Amount => "Amount",
            CanonicalField::Date => "Date",
            CanonicalField::Description => "Description",
            CanonicalField::DisallowableExpenses => "DisallowableExpenses",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CanonicalField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Amount" => Ok(CanonicalField::Amount),
            "Date" => Ok(CanonicalField::Date),
            "Description" => Ok(CanonicalField::Description),
            "DisallowableExpenses" => Ok(CanonicalField::DisallowableExpenses),
            other => Err(RegistryError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to parse keyword TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown canonical field: '{0}'")]
    UnknownField(String),
}

/// Built-in synonym vocabulary. Phrases are matched case-insensitively; the
/// registry lowercases them at construction.
const DEFAULT_KEYWORDS: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::Amount,
        &["amount", "amt", "transaction amount", "debit", "credit", "value"],
    ),
    (
        CanonicalField::Date,
        &[
            "date",
            "transaction date",
            "posting date",
            "time",
            "datetime",
            "dt",
            "transdt",
            "trans_dt",
        ],
    ),
    (
        CanonicalField::Description,
        &[
            "description",
            "desc",
            "details",
            "narration",
            "particulars",
            "info",
            "remarks",
            "summary",
            "txn_desc",
            "trans desc",
            "transaction descriptions",
        ],
    ),
    (
        CanonicalField::DisallowableExpenses,
        &[
            "disallowable expenses",
            "disallowed expenses",
            "non-deductible expenses",
            "not allowable for tax",
            "add-back expenses",
            "dis allowable",
            "dis allowed exp",
            "non-allowable expenses",
            "expenses not deductible",
            "tax disallowable",
            "excluded expenses (for tax)",
            "tax add-backs",
        ],
    ),
];

/// Immutable mapping from canonical field to its synonym phrases.
///
/// Iteration order always follows [`CanonicalField::ALL`] regardless of how
/// the registry was constructed, so classification is deterministic. Intended
/// to be built once and shared read-only; swap in a different registry (e.g.
/// per locale) by constructing another value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldKeywords {
    entries: Vec<(CanonicalField, Vec<String>)>,
}

impl Default for FieldKeywords {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_KEYWORDS
                .iter()
                .map(|(f, kws)| (*f, kws.iter().map(|k| k.to_string()).collect())),
        )
    }
}

impl FieldKeywords {
    /// Build a registry from arbitrary (field, phrases) pairs. Entries are
    /// re-ordered to `CanonicalField::ALL`, duplicate fields are merged in
    /// encounter order, and phrases are lowercased.
    pub fn from_entries(entries: impl IntoIterator<Item = (CanonicalField, Vec<String>)>) -> Self {
        let mut by_field: BTreeMap<CanonicalField, Vec<String>> = BTreeMap::new();
        for (field, phrases) in entries {
            by_field
                .entry(field)
                .or_default()
                .extend(phrases.into_iter().map(|p| p.to_lowercase()));
        }
        let entries = CanonicalField::ALL
            .into_iter()
            .map(|field| (field, by_field.remove(&field).unwrap_or_default()))
            .collect();
        FieldKeywords { entries }
    }

    /// Parse a registry from TOML of the form:
    ///
    /// ```toml
    /// Amount = ["amount", "amt"]
    /// Date = ["date", "posting date"]
    /// ```
    ///
    /// Unknown field names are rejected; missing fields get no synonyms.
    pub fn from_toml(content: &str) -> Result<Self, RegistryError> {
        let raw: BTreeMap<String, Vec<String>> = toml::from_str(content)?;
        let mut entries = Vec::with_capacity(raw.len());
        for (name, phrases) in raw {
            entries.push((name.parse::<CanonicalField>()?, phrases));
        }
        Ok(Self::from_entries(entries))
    }

    pub fn keywords_for(&self, field: CanonicalField) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, kws)| kws.as_slice())
            .unwrap_or(&[])
    }

    /// Fields with their phrases, in classification order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &[String])> {
        self.entries.iter().map(|(f, kws)| (*f, kws.as_slice()))
    }
}
