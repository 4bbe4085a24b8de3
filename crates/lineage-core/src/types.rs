//! Person records as served by the people endpoint, and their enriched form.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Sex
// ============================================================================

/// Sex of a person, as carried in the payload (`"m"` / `"f"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// `"m"` on the wire.
    #[serde(rename = "m", alias = "male")]
    Male,
    /// `"f"` on the wire.
    #[serde(rename = "f", alias = "female")]
    Female,
}

impl Sex {
    /// Returns the short wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
        }
    }

    /// Returns `true` for [`Sex::Female`].
    pub fn is_female(&self) -> bool {
        matches!(self, Self::Female)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// PersonRecord
// ============================================================================

/// One person as received from the transport layer.
///
/// Parents are identified by name only. A record is never modified after
/// decoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    /// Display name, also the lookup key for parent resolution.
    pub name: String,
    /// Sex of the person.
    pub sex: Sex,
    /// Year of birth.
    pub born: i32,
    /// Year of death.
    pub died: i32,
    /// Unique identifier used in URLs and for row selection.
    pub slug: String,
    /// Mother's name, possibly naming someone outside the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
    /// Father's name, possibly naming someone outside the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
}

impl PersonRecord {
    /// Creates a record with no parent names.
    pub fn new(
        name: impl Into<String>,
        sex: Sex,
        born: i32,
        died: i32,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sex,
            born,
            died,
            slug: slug.into(),
            mother_name: None,
            father_name: None,
        }
    }

    /// Sets the mother's name.
    pub fn with_mother(mut self, name: impl Into<String>) -> Self {
        self.mother_name = Some(name.into());
        self
    }

    /// Sets the father's name.
    pub fn with_father(mut self, name: impl Into<String>) -> Self {
        self.father_name = Some(name.into());
        self
    }

    /// Mother's name if set. An empty name counts as not set.
    pub fn mother(&self) -> Option<&str> {
        non_empty(self.mother_name.as_deref())
    }

    /// Father's name if set. An empty name counts as not set.
    pub fn father(&self) -> Option<&str> {
        non_empty(self.father_name.as_deref())
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_record(&self.slug, "name must not be empty"));
        }
        if self.slug.trim().is_empty() {
            return Err(Error::invalid_record(&self.slug, "slug must not be empty"));
        }
        Ok(())
    }
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}

/// Decodes a people payload (a JSON array of records).
///
/// Every record must carry a non-empty `name` and `slug`.
pub fn decode_people(bytes: &[u8]) -> Result<Vec<PersonRecord>> {
    let records: Vec<PersonRecord> = serde_json::from_slice(bytes)?;
    for record in &records {
        record.validate()?;
    }
    log::debug!("Decoded {} person records", records.len());
    Ok(records)
}

// ============================================================================
// ParentLink
// ============================================================================

/// The mother or father of an [`EnrichedPerson`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ParentLink {
    /// No parent name was given.
    #[default]
    Absent,
    /// The named parent exists in the same collection.
    Resolved(Arc<PersonRecord>),
    /// A parent name was given but nobody in the collection has it.
    Unresolved(String),
}

impl ParentLink {
    /// Returns the resolved record, if any.
    pub fn person(&self) -> Option<&PersonRecord> {
        match self {
            Self::Resolved(person) => Some(person),
            _ => None,
        }
    }

    /// Returns the parent's name for both resolved and unresolved links.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Resolved(person) => Some(&person.name),
            Self::Unresolved(name) => Some(name),
        }
    }

    /// Returns `true` if a parent name was given.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Returns `true` if the parent was found in the collection.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

// ============================================================================
// EnrichedPerson
// ============================================================================

/// A [`PersonRecord`] with its parents resolved against its collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnrichedPerson {
    /// The source record, unchanged.
    #[serde(flatten)]
    pub person: Arc<PersonRecord>,
    /// Resolution of `mother_name`.
    pub mother: ParentLink,
    /// Resolution of `father_name`.
    pub father: ParentLink,
}

impl EnrichedPerson {
    /// The source record.
    pub fn record(&self) -> &PersonRecord {
        &self.person
    }
}

// ============================================================================
// Tests
// ============================================================================
