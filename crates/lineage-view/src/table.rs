//! Table model for the people page.

use lineage_core::{EnrichedPerson, ParentLink, PersonRecord, Sex};
use serde::Serialize;

use crate::route::person_path;

/// Column headers, in display order.
pub const HEADERS: [&str; 6] = ["Name", "Sex", "Born", "Died", "Mother", "Father"];

/// A navigable person name. Female names are highlighted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersonLink {
    /// Visible text.
    pub name: String,
    /// Target path, `/people/{slug}`.
    pub href: String,
    /// Whether the person is female.
    pub female: bool,
}

impl PersonLink {
    /// Link to `person`'s row.
    pub fn to(person: &PersonRecord) -> Self {
        Self {
            name: person.name.clone(),
            href: person_path(&person.slug),
            female: person.sex.is_female(),
        }
    }
}

/// A mother or father cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// No parent name: rendered as `-`.
    Dash,
    /// Parent not in the collection: plain name.
    Text(String),
    /// Parent in the collection: link.
    Link(PersonLink),
}

impl Cell {
    /// Cell for a parent link.
    pub fn parent(link: &ParentLink) -> Self {
        match link {
            ParentLink::Absent => Self::Dash,
            ParentLink::Unresolved(name) => Self::Text(name.clone()),
            ParentLink::Resolved(person) => Self::Link(PersonLink::to(person)),
        }
    }

    /// Visible text of the cell.
    pub fn text(&self) -> &str {
        match self {
            Self::Dash => "-",
            Self::Text(name) => name,
            Self::Link(link) => &link.name,
        }
    }
}

/// One row of the people table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersonRow {
    /// Row identity.
    pub slug: String,
    /// Name column.
    pub person: PersonLink,
    /// Sex column.
    pub sex: Sex,
    /// Born column.
    pub born: i32,
    /// Died column.
    pub died: i32,
    /// Mother column.
    pub mother: Cell,
    /// Father column.
    pub father: Cell,
    /// Whether the route selects this row.
    pub selected: bool,
}

impl PersonRow {
    /// All six cells as display text, in [`HEADERS`] order.
    pub fn texts(&self) -> [String; 6] {
        [
            self.person.name.clone(),
            self.sex.to_string(),
            self.born.to_string(),
            self.died.to_string(),
            self.mother.text().to_string(),
            self.father.text().to_string(),
        ]
    }
}

/// The people table: one row per person, in collection order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PeopleTable {
    /// Rows in input order.
    pub rows: Vec<PersonRow>,
}

impl PeopleTable {
    /// Builds the table. `selected` only marks rows; nothing is filtered.
    pub fn build(people: &[EnrichedPerson], selected: Option<&str>) -> Self {
        let rows = people
            .iter()
            .map(|enriched| {
                let person = enriched.record();
                PersonRow {
                    slug: person.slug.clone(),
                    person: PersonLink::to(person),
                    sex: person.sex,
                    born: person.born,
                    died: person.died,
                    mother: Cell::parent(&enriched.mother),
                    father: Cell::parent(&enriched.father),
                    selected: selected == Some(person.slug.as_str()),
                }
            })
            .collect();
        Self { rows }
    }

    /// The selected row, if the slug matched one.
    pub fn selected_row(&self) -> Option<&PersonRow> {
        self.rows.iter().find(|row| row.selected)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
