//! Parent resolution.
//!
//! Links every person to their mother and father by name, within a single
//! fetched collection:
//!
//! 1. Index all records by `name`. A later record with the same name
//!    replaces an earlier one in the index (last write wins).
//! 2. Walk the records in input order and look up each parent name.
//!
//! Resolution is one generation deep. A resolved parent is the parent's
//! plain record, without the parent's own links.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{EnrichedPerson, ParentLink, PersonRecord};

/// Counters collected while resolving a collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Number of people resolved (equals the input length).
    pub people: usize,
    /// Parent links that found their record.
    pub resolved_links: usize,
    /// Parent names with no matching record, in encounter order.
    pub unresolved_names: Vec<String>,
    /// Names carried by more than one record, in encounter order.
    pub duplicate_names: Vec<String>,
}

/// Resolves parent names against the collection they came from.
///
/// The output has the same length and order as `records`. The input is
/// left untouched; each output entry holds its own copy of the source
/// record. Never fails: a parent name nobody carries becomes
/// [`ParentLink::Unresolved`].
pub fn resolve(records: &[PersonRecord]) -> Vec<EnrichedPerson> {
    resolve_with_stats(records).0
}

/// Same as [`resolve`], also returning [`ResolveStats`].
pub fn resolve_with_stats(records: &[PersonRecord]) -> (Vec<EnrichedPerson>, ResolveStats) {
    let shared: Vec<Arc<PersonRecord>> = records.iter().cloned().map(Arc::new).collect();

    let mut stats = ResolveStats {
        people: shared.len(),
        ..ResolveStats::default()
    };

    let mut by_name: HashMap<&str, &Arc<PersonRecord>> = HashMap::with_capacity(shared.len());
    for person in &shared {
        if by_name.insert(person.name.as_str(), person).is_some()
            && !stats.duplicate_names.contains(&person.name)
        {
            log::warn!(
                "Duplicate person name '{}'; parent links use the last record",
                person.name
            );
            stats.duplicate_names.push(person.name.clone());
        }
    }

    let mut link = |parent: Option<&str>| match parent {
        None => ParentLink::Absent,
        Some(name) => match by_name.get(name) {
            Some(found) => {
                stats.resolved_links += 1;
                ParentLink::Resolved(Arc::clone(found))
            }
            None => {
                log::debug!("Parent '{name}' is not in the collection");
                stats.unresolved_names.push(name.to_string());
                ParentLink::Unresolved(name.to_string())
            }
        },
    };

    let people = shared
        .iter()
        .map(|person| EnrichedPerson {
            mother: link(person.mother()),
            father: link(person.father()),
            person: Arc::clone(person),
        })
        .collect();

    (people, stats)
}

// ============================================================================
// Tests
// ============================================================================
