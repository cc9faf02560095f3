/*!
 * Acronym table: the deduplicated mapping built during extraction.
 */

use std::collections::BTreeMap;

/// A single acronym and the definition bound to it, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcronymEntry {
    /// Uppercase token, e.g. `ANN`
    pub acronym: String,
    /// Expanded prose form, absent for bare tokens
    pub definition: Option<String>,
}

impl AcronymEntry {
    pub fn new(acronym: impl Into<String>, definition: Option<String>) -> Self {
        Self {
            acronym: acronym.into(),
            definition,
        }
    }

    pub fn has_definition(&self) -> bool {
        self.definition.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// What happened when a binding was offered to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// First time this acronym was seen
    Added,
    /// A bare entry received its first definition
    Defined,
    /// The table already held this acronym with an equal or earlier binding
    Unchanged,
}

/// Mapping from acronym to entry, iterated in alphabetical order.
///
/// The first definition recorded for an acronym is kept; later definitions
/// for the same token are ignored. A bare occurrence never removes a
/// definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcronymTable {
    entries: BTreeMap<String, AcronymEntry>,
}

impl AcronymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an acronym binding to the table
    pub fn insert(&mut self, acronym: &str, definition: Option<String>) -> InsertOutcome {
        let definition = definition.filter(|d| !d.trim().is_empty());

        match self.entries.get_mut(acronym) {
            Some(existing) => {
                if existing.definition.is_none() && definition.is_some() {
                    existing.definition = definition;
                    InsertOutcome::Defined
                } else {
                    InsertOutcome::Unchanged
                }
            }
            None => {
                self.entries
                    .insert(acronym.to_string(), AcronymEntry::new(acronym, definition));
                InsertOutcome::Added
            }
        }
    }

    /// Fold another table into this one with the same first-wins rule
    pub fn merge(&mut self, other: AcronymTable) {
        for (acronym, entry) in other.entries {
            self.insert(&acronym, entry.definition);
        }
    }

    pub fn definition(&self, acronym: &str) -> Option<&str> {
        self.entries
            .get(acronym)
            .and_then(|entry| entry.definition.as_deref())
    }

    pub fn contains(&self, acronym: &str) -> bool {
        self.entries.contains_key(acronym)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = &AcronymEntry> {
        self.entries.values()
    }

    /// Acronym tokens in alphabetical order
    pub fn acronyms(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of entries carrying a definition
    pub fn defined_count(&self) -> usize {
        self.iter().filter(|entry| entry.has_definition()).count()
    }
}

impl FromIterator<(String, Option<String>)> for AcronymTable {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        let mut table = AcronymTable::new();
        for (acronym, definition) in iter {
            table.insert(&acronym, definition);
        }
        table
    }
}
