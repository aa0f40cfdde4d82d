//! Old-to-new identifier mapping, scoped to one entity type and one run.

use std::collections::HashMap;

use uuid::Uuid;

use crate::source::SourceId;

/// Records the surrogate UUID generated for each old identifier.
///
/// Each entity type gets its own map - a project mapping and a category
/// mapping are independent namespaces. Generation is v4, so uniqueness is
/// probabilistic and no collision detection is performed.
#[derive(Debug, Default)]
pub struct IdMap {
    entries: HashMap<SourceId, Uuid>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh UUID for `old` and record the association.
    pub fn assign(&mut self, old: SourceId) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.insert(old, id);
        id
    }

    /// Look up the new id recorded for `old`, if any.
    pub fn get(&self, old: &SourceId) -> Option<Uuid> {
        self.entries.get(old).copied()
    }

    /// Number of recorded mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
