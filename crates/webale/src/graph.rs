//! The module graph produced by one walk.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::module_id::ModuleId;
use crate::scanner::ImportSite;

/// An import call together with the module it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImport {
    pub site: ImportSite,
    pub target: ModuleId,
}

/// A module as it will appear in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    pub id: ModuleId,
    /// Source after any loader transform; what the spans point into.
    pub source: String,
    /// One entry per import call, in source order. Duplicates are kept.
    pub imports: Vec<ResolvedImport>,
}

impl ModuleRecord {
    /// Resolved ids of every import site, in source order.
    pub fn dependencies(&self) -> impl Iterator<Item = &ModuleId> {
        self.imports.iter().map(|import| &import.target)
    }
}

/// Modules keyed by id, in discovery order (the entry first).
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    modules: IndexMap<ModuleId, ModuleRecord>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, record: ModuleRecord) {
        self.modules.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &ModuleId) -> Option<&ModuleRecord> {
        self.modules.get(id)
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The first module discovered.
    pub fn entry(&self) -> Option<&ModuleRecord> {
        self.modules.first().map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.modules.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys()
    }

    /// Every dependency of every module is itself in the graph.
    pub fn is_closed(&self) -> bool {
        self.iter()
            .flat_map(ModuleRecord::dependencies)
            .all(|dep| self.contains(dep))
    }
}

impl Serialize for ModuleGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Node<'a> {
            dependencies: Vec<&'a ModuleId>,
        }

        let mut map = serializer.serialize_map(Some(self.modules.len()))?;
        for (id, record) in &self.modules {
            map.serialize_entry(
                id,
                &Node {
                    dependencies: record.dependencies().collect(),
                },
            )?;
        }
        map.end()
    }
}
