use crate::Mapper;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Table alias → mapper whose columns were selected under that alias,
/// scoped to a single query
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    by_alias: BTreeMap<String, Arc<Mapper>>,
}

impl IdentityMap {
    /// An empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the mapper under its alias. Returns `false` and leaves the map
    /// untouched when the alias is taken
    pub fn insert(&mut self, mapper: Arc<Mapper>) -> bool {
        if self.by_alias.contains_key(mapper.alias()) {
            return false;
        }
        self.by_alias.insert(mapper.alias().to_owned(), mapper);
        true
    }

    /// The mapper selected under `alias`
    pub fn get(&self, alias: &str) -> Option<&Arc<Mapper>> {
        self.by_alias.get(alias)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.by_alias.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }

    /// Every alias in use, in sorted order
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.by_alias.keys().map(String::as_str)
    }
}
