use super::Mapper;
use crate::MapperErr;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Holds one [Mapper] per known entity class
#[derive(Debug, Clone, Default)]
pub struct ClassMetadataCollection {
    mappers: BTreeMap<String, Arc<Mapper>>,
}

impl ClassMetadataCollection {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapper, replacing any previous mapper of the same class
    pub fn with(mut self, mapper: Mapper) -> Self {
        self.add(mapper);
        self
    }

    /// Register a mapper, replacing any previous mapper of the same class
    pub fn add(&mut self, mapper: Mapper) {
        debug!("Registered {} ({})", mapper.class(), mapper.alias());
        self.mappers
            .insert(mapper.class().to_owned(), Arc::new(mapper));
    }

    /// Look up the mapper of `class`
    pub fn get(&self, class: &str) -> Result<Arc<Mapper>, MapperErr> {
        self.mappers
            .get(class)
            .cloned()
            .ok_or_else(|| MapperErr::UnknownClass(class.to_owned()))
    }

    /// Whether a mapper of `class` is registered
    pub fn contains(&self, class: &str) -> bool {
        self.mappers.contains_key(class)
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Whether no class is registered
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Every registered mapper, ordered by class name
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Mapper>> {
        self.mappers.values()
    }
}

impl FromIterator<Mapper> for ClassMetadataCollection {
    fn from_iter<I: IntoIterator<Item = Mapper>>(iter: I) -> Self {
        let mut registry = Self::new();
        for mapper in iter {
            registry.add(mapper);
        }
        registry
    }
}
