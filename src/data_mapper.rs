use crate::{ConnectionTrait, Mapper, MapperErr, QueryResult, executor::identity_value};
use sea_query::{SelectStatement, Value};
use std::collections::HashMap;

/// Models already loaded by a [DataMapper], keyed by primary key.
/// Integer keys match regardless of their width.
#[derive(Debug, Clone)]
pub struct LoadedMap<T> {
    entries: HashMap<Value, T>,
}

impl<T> Default for LoadedMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> LoadedMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Value) -> Option<&T> {
        self.entries.get(&identity_value(id.clone()))
    }

    pub fn contains(&self, id: &Value) -> bool {
        self.entries.contains_key(&identity_value(id.clone()))
    }

    pub fn insert(&mut self, id: Value, model: T) {
        self.entries.insert(identity_value(id), model);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A hand-written mapper for one typed model.
///
/// Implementors provide the lookup query and how a row becomes a model;
/// [DataMapper::abstract_find] and [DataMapper::load] keep every model in the
/// [LoadedMap] so a primary key is only loaded once per mapper.
pub trait DataMapper {
    /// The domain type produced by this mapper
    type Model: Clone;

    fn loaded_map(&self) -> &LoadedMap<Self::Model>;

    fn loaded_map_mut(&mut self) -> &mut LoadedMap<Self::Model>;

    /// The select of the row with primary key `id`
    fn find_statement(&self, id: Value) -> SelectStatement;

    /// Build the model of a row not seen before
    fn do_load(&self, id: &Value, row: &QueryResult) -> Result<Self::Model, MapperErr>;

    /// Return the loaded model of `id`, or query and load it
    fn abstract_find<C, V>(&mut self, db: &C, id: V) -> Result<Option<Self::Model>, MapperErr>
    where
        C: ConnectionTrait,
        V: Into<Value>,
    {
        let id = id.into();
        if let Some(model) = self.loaded_map().get(&id) {
            return Ok(Some(model.clone()));
        }
        let stmt = self.find_statement(id);
        match db.query_one(&stmt)? {
            Some(row) => Ok(Some(self.load(&row)?)),
            None => Ok(None),
        }
    }

    /// Turn a row into a model, reusing the loaded model of the same key
    fn load(&mut self, row: &QueryResult) -> Result<Self::Model, MapperErr> {
        let id = row.try_get_value("", Mapper::PRIMARY_KEY)?.clone();
        if let Some(model) = self.loaded_map().get(&id) {
            return Ok(model.clone());
        }
        let model = self.do_load(&id, row)?;
        self.loaded_map_mut().insert(id, model.clone());
        Ok(model)
    }
}
