use crate::{
    ClassMetadataCollection, ConnectionTrait, Mapper, MapperErr, Object, ObjectId, Property,
};
use sea_query::{
    Alias, DeleteStatement, Expr, ExprTrait, InsertStatement, Query, UpdateStatement, Value,
};
use std::collections::HashMap;
use tracing::debug;

/// Tracks the objects loaded, created, changed and removed during one
/// logical operation, and writes the pending changes on [UnitOfWork::commit].
///
/// Loaded objects double as the identity map: an object registered clean is
/// returned instead of being hydrated again.
#[derive(Debug, Default)]
pub struct UnitOfWork {
    clean: HashMap<ObjectId, Object>,
    new: Vec<Object>,
    dirty: Vec<Object>,
    removed: Vec<Object>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a loaded object. Objects without identity are ignored.
    pub fn register_clean(&mut self, object: Object) {
        if let Some(id) = object.object_id() {
            self.clean.insert(id, object);
        }
    }

    /// Schedule an insert
    pub fn register_new(&mut self, object: Object) -> Result<(), MapperErr> {
        if let Some(id) = object.object_id() {
            if self.is_scheduled(&self.removed, &id) {
                return Err(MapperErr::Custom(format!(
                    "{} {:?} is scheduled for removal",
                    id.class(), id.id()
                )));
            }
            if self.clean.contains_key(&id) || self.is_scheduled(&self.new, &id) {
                return Err(MapperErr::Custom(format!(
                    "{} {:?} is already managed",
                    id.class(), id.id()
                )));
            }
        }
        self.new.push(object);
        Ok(())
    }

    /// Schedule an update of a previously loaded or persisted object
    pub fn register_dirty(&mut self, object: Object) -> Result<(), MapperErr> {
        let Some(id) = object.object_id() else {
            return Err(MapperErr::Custom(format!(
                "cannot update {} without identity",
                object.class()
            )));
        };
        if self.is_scheduled(&self.removed, &id) {
            return Err(MapperErr::Custom(format!(
                "{} {:?} is scheduled for removal",
                id.class(), id.id()
            )));
        }
        if let Some(pending) = Self::find_mut(&mut self.new, &id) {
            *pending = object;
            return Ok(());
        }
        match Self::find_mut(&mut self.dirty, &id) {
            Some(pending) => *pending = object,
            None => self.dirty.push(object),
        }
        Ok(())
    }

    /// Schedule a delete. Removing an object not yet inserted simply drops it.
    pub fn register_removed(&mut self, object: Object) -> Result<(), MapperErr> {
        let Some(id) = object.object_id() else {
            return Err(MapperErr::Custom(format!(
                "cannot remove {} without identity",
                object.class()
            )));
        };
        let pending_new = self.new.len();
        self.new.retain(|o| o.object_id().as_ref() != Some(&id));
        if self.new.len() != pending_new {
            return Ok(());
        }
        self.dirty.retain(|o| o.object_id().as_ref() != Some(&id));
        self.clean.remove(&id);
        if !self.is_scheduled(&self.removed, &id) {
            self.removed.push(object);
        }
        Ok(())
    }

    /// A loaded object by identity
    pub fn get(&self, id: &ObjectId) -> Option<&Object> {
        self.clean.get(id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.clean.contains_key(id)
    }

    /// Whether any insert, update or delete is pending
    pub fn has_pending_changes(&self) -> bool {
        !(self.new.is_empty() && self.dirty.is_empty() && self.removed.is_empty())
    }

    /// Forget every tracked object and pending change
    pub fn clear(&mut self) {
        self.clean.clear();
        self.new.clear();
        self.dirty.clear();
        self.removed.clear();
    }

    /// Write inserts, then updates, then deletes. Written objects become
    /// clean; the first failure, whether building or executing a statement,
    /// aborts the commit and leaves the failing change and every later one
    /// pending.
    pub fn commit<C>(
        &mut self,
        db: &C,
        registry: &ClassMetadataCollection,
    ) -> Result<(), MapperErr>
    where
        C: ConnectionTrait,
    {
        while let Some(object) = self.new.first() {
            let mapper = registry.get(object.class())?;
            let res = db.execute(&insert_statement(&mapper, object)?)?;
            let generated = match mapper.primary_key() {
                Some(pk) if object.id().is_none() => {
                    let id = i64::try_from(res.last_insert_id).map_err(|err| {
                        MapperErr::Type(format!("last_insert_id {}: {err}", res.last_insert_id))
                    })?;
                    Some((pk.property().to_owned(), id))
                }
                _ => None,
            };
            let mut object = self.new.remove(0);
            if let Some((property, id)) = generated {
                object.set(&property, id);
            }
            debug!("Inserted {:?}", object.object_id());
            self.register_clean(object);
        }

        while let Some(object) = self.dirty.first() {
            let mapper = registry.get(object.class())?;
            db.execute(&update_statement(&mapper, object)?)?;
            let object = self.dirty.remove(0);
            debug!("Updated {:?}", object.object_id());
            self.register_clean(object);
        }

        while let Some(object) = self.removed.first() {
            let mapper = registry.get(object.class())?;
            db.execute(&delete_statement(&mapper, object)?)?;
            let object = self.removed.remove(0);
            debug!("Deleted {:?}", object.object_id());
        }
        Ok(())
    }

    fn is_scheduled(&self, objects: &[Object], id: &ObjectId) -> bool {
        objects.iter().any(|o| o.object_id().as_ref() == Some(id))
    }

    fn find_mut<'o>(objects: &'o mut [Object], id: &ObjectId) -> Option<&'o mut Object> {
        objects
            .iter_mut()
            .find(|o| o.object_id().as_ref() == Some(id))
    }
}

/// Column-side values of every scalar property the mapper declares.
/// A `NULL` primary key is left out so the database can generate it.
fn column_values(mapper: &Mapper, object: &Object) -> Result<Vec<(String, Value)>, MapperErr> {
    let mut values = Vec::new();
    for column in mapper.columns() {
        let Some(Property::Value(value)) = object.get(column.property()) else {
            continue;
        };
        if column.name() == Mapper::PRIMARY_KEY && object.id().is_none() {
            continue;
        }
        values.push((
            column.name().to_owned(),
            column.converter().to_column(value.clone())?,
        ));
    }
    Ok(values)
}

fn primary_key_value(mapper: &Mapper, object: &Object) -> Result<Value, MapperErr> {
    let pk = mapper
        .primary_key()
        .ok_or_else(|| MapperErr::unknown_property(mapper.class(), Mapper::PRIMARY_KEY))?;
    let id = object.id().cloned().ok_or_else(|| {
        MapperErr::Custom(format!("{} has no primary key value", mapper.class()))
    })?;
    pk.converter().to_column(id)
}

pub(crate) fn insert_statement(
    mapper: &Mapper,
    object: &Object,
) -> Result<InsertStatement, MapperErr> {
    let (columns, values): (Vec<_>, Vec<_>) = column_values(mapper, object)?.into_iter().unzip();
    let mut stmt = Query::insert();
    stmt.into_table(Alias::new(mapper.table()))
        .columns(columns.into_iter().map(Alias::new));
    stmt.values(values.into_iter().map(Into::into))
        .map_err(|err| MapperErr::Exec(err.to_string()))?;
    Ok(stmt)
}

pub(crate) fn update_statement(
    mapper: &Mapper,
    object: &Object,
) -> Result<UpdateStatement, MapperErr> {
    let id = primary_key_value(mapper, object)?;
    let mut stmt = Query::update();
    stmt.table(Alias::new(mapper.table()));
    for (column, value) in column_values(mapper, object)? {
        if column == Mapper::PRIMARY_KEY {
            continue;
        }
        stmt.value(Alias::new(column), value);
    }
    stmt.and_where(Expr::col(Alias::new(Mapper::PRIMARY_KEY)).eq(id));
    Ok(stmt)
}

pub(crate) fn delete_statement(
    mapper: &Mapper,
    object: &Object,
) -> Result<DeleteStatement, MapperErr> {
    let id = primary_key_value(mapper, object)?;
    let mut stmt = Query::delete();
    stmt.from_table(Alias::new(mapper.table()))
        .and_where(Expr::col(Alias::new(Mapper::PRIMARY_KEY)).eq(id));
    Ok(stmt)
}
