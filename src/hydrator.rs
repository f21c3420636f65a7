use crate::{
    Context, Mapper, MapperErr, Object, ObjectId, Property, QueryResult, UnitOfWork,
    executor::is_null,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Turns the flat rows of a [Context] select into a graph of [Object]s.
///
/// Rows sharing the root identity are folded into one object in first-seen
/// order. Each row contributes the related object of every joined
/// many-to-one relation and at most one item to every joined one-to-many
/// collection; collection items are deduplicated by identity.
#[derive(Debug, Clone, Copy)]
pub struct ObjectHydrator<'c, 'a> {
    context: &'c Context<'a>,
}

impl<'c, 'a> ObjectHydrator<'c, 'a> {
    pub fn new(context: &'c Context<'a>) -> Self {
        Self { context }
    }

    /// Hydrate all rows. Objects already held by the unit of work are reused
    /// instead of rebuilt, and every resulting object is registered as clean.
    pub fn hydrate_all(
        &self,
        rows: &[QueryResult],
        mut unit_of_work: Option<&mut UnitOfWork>,
    ) -> Result<Vec<Object>, MapperErr> {
        let root = self.context.root();
        let mut objects: Vec<Object> = Vec::new();
        let mut positions: HashMap<ObjectId, usize> = HashMap::new();

        for row in rows {
            let position = match self.row_identity(root, row)? {
                Some(id) => match positions.get(&id) {
                    Some(position) => *position,
                    None => {
                        let object = match unit_of_work.as_deref().and_then(|uow| uow.get(&id)) {
                            Some(existing) => existing.clone(),
                            None => self.hydrate_object(root, row)?,
                        };
                        positions.insert(id, objects.len());
                        objects.push(object);
                        objects.len() - 1
                    }
                },
                None => {
                    objects.push(self.hydrate_object(root, row)?);
                    objects.len() - 1
                }
            };
            self.collect_children(root, row, &mut objects[position])?;
        }

        if let Some(unit_of_work) = unit_of_work.as_deref_mut() {
            for object in objects.iter() {
                unit_of_work.register_clean(object.clone());
            }
        }
        Ok(objects)
    }

    /// Hydrate the root object of a single row, including its many-to-one
    /// relations and at most one item per one-to-many collection
    pub fn hydrate_row(&self, row: &QueryResult) -> Result<Object, MapperErr> {
        let root = self.context.root();
        let mut object = self.hydrate_object(root, row)?;
        self.collect_children(root, row, &mut object)?;
        Ok(object)
    }

    fn hydrate_object(&self, mapper: &Mapper, row: &QueryResult) -> Result<Object, MapperErr> {
        let mut object = Object::new(mapper);
        for column in mapper.columns() {
            let label = Context::label(mapper.alias(), column.name());
            if let Some(value) = row.get(&label) {
                let value = column.converter().to_property(value.clone())?;
                object.set_property(column.property(), Property::Value(value));
            }
        }
        for relation in mapper.many_to_one() {
            let Some(target) = self.joined_target(mapper, relation.property()) else {
                continue;
            };
            let related = self.hydrate_related(target, row)?;
            object.set_property(relation.property(), Property::One(related.map(Box::new)));
        }
        Ok(object)
    }

    fn collect_children(
        &self,
        mapper: &Mapper,
        row: &QueryResult,
        object: &mut Object,
    ) -> Result<(), MapperErr> {
        for relation in mapper.one_to_many() {
            let Some(target) = self.joined_target(mapper, relation.property()) else {
                continue;
            };
            object.init_many(relation.property());
            if let Some(child) = self.hydrate_related(target, row)? {
                object.push_unique(relation.property(), child);
            }
        }
        Ok(())
    }

    /// A left join that matched nothing leaves every column `NULL`
    fn hydrate_related(
        &self,
        target: &Mapper,
        row: &QueryResult,
    ) -> Result<Option<Object>, MapperErr> {
        let matched = target.columns().iter().any(|column| {
            row.get(&Context::label(target.alias(), column.name()))
                .is_some_and(|value| !is_null(value))
        });
        if !matched {
            return Ok(None);
        }
        Ok(Some(self.hydrate_object(target, row)?))
    }

    fn joined_target(&self, owner: &Mapper, property: &str) -> Option<&'c Arc<Mapper>> {
        let context: &'c Context<'a> = self.context;
        let alias = context.joined_alias(owner, property)?;
        context.identity_map().get(alias)
    }

    fn row_identity(
        &self,
        mapper: &Mapper,
        row: &QueryResult,
    ) -> Result<Option<ObjectId>, MapperErr> {
        let Some(column) = mapper.primary_key() else {
            return Ok(None);
        };
        let Some(value) = row.get(&Context::label(mapper.alias(), column.name())) else {
            return Ok(None);
        };
        if is_null(value) {
            return Ok(None);
        }
        let id = column.converter().to_property(value.clone())?;
        Ok(Some(ObjectId::new(mapper.class(), id)))
    }
}
