use crate::{
    ClassMetadataCollection, ConnectionTrait, Context, Mapper, MapperErr, Object, ObjectHydrator,
    ObjectId, OneToMany,
};
use sea_query::{Alias, Expr, ExprTrait, SelectStatement};
use std::cell::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// A one-to-many collection that is only queried on first access.
///
/// The items are every `target` row whose `mapped_by` column equals the
/// owner's primary key. Once loaded, the items are kept and later accesses
/// do not touch the database.
#[derive(Debug)]
pub struct LazyCollection {
    owner: ObjectId,
    relation: OneToMany,
    target: Arc<Mapper>,
    registry: ClassMetadataCollection,
    items: OnceCell<Vec<Object>>,
}

impl LazyCollection {
    pub fn new(
        registry: &ClassMetadataCollection,
        owner: &Object,
        property: &str,
    ) -> Result<Self, MapperErr> {
        let mapper = registry.get(owner.class())?;
        let relation = mapper
            .find_one_to_many(property)
            .ok_or_else(|| MapperErr::unknown_property(owner.class(), property))?
            .clone();
        let target = registry.get(relation.target())?;
        let owner = owner.object_id().ok_or_else(|| {
            MapperErr::Custom(format!(
                "cannot load {}.{property} of an object without identity",
                owner.class()
            ))
        })?;
        Ok(Self {
            owner,
            relation,
            target,
            registry: registry.clone(),
            items: OnceCell::new(),
        })
    }

    pub fn owner(&self) -> &ObjectId {
        &self.owner
    }

    pub fn relation(&self) -> &OneToMany {
        &self.relation
    }

    pub fn is_initialized(&self) -> bool {
        self.items.get().is_some()
    }

    /// The select issued on first access
    pub fn select(&self) -> Result<SelectStatement, MapperErr> {
        let context = Context::new(&self.registry, self.target.class())?;
        let mut query = context.select();
        query.and_where(
            Expr::col((
                Alias::new(self.target.alias()),
                Alias::new(self.relation.mapped_by()),
            ))
            .eq(self.owner.id().clone()),
        );
        Ok(query)
    }

    /// Load the items on first call; return the loaded items afterwards
    pub fn get<C>(&self, db: &C) -> Result<&[Object], MapperErr>
    where
        C: ConnectionTrait,
    {
        if let Some(items) = self.items.get() {
            return Ok(items.as_slice());
        }
        debug!(
            "Loading {}.{} of {:?}",
            self.owner.class(),
            self.relation.property(),
            self.owner.id()
        );
        let context = Context::new(&self.registry, self.target.class())?;
        let rows = db.query_all(&self.select()?)?;
        let items = ObjectHydrator::new(&context).hydrate_all(&rows, None)?;
        Ok(self.items.get_or_init(|| items).as_slice())
    }

    /// The loaded items, if any
    pub fn into_inner(self) -> Option<Vec<Object>> {
        self.items.into_inner()
    }
}
