use crate::{
    ClassMetadataCollection, ConnectionTrait, Context, LazyCollection, MapperErr, MapperOptions,
    Object, ObjectHydrator, ObjectId, QueryResult, UnitOfWork,
};
use sea_query::{SelectStatement, Value};
use tracing::instrument;

/// Entry point of the mapper: loads objects through a connection, keeps them
/// in a [UnitOfWork] and writes pending changes on [EntityManager::flush].
#[derive(Debug)]
pub struct EntityManager<C> {
    db: C,
    registry: ClassMetadataCollection,
    unit_of_work: UnitOfWork,
    options: MapperOptions,
}

impl<C> EntityManager<C>
where
    C: ConnectionTrait,
{
    pub fn new(db: C, registry: ClassMetadataCollection) -> Self {
        Self::with_options(db, registry, MapperOptions::default())
    }

    pub fn with_options(db: C, registry: ClassMetadataCollection, options: MapperOptions) -> Self {
        Self {
            db,
            registry,
            unit_of_work: UnitOfWork::new(),
            options,
        }
    }

    pub fn connection(&self) -> &C {
        &self.db
    }

    pub fn registry(&self) -> &ClassMetadataCollection {
        &self.registry
    }

    pub fn unit_of_work(&self) -> &UnitOfWork {
        &self.unit_of_work
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// The select builder of `class`
    pub fn context(&self, class: &str) -> Result<Context<'_>, MapperErr> {
        Context::new(&self.registry, class)
    }

    /// A new, unmanaged object of `class`
    pub fn create(&self, class: &str) -> Result<Object, MapperErr> {
        Ok(Object::new(&*self.registry.get(class)?))
    }

    /// Find an object by primary key. An object already loaded in this unit
    /// of work is returned without a query.
    #[instrument(level = "trace", skip(self, id))]
    pub fn find<V>(&mut self, class: &str, id: V) -> Result<Option<Object>, MapperErr>
    where
        V: Into<Value>,
    {
        let id = id.into();
        let key = ObjectId::new(class, id.clone());
        if let Some(object) = self.unit_of_work.get(&key) {
            return Ok(Some(object.clone()));
        }
        let context = Context::new(&self.registry, class)?;
        let rows = Self::query(&self.db, &self.options, &context.select_by_id(id))?;
        let objects = ObjectHydrator::new(&context).hydrate_all(&rows, Some(&mut self.unit_of_work))?;
        Ok(objects.into_iter().next())
    }

    /// Load every object of `class`
    #[instrument(level = "trace", skip(self))]
    pub fn find_all(&mut self, class: &str) -> Result<Vec<Object>, MapperErr> {
        let context = Context::new(&self.registry, class)?;
        let rows = Self::query(&self.db, &self.options, &context.select())?;
        ObjectHydrator::new(&context).hydrate_all(&rows, Some(&mut self.unit_of_work))
    }

    /// Schedule an insert
    pub fn persist(&mut self, object: Object) -> Result<(), MapperErr> {
        self.registry.get(object.class())?;
        self.unit_of_work.register_new(object)
    }

    /// Schedule an update
    pub fn merge(&mut self, object: Object) -> Result<(), MapperErr> {
        self.registry.get(object.class())?;
        self.unit_of_work.register_dirty(object)
    }

    /// Schedule a delete
    pub fn remove(&mut self, object: Object) -> Result<(), MapperErr> {
        self.registry.get(object.class())?;
        self.unit_of_work.register_removed(object)
    }

    /// Write every pending change
    pub fn flush(&mut self) -> Result<(), MapperErr> {
        self.unit_of_work.commit(&self.db, &self.registry)
    }

    /// Detach every managed object
    pub fn clear(&mut self) {
        self.unit_of_work.clear();
    }

    /// The one-to-many `property` of `object`, loaded on first access
    pub fn lazy_collection(
        &self,
        object: &Object,
        property: &str,
    ) -> Result<LazyCollection, MapperErr> {
        LazyCollection::new(&self.registry, object, property)
    }

    fn query(
        db: &C,
        options: &MapperOptions,
        query: &SelectStatement,
    ) -> Result<Vec<QueryResult>, MapperErr> {
        let stmt = db.get_database_backend().build(query);
        options.log_statement(&stmt);
        db.query_all_raw(stmt)
    }
}
