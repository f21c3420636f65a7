use super::IdentityMap;
use crate::{ClassMetadataCollection, Mapper, MapperErr};
use sea_query::{Alias, Expr, ExprTrait, JoinType, Query, SelectStatement, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Builds the aliased `SELECT` of a root entity class together with the
/// tables of its declared relations.
///
/// Every column is selected as `<alias>.<column> AS <alias>_<column>`.
/// Many-to-one targets are left joined on `<owner>.<foreign key> =
/// <target>.id` and followed recursively; one-to-many targets are left joined
/// on `<target>.<mapped by> = <owner>.id`. A class is joined at most once per
/// query, so cyclic relations stop at the first repeat.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    registry: &'a ClassMetadataCollection,
    root: Arc<Mapper>,
    identity_map: IdentityMap,
    joins: BTreeMap<(String, String), String>,
    query: SelectStatement,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a ClassMetadataCollection, class: &str) -> Result<Self, MapperErr> {
        let root = registry.get(class)?;
        let mut context = Self {
            registry,
            root: Arc::clone(&root),
            identity_map: IdentityMap::new(),
            joins: BTreeMap::new(),
            query: Query::select(),
        };
        context.build()?;
        Ok(context)
    }

    /// The field label under which `column` of the table aliased `alias` is selected
    pub fn label(alias: &str, column: &str) -> String {
        format!("{alias}_{column}")
    }

    pub fn registry(&self) -> &'a ClassMetadataCollection {
        self.registry
    }

    pub fn root(&self) -> &Arc<Mapper> {
        &self.root
    }

    pub fn identity_map(&self) -> &IdentityMap {
        &self.identity_map
    }

    /// Alias of the table joined for `owner`'s relation `property`, if the
    /// relation was joined
    pub fn joined_alias(&self, owner: &Mapper, property: &str) -> Option<&str> {
        self.joins
            .get(&(owner.alias().to_owned(), property.to_owned()))
            .map(String::as_str)
    }

    /// The select of every row of the root class
    pub fn select(&self) -> SelectStatement {
        self.query.clone()
    }

    /// The select narrowed to the root object with primary key `id`
    pub fn select_by_id<V>(&self, id: V) -> SelectStatement
    where
        V: Into<Value>,
    {
        let mut query = self.select();
        query.and_where(
            Expr::col((
                Alias::new(self.root.alias()),
                Alias::new(Mapper::PRIMARY_KEY),
            ))
            .eq(id.into()),
        );
        query
    }

    fn build(&mut self) -> Result<(), MapperErr> {
        let root = Arc::clone(&self.root);
        self.query
            .from_as(Alias::new(root.table()), Alias::new(root.alias()));
        self.identity_map.insert(Arc::clone(&root));
        self.select_columns(&root);
        self.join_many_to_one(&root)?;

        for relation in root.one_to_many() {
            let target = self.registry.get(relation.target())?;
            if !self.identity_map.insert(Arc::clone(&target)) {
                trace!("{} already joined, skipping", target.class());
                continue;
            }
            self.query.join_as(
                JoinType::LeftJoin,
                Alias::new(target.table()),
                Alias::new(target.alias()),
                Expr::col((Alias::new(target.alias()), Alias::new(relation.mapped_by())))
                    .equals((Alias::new(root.alias()), Alias::new(Mapper::PRIMARY_KEY))),
            );
            self.record_join(&root, relation.property(), &target);
            self.select_columns(&target);
            self.join_many_to_one(&target)?;
        }
        Ok(())
    }

    fn record_join(&mut self, owner: &Mapper, property: &str, target: &Mapper) {
        self.joins.insert(
            (owner.alias().to_owned(), property.to_owned()),
            target.alias().to_owned(),
        );
    }

    fn join_many_to_one(&mut self, owner: &Mapper) -> Result<(), MapperErr> {
        for relation in owner.many_to_one() {
            let target = self.registry.get(relation.target())?;
            if !self.identity_map.insert(Arc::clone(&target)) {
                trace!("{} already joined, skipping", target.class());
                continue;
            }
            self.query.join_as(
                JoinType::LeftJoin,
                Alias::new(target.table()),
                Alias::new(target.alias()),
                Expr::col((Alias::new(owner.alias()), Alias::new(relation.foreign_key())))
                    .equals((Alias::new(target.alias()), Alias::new(Mapper::PRIMARY_KEY))),
            );
            self.record_join(owner, relation.property(), &target);
            self.select_columns(&target);
            self.join_many_to_one(&target)?;
        }
        Ok(())
    }

    fn select_columns(&mut self, mapper: &Mapper) {
        for column in mapper.columns() {
            self.query.expr_as(
                Expr::col((Alias::new(mapper.alias()), Alias::new(column.name()))),
                Alias::new(Self::label(mapper.alias(), column.name())),
            );
        }
    }
}
