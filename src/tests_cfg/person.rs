use crate::{
    Column, DataMapper, FromObject, LoadedMap, Mapper, MapperErr, Object, QueryResult,
};
use sea_query::{Alias, Expr, ExprTrait, Query, SelectStatement, Value};

pub const CLASS: &str = "Person";
pub const TABLE: &str = "people";
pub const COLUMNS: [&str; 4] = ["id", "lastname", "firstname", "number_of_dependents"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub id: i32,
    pub lastname: String,
    pub firstname: String,
    pub number_of_dependents: i32,
}

pub fn mapper() -> Mapper {
    Mapper::new(CLASS, TABLE)
        .with_column(Column::new("id", "id"))
        .with_column(Column::new("lastname", "lastname"))
        .with_column(Column::new("firstname", "firstname"))
        .with_column(Column::new("numberOfDependents", "number_of_dependents"))
}

impl FromObject for Person {
    fn from_object(object: &Object) -> Result<Self, MapperErr> {
        Ok(Self {
            id: object.try_get("id")?,
            lastname: object.try_get("lastname")?,
            firstname: object.try_get("firstname")?,
            number_of_dependents: object.try_get("numberOfDependents")?,
        })
    }
}

/// Loads [Person]s from `people` by hand, without the hydrator
#[derive(Debug, Default)]
pub struct PersonMapper {
    loaded: LoadedMap<Person>,
}

impl PersonMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find<C, V>(&mut self, db: &C, id: V) -> Result<Option<Person>, MapperErr>
    where
        C: crate::ConnectionTrait,
        V: Into<Value>,
    {
        self.abstract_find(db, id)
    }
}

impl DataMapper for PersonMapper {
    type Model = Person;

    fn loaded_map(&self) -> &LoadedMap<Person> {
        &self.loaded
    }

    fn loaded_map_mut(&mut self) -> &mut LoadedMap<Person> {
        &mut self.loaded
    }

    fn find_statement(&self, id: Value) -> SelectStatement {
        Query::select()
            .columns(COLUMNS.into_iter().map(Alias::new))
            .from(Alias::new(TABLE))
            .and_where(Expr::col(Alias::new("id")).eq(id))
            .to_owned()
    }

    fn do_load(&self, _id: &Value, row: &QueryResult) -> Result<Person, MapperErr> {
        Ok(Person {
            id: row.try_get("", "id")?,
            lastname: row.try_get("", "lastname")?,
            firstname: row.try_get("", "firstname")?,
            number_of_dependents: row.try_get("", "number_of_dependents")?,
        })
    }
}
