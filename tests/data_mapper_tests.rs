use pretty_assertions::assert_eq;
use sea_mapper::{
    DataMapper, DbBackend, MapperErr, MockDatabase, Statement, Value,
    tests_cfg::person::{Person, PersonMapper},
};

mod common;

fn person_row(id: i32, lastname: &str, firstname: &str, dependents: i32) -> std::collections::BTreeMap<&'static str, Value> {
    maplit::btreemap! {
        "id" => Value::from(id),
        "lastname" => Value::from(lastname),
        "firstname" => Value::from(firstname),
        "number_of_dependents" => Value::from(dependents),
    }
}

#[test]
fn find_loads_once() -> Result<(), MapperErr> {
    common::setup();

    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([[person_row(1, "Fowler", "Martin", 2)]])
        .into_connection();
    let mut mapper = PersonMapper::new();

    let martin = Person {
        id: 1,
        lastname: "Fowler".to_owned(),
        firstname: "Martin".to_owned(),
        number_of_dependents: 2,
    };
    assert_eq!(mapper.find(&db, 1)?, Some(martin.clone()));
    assert_eq!(mapper.find(&db, 1)?, Some(martin));
    assert_eq!(mapper.loaded_map().len(), 1);

    assert_eq!(
        db.into_transaction_log(),
        [Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"SELECT "id", "lastname", "firstname", "number_of_dependents" FROM "people" WHERE "id" = $1"#,
            [1.into()]
        )]
    );
    Ok(())
}

#[test]
fn loaded_map_ignores_integer_width() -> Result<(), MapperErr> {
    let db = MockDatabase::new(DbBackend::Sqlite)
        .append_query_results([[maplit::btreemap! {
            "id" => Value::BigInt(Some(1)),
            "lastname" => Value::from("Fowler"),
            "firstname" => Value::from("Martin"),
            "number_of_dependents" => Value::BigInt(Some(2)),
        }]])
        .into_connection();
    let mut mapper = PersonMapper::new();

    let martin = mapper.find(&db, 1)?.expect("person 1 exists");
    assert_eq!(martin.number_of_dependents, 2);
    assert_eq!(mapper.find(&db, 1)?, Some(martin));
    assert!(mapper.loaded_map().contains(&Value::Int(Some(1))));
    assert_eq!(db.into_transaction_log().len(), 1);
    Ok(())
}

#[test]
fn find_nothing() -> Result<(), MapperErr> {
    let db = MockDatabase::new(DbBackend::MySql)
        .append_query_results([Vec::<std::collections::BTreeMap<&str, Value>>::new()])
        .into_connection();
    let mut mapper = PersonMapper::new();

    assert_eq!(mapper.find(&db, 9)?, None);
    assert!(mapper.loaded_map().is_empty());
    assert_eq!(
        db.into_transaction_log()[0].sql,
        "SELECT `id`, `lastname`, `firstname`, `number_of_dependents` FROM `people` WHERE `id` = ?"
    );
    Ok(())
}

#[test]
fn load_reuses_loaded_model() -> Result<(), MapperErr> {
    let mut mapper = PersonMapper::new();

    let first = mapper.load(&sea_mapper::QueryResult::from_iter(person_row(3, "Beck", "Kent", 1)))?;
    // a later row of the same key does not overwrite what was loaded
    let second = mapper.load(&sea_mapper::QueryResult::from_iter(person_row(3, "Beck", "K.", 4)))?;

    assert_eq!(first, second);
    assert_eq!(second.firstname, "Kent");
    Ok(())
}

#[test]
fn execution_errors_propagate() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_errors([MapperErr::Query("relation \"people\" does not exist".to_owned())])
        .into_connection();
    let mut mapper = PersonMapper::new();

    assert_eq!(
        mapper.find(&db, 1),
        Err(MapperErr::Query("relation \"people\" does not exist".to_owned()))
    );
}

#[test]
fn malformed_row_is_a_type_error() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([[maplit::btreemap! {
            "id" => Value::from(1),
            "lastname" => Value::from(7),
            "firstname" => Value::from("Martin"),
            "number_of_dependents" => Value::from(2),
        }]])
        .into_connection();

    assert!(matches!(
        PersonMapper::new().find(&db, 1),
        Err(MapperErr::Type(_))
    ));
}
