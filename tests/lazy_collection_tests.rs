use pretty_assertions::assert_eq;
use sea_mapper::{
    DbBackend, EntityManager, LazyCollection, MapperErr, MockDatabase, Value, tests_cfg,
};

mod common;

fn relation_row(id: i32, name: &str, entity_id: i32) -> std::collections::BTreeMap<&'static str, Value> {
    maplit::btreemap! {
        "1367_id" => Value::from(id),
        "1367_name" => Value::from(name),
        "1367_entity_id" => Value::from(entity_id),
    }
}

#[test]
fn one_to_many_loads_on_first_access() -> Result<(), MapperErr> {
    common::setup();

    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([[relation_row(1, "nameA", 1), relation_row(2, "nameB", 1)]])
        .into_connection();
    let em = EntityManager::new(db, tests_cfg::registry());

    let mut entity = em.create("Entity")?;
    entity.set("id", 1);

    let collection = em.lazy_collection(&entity, "lazyCollection")?;
    assert!(!collection.is_initialized());
    assert!(em.connection().transaction_log()?.is_empty());

    let names = collection
        .get(em.connection())?
        .iter()
        .map(|relation| relation.try_get::<String>("name"))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(names, ["nameA", "nameB"]);
    assert!(collection.is_initialized());

    // the second access is served from memory
    assert_eq!(collection.get(em.connection())?.len(), 2);

    let log = em.connection().transaction_log()?;
    assert_eq!(log.len(), 1);
    assert_eq!(
        log[0].to_string(),
        concat!(
            r#"SELECT "1367"."id" AS "1367_id", "1367"."name" AS "1367_name", "1367"."entity_id" AS "1367_entity_id" "#,
            r#"FROM "relation" AS "1367" WHERE "1367"."entity_id" = 1"#,
        )
    );
    assert_eq!(collection.into_inner().map(|items| items.len()), Some(2));
    Ok(())
}

#[test]
fn joined_one_to_many_matches_lazy_result() -> Result<(), MapperErr> {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([[
            maplit::btreemap! {
                "2ed3_id" => Value::from(1),
                "1367_id" => Value::from(1),
                "1367_name" => Value::from("nameA"),
                "1367_entity_id" => Value::from(1),
            },
            maplit::btreemap! {
                "2ed3_id" => Value::from(1),
                "1367_id" => Value::from(2),
                "1367_name" => Value::from("nameB"),
                "1367_entity_id" => Value::from(1),
            },
        ]])
        .into_connection();
    let mut em = EntityManager::new(db, tests_cfg::registry());

    let entity = em.find("Entity", 1)?.expect("entity 1 exists");
    let names = entity
        .many("lazyCollection")
        .iter()
        .map(|relation| relation.try_get::<String>("name"))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(names, ["nameA", "nameB"]);
    Ok(())
}

#[test]
fn invalid_collections() -> Result<(), MapperErr> {
    let registry = tests_cfg::registry();
    let entity_mapper = registry.get("Entity")?;

    let orphan = sea_mapper::Object::new(&entity_mapper);
    assert!(matches!(
        LazyCollection::new(&registry, &orphan, "lazyCollection"),
        Err(MapperErr::Custom(_))
    ));

    let mut entity = sea_mapper::Object::new(&entity_mapper);
    entity.set("id", 1);
    assert_eq!(
        LazyCollection::new(&registry, &entity, "others").map(|_| ()),
        Err(MapperErr::UnknownProperty {
            class: "Entity".to_owned(),
            property: "others".to_owned(),
        })
    );
    Ok(())
}
