use pretty_assertions::assert_eq;
use sea_mapper::{
    DbBackend, EntityManager, FromObject, MapperErr, MockDatabase, MockExecResult, Object,
    ObjectId, Property, Statement, tests_cfg,
    tests_cfg::company::{Company, Employee},
};

mod common;

use common::{company_row, employee_row, sqlite_row};

const COMPANY_SELECT: &str = concat!(
    r#"SELECT "de47"."id" AS "de47_id", "de47"."name" AS "de47_name", "#,
    r#""1401"."id" AS "1401_id", "1401"."name" AS "1401_name", "1401"."company_id" AS "1401_company_id" "#,
    r#"FROM "company" AS "de47" "#,
    r#"LEFT JOIN "employee" AS "1401" ON "1401"."company_id" = "de47"."id""#,
);

#[test]
fn find_company_with_employees() -> Result<(), MapperErr> {
    common::setup();

    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([[
            company_row(1, "Acme", Some((10, "Ada"))),
            company_row(1, "Acme", Some((11, "Grace"))),
        ]])
        .into_connection();
    let mut em = EntityManager::new(db, tests_cfg::registry());

    let acme = em.find("Company", 1)?.expect("company 1 exists");
    assert_eq!(
        Company::from_object(&acme)?,
        Company {
            id: 1,
            name: "Acme".to_owned(),
            employees: vec![
                Employee {
                    id: 10,
                    name: "Ada".to_owned(),
                    company_id: Some(1),
                },
                Employee {
                    id: 11,
                    name: "Grace".to_owned(),
                    company_id: Some(1),
                },
            ],
        }
    );

    // served by the unit of work, the mock has no second result
    let again = em.find("Company", 1)?.expect("company 1 is managed");
    assert_eq!(again, acme);
    assert!(em.unit_of_work().contains(&ObjectId::new("Company", 1)));

    assert_eq!(
        em.connection().transaction_log()?,
        [Statement::from_sql_and_values(
            DbBackend::Postgres,
            format!(r#"{COMPANY_SELECT} WHERE "de47"."id" = $1"#),
            [1.into()]
        )]
    );
    Ok(())
}

#[test]
fn identity_ignores_integer_width() -> Result<(), MapperErr> {
    let db = MockDatabase::new(DbBackend::Sqlite)
        .append_query_results([[
            sqlite_row(company_row(1, "Acme", Some((10, "Ada")))),
            sqlite_row(company_row(1, "Acme", Some((11, "Grace")))),
        ]])
        .into_connection();
    let mut em = EntityManager::new(db, tests_cfg::registry());

    let acme = em.find("Company", 1)?.expect("company 1 exists");
    assert_eq!(acme.value("id"), Some(&sea_mapper::Value::BigInt(Some(1))));
    assert_eq!(acme.many("employees").len(), 2);

    let company = Company::from_object(&acme)?;
    assert_eq!(company.id, 1);
    assert_eq!(
        company.employees.iter().map(|e| e.company_id).collect::<Vec<_>>(),
        [Some(1), Some(1)]
    );

    // keyed as `Int`, loaded as `BigInt`: still the same object
    assert_eq!(em.find("Company", 1)?, Some(acme.clone()));
    assert_eq!(em.find("Company", 1i64)?, Some(acme));
    assert_eq!(em.connection().transaction_log()?.len(), 1);
    Ok(())
}

#[test]
fn inserted_object_is_managed() -> Result<(), MapperErr> {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 5,
            rows_affected: 1,
        }])
        .into_connection();
    let mut em = EntityManager::new(db, tests_cfg::registry());

    let mut person = em.create("Person")?;
    person.set("lastname", "Fowler");
    person.set("firstname", "Martin");
    person.set("numberOfDependents", 2);
    em.persist(person)?;
    em.flush()?;

    let found = em.find("Person", 5)?.expect("person 5 was inserted");
    assert_eq!(
        tests_cfg::person::Person::from_object(&found)?,
        tests_cfg::person::Person {
            id: 5,
            lastname: "Fowler".to_owned(),
            firstname: "Martin".to_owned(),
            number_of_dependents: 2,
        }
    );
    assert_eq!(em.connection().transaction_log()?.len(), 1);
    Ok(())
}

#[test]
fn find_missing_object() -> Result<(), MapperErr> {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([Vec::<std::collections::BTreeMap<&str, sea_mapper::Value>>::new()])
        .into_connection();
    let mut em = EntityManager::new(db, tests_cfg::registry());

    assert_eq!(em.find("Employee", 404)?, None);
    Ok(())
}

#[test]
fn find_all_employees_with_company() -> Result<(), MapperErr> {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_results([[
            employee_row(10, "Ada", Some((1, "Acme"))),
            employee_row(12, "Linus", None),
            employee_row(11, "Grace", Some((1, "Acme"))),
        ]])
        .into_connection();
    let mut em = EntityManager::new(db, tests_cfg::registry());

    let employees = em.find_all("Employee")?;

    assert_eq!(
        employees
            .iter()
            .map(Employee::from_object)
            .collect::<Result<Vec<_>, _>>()?,
        [
            Employee {
                id: 10,
                name: "Ada".to_owned(),
                company_id: Some(1),
            },
            Employee {
                id: 12,
                name: "Linus".to_owned(),
                company_id: None,
            },
            Employee {
                id: 11,
                name: "Grace".to_owned(),
                company_id: Some(1),
            },
        ]
    );
    assert_eq!(
        employees[0].one("company").map(|c| c.try_get::<String>("name")),
        Some(Ok("Acme".to_owned()))
    );
    assert_eq!(employees[1].get("company"), Some(&Property::One(None)));
    // the same row data makes equal but separate related objects
    assert_eq!(employees[0].one("company"), employees[2].one("company"));

    assert_eq!(
        em.connection().transaction_log()?[0].sql,
        concat!(
            r#"SELECT "1401"."id" AS "1401_id", "1401"."name" AS "1401_name", "1401"."company_id" AS "1401_company_id", "#,
            r#""de47"."id" AS "de47_id", "de47"."name" AS "de47_name" "#,
            r#"FROM "employee" AS "1401" "#,
            r#"LEFT JOIN "company" AS "de47" ON "1401"."company_id" = "de47"."id""#,
        )
    );
    Ok(())
}

#[test]
fn unknown_class() {
    let db = MockDatabase::new(DbBackend::Postgres).into_connection();
    let mut em = EntityManager::new(db, tests_cfg::registry());

    assert_eq!(
        em.find("Invoice", 1),
        Err(MapperErr::UnknownClass("Invoice".to_owned()))
    );
    assert_eq!(
        em.create("Invoice"),
        Err(MapperErr::UnknownClass("Invoice".to_owned()))
    );
    assert!(em.connection().transaction_log().map(|log| log.is_empty()).unwrap_or(false));
}

#[test]
fn query_errors_propagate() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_errors([MapperErr::Query("connection reset".to_owned())])
        .into_connection();
    let mut em = EntityManager::new(db, tests_cfg::registry());

    assert_eq!(
        em.find_all("Company"),
        Err(MapperErr::Query("connection reset".to_owned()))
    );
}

#[test]
fn persist_merge_remove_flush() -> Result<(), MapperErr> {
    common::setup();

    let db = MockDatabase::new(DbBackend::Sqlite)
        .append_query_results([[employee_row(10, "Ada", None)]])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 2,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();
    let mut em = EntityManager::new(db, tests_cfg::registry());

    let mut initech: Object = em.create("Company")?;
    initech.set("name", "Initech");
    em.persist(initech)?;

    let mut ada = em.find("Employee", 10)?.expect("employee 10 exists");
    ada.set("name", "Ada Lovelace");
    em.merge(ada.clone())?;
    em.remove(ada)?;

    let mut linus = em.create("Employee")?;
    linus.set("id", 12);
    linus.set("name", "Linus");
    em.merge(linus)?;
    em.remove(em.create("Employee")?).unwrap_err();

    em.flush()?;

    let initech = em
        .unit_of_work()
        .get(&ObjectId::new("Company", 2i64))
        .expect("inserted company is managed");
    assert_eq!(initech.try_get::<String>("name")?, "Initech");
    assert!(!em.unit_of_work().contains(&ObjectId::new("Employee", 10)));
    assert!(!em.unit_of_work().has_pending_changes());

    let log: Vec<String> = em
        .connection()
        .transaction_log()?
        .into_iter()
        .skip(1)
        .map(|stmt| stmt.to_string())
        .collect();
    assert_eq!(
        log,
        [
            r#"INSERT INTO "company" ("name") VALUES ('Initech')"#,
            r#"UPDATE "employee" SET "name" = 'Linus' WHERE "id" = 12"#,
            r#"DELETE FROM "employee" WHERE "id" = 10"#,
        ]
    );
    Ok(())
}
