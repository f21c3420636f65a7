#![allow(dead_code)]

use sea_mapper::Value;
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness; `RUST_LOG` selects the level
pub fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn company_row(
    id: i32,
    name: &str,
    employee: Option<(i32, &str)>,
) -> BTreeMap<&'static str, Value> {
    let (employee_id, employee_name, company_id) = match employee {
        Some((employee_id, employee_name)) => (
            Value::from(employee_id),
            Value::from(employee_name),
            Value::from(id),
        ),
        None => (Value::Int(None), Value::String(None), Value::Int(None)),
    };
    maplit::btreemap! {
        "de47_id" => Value::from(id),
        "de47_name" => Value::from(name),
        "1401_id" => employee_id,
        "1401_name" => employee_name,
        "1401_company_id" => company_id,
    }
}

pub fn employee_row(
    id: i32,
    name: &str,
    company: Option<(i32, &str)>,
) -> BTreeMap<&'static str, Value> {
    let (company_id, company_name) = match company {
        Some((company_id, company_name)) => (Value::from(company_id), Value::from(company_name)),
        None => (Value::Int(None), Value::String(None)),
    };
    maplit::btreemap! {
        "1401_id" => Value::from(id),
        "1401_name" => Value::from(name),
        "1401_company_id" => company_id.clone(),
        "de47_id" => company_id,
        "de47_name" => company_name,
    }
}

/// The row as the SQLite driver returns it, with every integer as `BigInt`
pub fn sqlite_row(row: BTreeMap<&'static str, Value>) -> BTreeMap<&'static str, Value> {
    row.into_iter()
        .map(|(label, value)| match value {
            Value::Int(int) => (label, Value::BigInt(int.map(i64::from))),
            value => (label, value),
        })
        .collect()
}
