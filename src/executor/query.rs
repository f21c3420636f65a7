use crate::MapperErr;
use sea_query::{Value, ValueType, ValueTypeErr};
use std::collections::BTreeMap;

/// One flat row returned by a query, keyed by column label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub(crate) values: BTreeMap<String, Value>,
}

impl QueryResult {
    /// Whether the row carries a field with this label
    pub fn contains(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }

    /// Get the raw value of a field
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.values.get(label)
    }

    /// Get the raw value of the field `{pre}{col}`
    pub fn try_get_value(&self, pre: &str, col: &str) -> Result<&Value, MapperErr> {
        let label = format!("{pre}{col}");
        self.values
            .get(&label)
            .ok_or_else(|| MapperErr::Query(format!("column `{label}` does not exist in row")))
    }

    /// Get the field `{pre}{col}` converted into `T`
    pub fn try_get<T>(&self, pre: &str, col: &str) -> Result<T, MapperErr>
    where
        T: ValueType,
    {
        let value = self.try_get_value(pre, col)?;
        try_from_value(value.clone())
            .map_err(|err| MapperErr::Type(format!("column `{pre}{col}`: {err}")))
    }

    /// The labels of every field in the row
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K> FromIterator<(K, Value)> for QueryResult
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Whether a value is a typed SQL `NULL`
pub(crate) fn is_null(value: &Value) -> bool {
    *value == value.as_null()
}

/// Convert a value into `T`, accepting an integer of any width as long as
/// it fits the integer type `T` expects
pub(crate) fn try_from_value<T>(value: Value) -> Result<T, ValueTypeErr>
where
    T: ValueType,
{
    let Some(int) = as_integer(&value) else {
        return <T as ValueType>::try_from(value);
    };
    <T as ValueType>::try_from(value).or_else(|err| {
        [
            fit(int).map(Value::BigInt),
            fit(int).map(Value::Int),
            fit(int).map(Value::SmallInt),
            fit(int).map(Value::TinyInt),
            fit(int).map(Value::BigUnsigned),
            fit(int).map(Value::Unsigned),
            fit(int).map(Value::SmallUnsigned),
            fit(int).map(Value::TinyUnsigned),
        ]
        .into_iter()
        .flatten()
        .find_map(|candidate| <T as ValueType>::try_from(candidate).ok())
        .ok_or(err)
    })
}

/// The form a primary key takes inside an identity: every integer that fits
/// becomes a `BigInt`, so `Int(5)` and `BigInt(5)` name the same object
pub(crate) fn identity_value(value: Value) -> Value {
    match as_integer(&value).and_then(fit) {
        Some(int) => Value::BigInt(int),
        None => value,
    }
}

/// `Some` for integer variants, carrying the value or `None` for `NULL`
fn as_integer(value: &Value) -> Option<Option<i128>> {
    Some(match *value {
        Value::TinyInt(v) => v.map(i128::from),
        Value::SmallInt(v) => v.map(i128::from),
        Value::Int(v) => v.map(i128::from),
        Value::BigInt(v) => v.map(i128::from),
        Value::TinyUnsigned(v) => v.map(i128::from),
        Value::SmallUnsigned(v) => v.map(i128::from),
        Value::Unsigned(v) => v.map(i128::from),
        Value::BigUnsigned(v) => v.map(i128::from),
        _ => return None,
    })
}

/// Narrow an integer; `None` when it does not fit `N`
fn fit<N>(int: Option<i128>) -> Option<Option<N>>
where
    N: TryFrom<i128>,
{
    match int {
        Some(int) => N::try_from(int).ok().map(Some),
        None => Some(None),
    }
}
