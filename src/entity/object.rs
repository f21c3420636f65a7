use crate::{
    Mapper, MapperErr,
    executor::{identity_value, is_null, try_from_value},
};
use sea_query::{Value, ValueType};
use std::collections::BTreeMap;

/// The value held by one property of a hydrated [Object]
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// A scalar mapped from a column
    Value(Value),
    /// A many-to-one relation; `None` when the join found no row
    One(Option<Box<Object>>),
    /// A one-to-many relation
    Many(Vec<Object>),
}

/// Identity of an object: its class and primary key value.
///
/// Integer keys are held as `BigInt` whatever width they were read or
/// written with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId {
    class: String,
    id: Value,
}

/// An entity instance built from result rows.
///
/// Objects are filled property by property as a row is read; no domain
/// constructor runs. Typed domain structs are obtained with [FromObject].
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    class: String,
    primary_key: Option<String>,
    properties: BTreeMap<String, Property>,
}

/// Convert a hydrated [Object] into a domain type
pub trait FromObject: Sized {
    fn from_object(object: &Object) -> Result<Self, MapperErr>;
}

impl ObjectId {
    pub fn new<C, V>(class: C, id: V) -> Self
    where
        C: Into<String>,
        V: Into<Value>,
    {
        Self {
            class: class.into(),
            id: identity_value(id.into()),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn id(&self) -> &Value {
        &self.id
    }
}

impl Object {
    /// An empty object of the mapper's class
    pub fn new(mapper: &Mapper) -> Self {
        Self {
            class: mapper.class().to_owned(),
            primary_key: mapper.primary_key().map(|c| c.property().to_owned()),
            properties: BTreeMap::new(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// The primary key value; `None` if unset or `NULL`
    pub fn id(&self) -> Option<&Value> {
        let key = self.primary_key.as_deref()?;
        self.value(key).filter(|v| !is_null(v))
    }

    pub fn object_id(&self) -> Option<ObjectId> {
        self.id()
            .map(|id| ObjectId::new(self.class.as_str(), id.clone()))
    }

    pub fn get(&self, property: &str) -> Option<&Property> {
        self.properties.get(property)
    }

    /// Scalar value of a property
    pub fn value(&self, property: &str) -> Option<&Value> {
        match self.properties.get(property) {
            Some(Property::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Scalar value of a property converted into `T`
    pub fn try_get<T>(&self, property: &str) -> Result<T, MapperErr>
    where
        T: ValueType,
    {
        let value = self
            .value(property)
            .ok_or_else(|| MapperErr::unknown_property(&self.class, property))?;
        try_from_value(value.clone())
            .map_err(|err| MapperErr::Type(format!("{}.{property}: {err}", self.class)))
    }

    /// The related object of a many-to-one property
    pub fn one(&self, property: &str) -> Option<&Object> {
        match self.properties.get(property) {
            Some(Property::One(Some(object))) => Some(&**object),
            _ => None,
        }
    }

    /// The related objects of a one-to-many property
    pub fn many(&self, property: &str) -> &[Object] {
        match self.properties.get(property) {
            Some(Property::Many(objects)) => objects.as_slice(),
            _ => &[],
        }
    }

    /// Set a scalar property
    pub fn set<V>(&mut self, property: &str, value: V)
    where
        V: Into<Value>,
    {
        self.set_property(property, Property::Value(value.into()));
    }

    pub fn set_property(&mut self, property: &str, value: Property) {
        self.properties.insert(property.to_owned(), value);
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Append to a one-to-many property unless an object with the same
    /// identity, or an equal object without identity, is already present
    pub(crate) fn push_unique(&mut self, property: &str, object: Object) {
        let entry = self
            .properties
            .entry(property.to_owned())
            .or_insert_with(|| Property::Many(Vec::new()));
        if let Property::Many(objects) = entry {
            let duplicate = match object.object_id() {
                Some(id) => objects.iter().any(|o| o.object_id().as_ref() == Some(&id)),
                None => objects.contains(&object),
            };
            if !duplicate {
                objects.push(object);
            }
        }
    }

    /// Make sure a one-to-many property exists, even if empty
    pub(crate) fn init_many(&mut self, property: &str) {
        self.properties
            .entry(property.to_owned())
            .or_insert_with(|| Property::Many(Vec::new()));
    }
}
