use crate::MapperErr;
use sea_query::Value;
use std::sync::Arc;

/// Converts values between their column and property representation
pub trait ValueConverter: Send + Sync {
    /// Convert a value read from a row into the property value
    fn to_property(&self, value: Value) -> Result<Value, MapperErr>;

    /// Convert a property value into the value written to the column
    fn to_column(&self, value: Value) -> Result<Value, MapperErr>;
}

/// Passes values through unchanged
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IdentityConverter;

impl ValueConverter for IdentityConverter {
    fn to_property(&self, value: Value) -> Result<Value, MapperErr> {
        Ok(value)
    }

    fn to_column(&self, value: Value) -> Result<Value, MapperErr> {
        Ok(value)
    }
}

/// Maps one property of an entity onto one column of its table
#[derive(Clone, derive_more::Debug)]
pub struct Column {
    property: String,
    name: String,
    #[debug(skip)]
    converter: Arc<dyn ValueConverter>,
}

impl Column {
    /// A column whose values are copied into the property as is
    pub fn new<P, N>(property: P, name: N) -> Self
    where
        P: Into<String>,
        N: Into<String>,
    {
        Self {
            property: property.into(),
            name: name.into(),
            converter: Arc::new(IdentityConverter),
        }
    }

    /// Replace the value conversion hook
    pub fn with_converter<C>(mut self, converter: C) -> Self
    where
        C: ValueConverter + 'static,
    {
        self.converter = Arc::new(converter);
        self
    }

    /// Name of the entity property
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Name of the table column
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value conversion hook
    pub fn converter(&self) -> &dyn ValueConverter {
        self.converter.as_ref()
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.property == other.property && self.name == other.name
    }
}
