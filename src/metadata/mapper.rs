use super::{Column, ManyToOne, OneToMany};
use sha2::{Digest, Sha256};

/// Mapping metadata of one entity class: its table, columns and relations.
///
/// A mapper is built once per class and then shared read-only through a
/// [crate::ClassMetadataCollection].
#[derive(Debug, Clone, PartialEq)]
pub struct Mapper {
    class: String,
    table: String,
    alias: String,
    columns: Vec<Column>,
    one_to_many: Vec<OneToMany>,
    many_to_one: Vec<ManyToOne>,
}

impl Mapper {
    /// Every mapped table keys its rows by this column
    pub const PRIMARY_KEY: &'static str = "id";

    /// Length of the table alias derived from the class name
    pub const ALIAS_LEN: usize = 4;

    /// A mapper of `class` stored in `table`, without columns or relations.
    /// The alias is derived from the class name with [table_alias].
    pub fn new<C, T>(class: C, table: T) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        let class = class.into();
        let alias = table_alias(&class);
        Self {
            class,
            table: table.into(),
            alias,
            columns: Vec::new(),
            one_to_many: Vec::new(),
            many_to_one: Vec::new(),
        }
    }

    /// Map one more property onto a column
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Declare a collection property
    pub fn with_one_to_many(mut self, relation: OneToMany) -> Self {
        self.one_to_many.push(relation);
        self
    }

    /// Declare a single related object property
    pub fn with_many_to_one(mut self, relation: ManyToOne) -> Self {
        self.many_to_one.push(relation);
        self
    }

    /// Name of the entity class
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Name of the mapped table
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Alias of the table inside a select
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Declared columns, in select order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Declared collection relations
    pub fn one_to_many(&self) -> &[OneToMany] {
        &self.one_to_many
    }

    /// Declared single object relations
    pub fn many_to_one(&self) -> &[ManyToOne] {
        &self.many_to_one
    }

    /// The column mapped to [Mapper::PRIMARY_KEY], if declared
    pub fn primary_key(&self) -> Option<&Column> {
        self.column_by_name(Self::PRIMARY_KEY)
    }

    /// The column stored under the table column `name`
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// The column mapped to the entity property `property`
    pub fn column_by_property(&self, property: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.property() == property)
    }

    /// The collection relation held by `property`
    pub fn find_one_to_many(&self, property: &str) -> Option<&OneToMany> {
        self.one_to_many.iter().find(|r| r.property() == property)
    }

    /// The single object relation held by `property`
    pub fn find_many_to_one(&self, property: &str) -> Option<&ManyToOne> {
        self.many_to_one.iter().find(|r| r.property() == property)
    }
}

/// Hex digest of the class name, cut to [Mapper::ALIAS_LEN] characters.
/// Two classes may collide; nothing detects it.
pub fn table_alias(class: &str) -> String {
    let digest = hex::encode(Sha256::digest(class.as_bytes()));
    digest[..Mapper::ALIAS_LEN].to_owned()
}
