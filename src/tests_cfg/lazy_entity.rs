//! An entity owning a lazily loaded collection of relations.
//!
//! ```sql
//! CREATE TABLE relation (
//!     id INT NOT NULL,
//!     name VARCHAR(45) NULL,
//!     entity_id INT NOT NULL,
//!     PRIMARY KEY (id),
//!     FOREIGN KEY (entity_id) REFERENCES entity (id)
//! )
//! ```

use crate::{Column, Mapper, OneToMany};

pub fn entity_mapper() -> Mapper {
    Mapper::new("Entity", "entity")
        .with_column(Column::new("id", "id"))
        .with_one_to_many(OneToMany::new("lazyCollection", "Relation", "entity_id"))
}

pub fn relation_mapper() -> Mapper {
    Mapper::new("Relation", "relation")
        .with_column(Column::new("id", "id"))
        .with_column(Column::new("name", "name"))
        .with_column(Column::new("entityId", "entity_id"))
}
