#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # SeaMapper
//!
//! A synchronous data mapper built on [SeaQuery](https://github.com/SeaQL/sea-query).
//!
//! Entity classes are described at runtime by [Mapper] metadata: a table, its
//! columns and the one-to-many / many-to-one relations to other classes. A
//! [Context] turns the metadata of a root class into one aliased `SELECT`
//! that left joins every related table, and the [ObjectHydrator] folds the
//! flat result rows back into a graph of [Object]s, deduplicated by identity.
//! The [EntityManager] ties it together with a connection and a [UnitOfWork].
//!
//! ```
//! use sea_mapper::{
//!     ClassMetadataCollection, Column, DbBackend, EntityManager, ManyToOne, Mapper,
//!     MockDatabase, Value,
//! };
//! use std::collections::BTreeMap;
//!
//! # fn main() -> Result<(), sea_mapper::MapperErr> {
//! let registry = ClassMetadataCollection::new()
//!     .with(
//!         Mapper::new("Company", "company")
//!             .with_column(Column::new("id", "id"))
//!             .with_column(Column::new("name", "name")),
//!     )
//!     .with(
//!         Mapper::new("Employee", "employee")
//!             .with_column(Column::new("id", "id"))
//!             .with_column(Column::new("name", "name"))
//!             .with_many_to_one(ManyToOne::new("company", "Company", "company_id")),
//!     );
//!
//! let row: BTreeMap<&str, Value> = [
//!     ("1401_id", 1.into()),
//!     ("1401_name", "Ada".into()),
//!     ("de47_id", 7.into()),
//!     ("de47_name", "Acme".into()),
//! ]
//! .into_iter()
//! .collect();
//! let db = MockDatabase::new(DbBackend::Postgres)
//!     .append_query_results([[row]])
//!     .into_connection();
//!
//! let mut em = EntityManager::new(db, registry);
//! let ada = em.find("Employee", 1)?.expect("found");
//! assert_eq!(ada.try_get::<String>("name")?, "Ada");
//! assert_eq!(ada.one("company").map(|c| c.try_get::<String>("name")), Some(Ok("Acme".to_owned())));
//! # Ok(())
//! # }
//! ```

mod data_mapper;
mod database;
#[cfg(feature = "rusqlite")]
mod driver;
mod entity;
mod entity_manager;
/// Error types for all mapper operations
pub mod error;
mod executor;
mod hydrator;
mod lazy;
mod metadata;
mod query;
#[cfg(feature = "tests-cfg")]
#[cfg_attr(docsrs, doc(cfg(feature = "tests-cfg")))]
pub mod tests_cfg;
mod unit_of_work;
mod util;

pub use data_mapper::*;
pub use database::*;
#[cfg(feature = "rusqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "rusqlite")))]
pub use driver::*;
pub use entity::*;
pub use entity_manager::*;
pub use error::*;
pub use executor::*;
pub use hydrator::*;
pub use lazy::*;
pub use metadata::*;
pub use query::*;
pub use unit_of_work::*;

pub use sea_query;
pub use sea_query::Value;
