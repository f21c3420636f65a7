//! Fixtures shared by unit and integration tests

pub mod company;
pub mod lazy_entity;
pub mod person;

use crate::ClassMetadataCollection;

/// Mappers of every fixture class
pub fn registry() -> ClassMetadataCollection {
    ClassMetadataCollection::new()
        .with(person::mapper())
        .with(company::company_mapper())
        .with(company::employee_mapper())
        .with(lazy_entity::entity_mapper())
        .with(lazy_entity::relation_mapper())
}
