//! Migrator registering the review schema.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_review;
mod m20240101_000002_add_review_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_review::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_review_indexes::Migration),
        ]
    }
}
