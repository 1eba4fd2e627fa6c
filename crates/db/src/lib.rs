use sqlx_migrator::{Info, Migrator};

mod m0001;
mod m0002;
mod m0003;
mod m0004;
pub mod table;

/// Every schema version, oldest first. Later migrations only add tables,
/// columns and indexes.
pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    let migrations: Vec<Box<dyn sqlx_migrator::Migration<sqlx::Sqlite>>> = vec![
        Box::new(m0001::Migration),
        Box::new(m0002::Migration),
        Box::new(m0003::Migration),
        Box::new(m0004::Migration),
    ];
    migrator.add_migrations(migrations)?;

    Ok(migrator)
}
