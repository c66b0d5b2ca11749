//! Table creation and reference-data seeding.
//!
//! Both steps run once, synchronously, before the HTTP listener is bound.

use rusqlite::Connection;
use tracing::{debug, info, warn};

use super::schema::TABLES;
use super::Storage;
use crate::error::{Error, Result};
use crate::record::{NewCompany, NewRocket};

/// Reference companies: name, CEO/administrator, year founded, country.
const COMPANIES: &[(&str, &str, i64, &str)] = &[
    ("Rocket Lab", "Peter Beck", 2006, "NZ"),
    ("SpaceX", "Elon Musk", 2002, "US"),
    ("United Launch Alliance", "Tory Bruno", 2006, "US"),
    ("ArianeGroup", "--", 2015, "FR"),
];

/// Reference rockets: name, stages, boosters, producer name, tons to LEO.
const ROCKETS: &[(&str, i64, i64, &str, f64)] = &[
    ("Falcon 9", 2, 0, "SpaceX", 22.8),
    ("Falcon Heavy", 2, 2, "SpaceX", 63.8),
    ("Electron", 2, 0, "Rocket Lab", 0.3),
];

/// Rows inserted by [`seed_if_empty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of companies inserted.
    pub companies: usize,
    /// Number of rockets inserted.
    pub rockets: usize,
}

impl SeedReport {
    /// Whether seeding left the store untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies == 0 && self.rockets == 0
    }
}

/// Create any of the record tables that don't exist yet.
///
/// Returns the names of the tables that were created, so a second call on the
/// same database returns an empty list.
///
/// # Errors
///
/// Returns [`Error::SchemaCreate`] if a `CREATE TABLE` statement fails.
pub fn ensure_schema(conn: &Connection) -> Result<Vec<&'static str>> {
    let mut created = Vec::new();

    for &(table, statement) in TABLES {
        if table_exists(conn, table)? {
            debug!("Table {} already exists", table);
            continue;
        }

        info!("Creating {} table...", table);
        conn.execute_batch(statement)
            .map_err(|source| Error::SchemaCreate { table, source })?;
        info!("{} table created", table);
        created.push(table);
    }

    Ok(created)
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Insert the reference companies and rockets into empty tables.
///
/// Each table is checked and seeded independently, and each inside its own
/// transaction. A rocket whose producer can't be resolved by name is skipped
/// with a warning.
///
/// # Errors
///
/// Returns an error if a database operation fails; the failing table's
/// transaction is rolled back.
pub fn seed_if_empty(storage: &Storage) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if storage.count_companies()? == 0 {
        info!("Populating companies table...");
        let tx = storage.conn.unchecked_transaction()?;
        for &(name, ceo_admin_name, year_founded, country_origin) in COMPANIES {
            storage.create_company(&NewCompany {
                name: name.to_string(),
                ceo_admin_name: ceo_admin_name.to_string(),
                year_founded,
                country_origin: country_origin.to_string(),
            })?;
            report.companies += 1;
        }
        tx.commit()?;
        info!("companies table populated with {} rows", report.companies);
    }

    if storage.count_rockets()? == 0 {
        info!("Populating rockets table...");
        let tx = storage.conn.unchecked_transaction()?;
        for &(name, no_of_stages, no_of_boosters, producer_name, tons_to_leo) in ROCKETS {
            let Some(producer) = storage.company_id_by_name(producer_name)? else {
                warn!(
                    "Skipping seed rocket {}: company {} doesn't exist",
                    name, producer_name
                );
                continue;
            };
            storage.create_rocket(&NewRocket {
                name: name.to_string(),
                tons_to_leo,
                no_of_stages,
                no_of_boosters,
                producer,
            })?;
            report.rockets += 1;
        }
        tx.commit()?;
        info!("rockets table populated with {} rows", report.rockets);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    }

    #[test]
    fn test_ensure_schema_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        let created = ensure_schema(&conn).expect("failed to initialize schema");

        assert_eq!(created, ["companies", "rockets", "launches"]);
        assert_eq!(table_names(&conn), ["companies", "launches", "rockets"]);
    }

    #[test]
    fn test_ensure_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        ensure_schema(&conn).expect("first init failed");
        let created = ensure_schema(&conn).expect("second init failed");

        assert!(created.is_empty());
        assert_eq!(table_names(&conn).len(), 3);
    }

    #[test]
    fn test_ensure_schema_fills_in_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(super::super::schema::CREATE_COMPANIES_TABLE)
            .unwrap();

        let created = ensure_schema(&conn).unwrap();
        assert_eq!(created, ["rockets", "launches"]);
    }

    #[test]
    fn test_seed_empty_store() {
        let storage = Storage::open_in_memory().unwrap();
        let report = seed_if_empty(&storage).unwrap();

        assert_eq!(
            report,
            SeedReport {
                companies: 4,
                rockets: 3
            }
        );

        let spacex = storage.company_id_by_name("SpaceX").unwrap().unwrap();
        let rklb = storage.company_id_by_name("Rocket Lab").unwrap().unwrap();
        let rockets = storage.list_rockets().unwrap();
        let producers: Vec<(&str, i64)> = rockets
            .iter()
            .map(|r| (r.name.as_str(), r.producer))
            .collect();
        assert_eq!(
            producers,
            [("Falcon 9", spacex), ("Falcon Heavy", spacex), ("Electron", rklb)]
        );
        assert_eq!(rockets[1].no_of_boosters, 2);
    }

    #[test]
    fn test_seed_runs_once() {
        let storage = Storage::open_in_memory().unwrap();
        seed_if_empty(&storage).unwrap();
        let report = seed_if_empty(&storage).unwrap();

        assert!(report.is_empty());
        assert_eq!(storage.count_companies().unwrap(), 4);
        assert_eq!(storage.count_rockets().unwrap(), 3);
    }

    #[test]
    fn test_seed_leaves_existing_companies_untouched() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .create_company(&NewCompany {
                name: "SpaceX".to_string(),
                ceo_admin_name: "Gwynne Shotwell".to_string(),
                year_founded: 2002,
                country_origin: "US".to_string(),
            })
            .unwrap();

        let report = seed_if_empty(&storage).unwrap();
        assert_eq!(report.companies, 0);
        // Rocket Lab is missing, so Electron is skipped
        assert_eq!(report.rockets, 2);

        let companies = storage.list_companies().unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].ceo_admin_name, "Gwynne Shotwell");
        assert!(storage
            .list_rockets()
            .unwrap()
            .iter()
            .all(|r| r.producer == companies[0].id));
    }

    #[test]
    fn test_seed_resolves_producers_regardless_of_case() {
        let storage = Storage::open_in_memory().unwrap();
        let id = storage
            .create_company(&NewCompany {
                name: "SPACEX".to_string(),
                ceo_admin_name: "Elon Musk".to_string(),
                year_founded: 2002,
                country_origin: "US".to_string(),
            })
            .unwrap();

        let report = seed_if_empty(&storage).unwrap();
        assert_eq!(report.rockets, 2);
        let producers: Vec<i64> = storage
            .list_rockets()
            .unwrap()
            .iter()
            .map(|r| r.producer)
            .collect();
        assert_eq!(producers, [id, id]);
    }
}
