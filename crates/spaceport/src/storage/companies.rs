use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::Storage;
use crate::error::Result;
use crate::record::{Company, NewCompany};

impl Storage {
    /// List every company in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_companies(&self) -> Result<Vec<Company>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, name, ceo_admin_name, year_founded, country_origin
            FROM companies ORDER BY id
            ",
        )?;

        let companies = stmt
            .query_map([], Self::row_to_company)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(companies)
    }

    /// Get a company by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_company(&self, id: i64) -> Result<Option<Company>> {
        let result = self
            .conn
            .query_row(
                r"
                SELECT id, name, ceo_admin_name, year_founded, country_origin
                FROM companies WHERE id = ?1
                ",
                [id],
                Self::row_to_company,
            )
            .optional()?;
        Ok(result)
    }

    /// Insert a company and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn create_company(&self, company: &NewCompany) -> Result<i64> {
        self.conn.execute(
            r"
            INSERT INTO companies (name, ceo_admin_name, year_founded, country_origin)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                company.name,
                company.ceo_admin_name,
                company.year_founded,
                company.country_origin,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted company {} with id {}", company.name, id);
        Ok(id)
    }

    /// Resolve a company name to its id, ignoring ASCII case (first match wins).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn company_id_by_name(&self, name: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM companies WHERE name = ?1 COLLATE NOCASE ORDER BY id LIMIT 1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Count companies in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_companies(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM companies")
    }

    pub(crate) fn company_exists(&self, id: i64) -> Result<bool> {
        self.row_exists("SELECT COUNT(*) FROM companies WHERE id = ?1", id)
    }

    fn row_to_company(row: &rusqlite::Row) -> rusqlite::Result<Company> {
        Ok(Company {
            id: row.get(0)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            ceo_admin_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            year_founded: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
            country_origin: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn rocket_lab() -> NewCompany {
        NewCompany {
            name: "Rocket Lab".to_string(),
            ceo_admin_name: "Peter Beck".to_string(),
            year_founded: 2006,
            country_origin: "NZ".to_string(),
        }
    }

    #[test]
    fn test_list_empty() {
        let storage = create_test_storage();
        assert!(storage.list_companies().unwrap().is_empty());
    }

    #[test]
    fn test_create_then_list() {
        let storage = create_test_storage();
        let id = storage.create_company(&rocket_lab()).unwrap();
        assert!(id >= 1);

        let companies = storage.list_companies().unwrap();
        assert_eq!(
            companies,
            vec![Company {
                id,
                name: "Rocket Lab".to_string(),
                ceo_admin_name: "Peter Beck".to_string(),
                year_founded: 2006,
                country_origin: "NZ".to_string(),
            }]
        );
    }

    #[test]
    fn test_create_then_get() {
        let storage = create_test_storage();
        let id = storage.create_company(&rocket_lab()).unwrap();

        let company = storage.get_company(id).unwrap().unwrap();
        assert_eq!(company.id, id);
        assert_eq!(company.ceo_admin_name, "Peter Beck");
    }

    #[test]
    fn test_get_nonexistent() {
        let storage = create_test_storage();
        assert!(storage.get_company(99999).unwrap().is_none());
    }

    #[test]
    fn test_ids_increase() {
        let storage = create_test_storage();
        let first = storage.create_company(&rocket_lab()).unwrap();
        let second = storage.create_company(&rocket_lab()).unwrap();
        assert!(second > first);
        assert_eq!(storage.count_companies().unwrap(), 2);
    }

    #[test]
    fn test_quotes_are_stored_verbatim() {
        let storage = create_test_storage();
        let mut company = rocket_lab();
        company.name = "O'Neill's Rockets'); DROP TABLE companies; --".to_string();

        let id = storage.create_company(&company).unwrap();
        assert_eq!(storage.get_company(id).unwrap().unwrap().name, company.name);
        assert_eq!(storage.count_companies().unwrap(), 1);
    }

    #[test]
    fn test_company_id_by_name() {
        let storage = create_test_storage();
        let id = storage.create_company(&rocket_lab()).unwrap();

        assert_eq!(storage.company_id_by_name("Rocket Lab").unwrap(), Some(id));
        assert_eq!(storage.company_id_by_name("Astra").unwrap(), None);
    }

    #[test]
    fn test_company_id_by_name_ignores_case() {
        let storage = create_test_storage();
        let id = storage.create_company(&rocket_lab()).unwrap();

        assert_eq!(storage.company_id_by_name("rocket lab").unwrap(), Some(id));
        assert_eq!(storage.company_id_by_name("ROCKET LAB").unwrap(), Some(id));
        assert_eq!(storage.company_id_by_name("Rocket Labs").unwrap(), None);
    }

    #[test]
    fn test_company_exists() {
        let storage = create_test_storage();
        let id = storage.create_company(&rocket_lab()).unwrap();
        assert!(storage.company_exists(id).unwrap());
        assert!(!storage.company_exists(id + 1).unwrap());
    }
}
