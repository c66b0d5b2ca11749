use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::Storage;
use crate::error::{Entity, Error, Result};
use crate::record::{NewRocket, Rocket};

impl Storage {
    /// List every rocket in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_rockets(&self) -> Result<Vec<Rocket>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, name, tons_to_leo, no_of_stages, no_of_boosters, producer
            FROM rockets ORDER BY id
            ",
        )?;

        let rockets = stmt
            .query_map([], Self::row_to_rocket)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rockets)
    }

    /// Get a rocket by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_rocket(&self, id: i64) -> Result<Option<Rocket>> {
        let result = self
            .conn
            .query_row(
                r"
                SELECT id, name, tons_to_leo, no_of_stages, no_of_boosters, producer
                FROM rockets WHERE id = ?1
                ",
                [id],
                Self::row_to_rocket,
            )
            .optional()?;
        Ok(result)
    }

    /// Insert a rocket and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownReference`] if the producer isn't a stored
    /// company, or an error if the database operation fails.
    pub fn create_rocket(&self, rocket: &NewRocket) -> Result<i64> {
        if !self.company_exists(rocket.producer)? {
            return Err(Error::UnknownReference {
                field: "producer",
                entity: Entity::Company,
                id: rocket.producer,
            });
        }

        self.conn.execute(
            r"
            INSERT INTO rockets (name, tons_to_leo, no_of_stages, no_of_boosters, producer)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                rocket.name,
                rocket.tons_to_leo,
                rocket.no_of_stages,
                rocket.no_of_boosters,
                rocket.producer,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted rocket {} with id {}", rocket.name, id);
        Ok(id)
    }

    /// Count rockets in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_rockets(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM rockets")
    }

    pub(crate) fn rocket_exists(&self, id: i64) -> Result<bool> {
        self.row_exists("SELECT COUNT(*) FROM rockets WHERE id = ?1", id)
    }

    fn row_to_rocket(row: &rusqlite::Row) -> rusqlite::Result<Rocket> {
        Ok(Rocket {
            id: row.get(0)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            tons_to_leo: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
            no_of_stages: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
            no_of_boosters: row.get::<_, Option<i64>>(4)?.unwrap_or_default(),
            producer: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::record::NewCompany;

    fn create_test_storage() -> (Storage, i64) {
        let storage = Storage::open_in_memory().expect("failed to create test storage");
        let spacex = storage
            .create_company(&NewCompany {
                name: "SpaceX".to_string(),
                ceo_admin_name: "Elon Musk".to_string(),
                year_founded: 2002,
                country_origin: "US".to_string(),
            })
            .unwrap();
        (storage, spacex)
    }

    fn falcon_heavy(producer: i64) -> NewRocket {
        NewRocket {
            name: "Falcon Heavy".to_string(),
            tons_to_leo: 63.8,
            no_of_stages: 2,
            no_of_boosters: 2,
            producer,
        }
    }

    #[test]
    fn test_list_empty() {
        let (storage, _) = create_test_storage();
        assert!(storage.list_rockets().unwrap().is_empty());
    }

    #[test]
    fn test_create_then_list_and_get() {
        let (storage, spacex) = create_test_storage();
        let id = storage.create_rocket(&falcon_heavy(spacex)).unwrap();

        let expected = Rocket {
            id,
            name: "Falcon Heavy".to_string(),
            tons_to_leo: 63.8,
            no_of_stages: 2,
            no_of_boosters: 2,
            producer: spacex,
        };
        assert_eq!(storage.list_rockets().unwrap(), vec![expected.clone()]);
        assert_eq!(storage.get_rocket(id).unwrap(), Some(expected));
    }

    #[test]
    fn test_get_nonexistent() {
        let (storage, _) = create_test_storage();
        assert!(storage.get_rocket(99999).unwrap().is_none());
    }

    #[test]
    fn test_unknown_producer_rejected() {
        let (storage, spacex) = create_test_storage();
        let err = storage.create_rocket(&falcon_heavy(spacex + 100)).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownReference {
                field: "producer",
                entity: Entity::Company,
                ..
            }
        ));
        assert_eq!(storage.count_rockets().unwrap(), 0);
    }

    #[test]
    fn test_fractional_capacity_round_trips() {
        let (storage, spacex) = create_test_storage();
        let mut rocket = falcon_heavy(spacex);
        rocket.tons_to_leo = 0.3;
        let id = storage.create_rocket(&rocket).unwrap();
        assert!((storage.get_rocket(id).unwrap().unwrap().tons_to_leo - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rocket_exists() {
        let (storage, spacex) = create_test_storage();
        let id = storage.create_rocket(&falcon_heavy(spacex)).unwrap();
        assert!(storage.rocket_exists(id).unwrap());
        assert!(!storage.rocket_exists(id + 1).unwrap());
    }
}
