use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::Storage;
use crate::error::{Entity, Error, Result};
use crate::record::{Launch, NewLaunch};
use crate::timecodec;

impl Storage {
    /// List every launch in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_launches(&self) -> Result<Vec<Launch>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, mission_name, launch_date, vehicle, tons_launched, outcome
            FROM launches ORDER BY id
            ",
        )?;

        let launches = stmt
            .query_map([], Self::row_to_launch)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(launches)
    }

    /// Get a launch by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_launch(&self, id: i64) -> Result<Option<Launch>> {
        let result = self
            .conn
            .query_row(
                r"
                SELECT id, mission_name, launch_date, vehicle, tons_launched, outcome
                FROM launches WHERE id = ?1
                ",
                [id],
                Self::row_to_launch,
            )
            .optional()?;
        Ok(result)
    }

    /// Insert a launch and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownReference`] if the vehicle isn't a stored
    /// rocket, or an error if the database operation fails.
    pub fn create_launch(&self, launch: &NewLaunch) -> Result<i64> {
        if !self.rocket_exists(launch.vehicle)? {
            return Err(Error::UnknownReference {
                field: "vehicle",
                entity: Entity::Rocket,
                id: launch.vehicle,
            });
        }

        self.conn.execute(
            r"
            INSERT INTO launches (mission_name, launch_date, vehicle, tons_launched, outcome)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                launch.mission_name,
                launch.launch_date_timestamp,
                launch.vehicle,
                launch.tons_launched,
                launch.outcome,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted launch {} with id {}", launch.mission_name, id);
        Ok(id)
    }

    /// Count launches in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_launches(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM launches")
    }

    fn row_to_launch(row: &rusqlite::Row) -> rusqlite::Result<Launch> {
        let launch_date_timestamp = row.get::<_, Option<i64>>(2)?.unwrap_or_default();

        Ok(Launch {
            id: row.get(0)?,
            mission_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            launch_date_timestamp,
            launch_date: timecodec::parse_time_from_int(launch_date_timestamp),
            vehicle: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
            tons_launched: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
            outcome: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        })
    }
}
