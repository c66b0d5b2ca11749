//! `SQLite` schema definitions for spaceport.
//!
//! This module contains the SQL statements for creating the three record
//! tables.

/// SQL statement to create the companies table.
pub const CREATE_COMPANIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS companies (
    "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    "name" TEXT,
    "ceo_admin_name" TEXT,
    "year_founded" INTEGER,
    "country_origin" TEXT
)
"#;

/// SQL statement to create the rockets table.
pub const CREATE_ROCKETS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS rockets (
    "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    "name" TEXT,
    "no_of_stages" INTEGER,
    "no_of_boosters" INTEGER DEFAULT 0,
    "producer" INTEGER NOT NULL,
    "tons_to_leo" REAL,
    FOREIGN KEY(producer) REFERENCES companies(id)
)
"#;

/// SQL statement to create the launches table.
pub const CREATE_LAUNCHES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS launches (
    "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    "mission_name" TEXT,
    "launch_date" INTEGER,
    "vehicle" INTEGER,
    "tons_launched" REAL,
    "outcome" TEXT,
    FOREIGN KEY(vehicle) REFERENCES rockets(id)
)
"#;

/// Table names paired with their creation statements, in dependency order.
pub const TABLES: &[(&str, &str)] = &[
    ("companies", CREATE_COMPANIES_TABLE),
    ("rockets", CREATE_ROCKETS_TABLE),
    ("launches", CREATE_LAUNCHES_TABLE),
];
