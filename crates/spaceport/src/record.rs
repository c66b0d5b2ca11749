//! Record types for companies, rockets and launches.
//!
//! Each entity has a stored form (`Company`, `Rocket`, `Launch`) carrying the
//! store-assigned id, an insert payload (`NewCompany`, ...) and a raw form body
//! (`CompanyForm`, ...) that is coerced into the payload before it reaches
//! storage.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::timecodec;

/// A launch provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Store-assigned identity.
    pub id: i64,
    /// Company name.
    pub name: String,
    /// Name of the CEO or administrator.
    pub ceo_admin_name: String,
    /// Year the company was founded.
    pub year_founded: i64,
    /// Country of origin.
    pub country_origin: String,
}

/// A launch vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    /// Store-assigned identity.
    pub id: i64,
    /// Vehicle name.
    pub name: String,
    /// Payload capacity to low earth orbit, in tons.
    pub tons_to_leo: f64,
    /// Number of stages.
    pub no_of_stages: i64,
    /// Number of strap-on boosters.
    pub no_of_boosters: i64,
    /// Id of the producing company.
    #[serde(rename = "producer_id")]
    pub producer: i64,
}

/// A single launch of a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    /// Store-assigned identity.
    pub id: i64,
    /// Mission name.
    pub mission_name: String,
    /// Launch time in epoch seconds.
    pub launch_date_timestamp: i64,
    /// Launch time rendered for display.
    pub launch_date: String,
    /// Id of the rocket that flew.
    pub vehicle: i64,
    /// Payload mass launched, in tons.
    pub tons_launched: f64,
    /// Free-text outcome ("Success", "Partial failure", ...).
    pub outcome: String,
}

/// Fields needed to insert a company.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct NewCompany {
    pub name: String,
    pub ceo_admin_name: String,
    pub year_founded: i64,
    pub country_origin: String,
}

/// Fields needed to insert a rocket.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewRocket {
    pub name: String,
    pub tons_to_leo: f64,
    pub no_of_stages: i64,
    pub no_of_boosters: i64,
    pub producer: i64,
}

/// Fields needed to insert a launch.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct NewLaunch {
    pub mission_name: String,
    pub launch_date_timestamp: i64,
    pub vehicle: i64,
    pub tons_launched: f64,
    pub outcome: String,
}

/// Raw company form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct CompanyForm {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "ceo_name")]
    pub ceo_admin_name: String,
    pub year_founded: Option<String>,
    #[serde(default)]
    pub country_origin: String,
}

/// Raw rocket form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct RocketForm {
    #[serde(default)]
    pub name: String,
    pub tons_to_leo: Option<String>,
    pub no_of_stages: Option<String>,
    pub no_of_boosters: Option<String>,
    pub producer: Option<String>,
}

/// Raw launch form body.
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(missing_docs)]
pub struct LaunchForm {
    #[serde(default)]
    pub mission_name: String,
    pub launch_date: Option<String>,
    pub vehicle: Option<String>,
    pub tons_launched: Option<String>,
    #[serde(default)]
    pub outcome: String,
}

impl TryFrom<CompanyForm> for NewCompany {
    type Error = Error;

    fn try_from(form: CompanyForm) -> Result<Self> {
        Ok(Self {
            year_founded: required("year_founded", form.year_founded.as_deref())?,
            name: form.name,
            ceo_admin_name: form.ceo_admin_name,
            country_origin: form.country_origin,
        })
    }
}

impl TryFrom<RocketForm> for NewRocket {
    type Error = Error;

    fn try_from(form: RocketForm) -> Result<Self> {
        Ok(Self {
            tons_to_leo: required_finite("tons_to_leo", form.tons_to_leo.as_deref())?,
            no_of_stages: required("no_of_stages", form.no_of_stages.as_deref())?,
            no_of_boosters: optional("no_of_boosters", form.no_of_boosters.as_deref())?
                .unwrap_or(0),
            producer: required("producer", form.producer.as_deref())?,
            name: form.name,
        })
    }
}

impl TryFrom<LaunchForm> for NewLaunch {
    type Error = Error;

    fn try_from(form: LaunchForm) -> Result<Self> {
        let launch_date = form
            .launch_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::invalid_field("launch_date", "missing value"))?;

        Ok(Self {
            launch_date_timestamp: timecodec::parse_time_from_str(launch_date)?,
            vehicle: required("vehicle", form.vehicle.as_deref())?,
            tons_launched: required_finite("tons_launched", form.tons_launched.as_deref())?,
            mission_name: form.mission_name,
            outcome: form.outcome,
        })
    }
}

/// Coerce an optional form value; blank counts as absent.
fn optional<T>(field: &'static str, value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| Error::invalid_field(field, format!("'{raw}': {e}"))),
    }
}

fn required<T>(field: &'static str, value: Option<&str>) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(field, value)?.ok_or_else(|| Error::invalid_field(field, "missing value"))
}

/// Like `required`, but rejects `NaN` and infinities.
fn required_finite(field: &'static str, value: Option<&str>) -> Result<f64> {
    let number: f64 = required(field, value)?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(Error::invalid_field(field, "must be a finite number"))
    }
}
