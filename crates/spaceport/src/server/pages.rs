//! Server-rendered HTML listing pages.
//!
//! Each page lists one table and carries a form that posts to the matching
//! `/api` create endpoint. Templates are compiled into the binary; a
//! directory configured as `server.templates_dir` can replace any of them by
//! file name.

use std::collections::HashMap;
use std::path::Path;

use axum::extract::State;
use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::{debug, info};

use super::AppState;
use crate::error::Result;
use crate::record::{Launch, Rocket};
use crate::storage::Storage;

/// Built-in templates, by name.
pub const TEMPLATES: &[(&str, &str)] = &[
    (
        "list_companies.html",
        include_str!("../../templates/list_companies.html"),
    ),
    (
        "list_rockets.html",
        include_str!("../../templates/list_rockets.html"),
    ),
    (
        "list_launches.html",
        include_str!("../../templates/list_launches.html"),
    ),
];

/// Load the page templates, letting files in `dir` replace built-in ones.
///
/// # Errors
///
/// Returns an error if a template fails to parse.
pub fn load_templates(dir: Option<&Path>) -> Result<Tera> {
    let mut tera = match dir {
        Some(dir) => {
            let pattern = dir.join("*.html");
            info!("Loading templates from {}", pattern.display());
            Tera::new(&pattern.to_string_lossy())?
        }
        None => Tera::default(),
    };

    let mut builtin = Tera::default();
    builtin.add_raw_templates(TEMPLATES.iter().copied())?;
    // extend() keeps templates that are already present
    tera.extend(&builtin)?;

    Ok(tera)
}

/// A rocket row with its producer's name resolved.
#[derive(Debug, Serialize)]
struct RocketRow<'a> {
    #[serde(flatten)]
    rocket: &'a Rocket,
    producer_name: &'a str,
}

/// A launch row with its vehicle's name resolved.
#[derive(Debug, Serialize)]
struct LaunchRow<'a> {
    #[serde(flatten)]
    launch: &'a Launch,
    vehicle_name: &'a str,
}

fn render(state: &AppState, name: &str, context: &Context) -> Result<Html<String>> {
    let body = state.templates().render(name, context)?;
    debug!("Rendered {} ({} bytes)", name, body.len());
    Ok(Html(body))
}

/// `GET /companies`
pub async fn companies(State(state): State<AppState>) -> Result<Html<String>> {
    let companies = state.with_storage(Storage::list_companies).await?;

    let mut context = Context::new();
    context.insert("companies", &companies);
    render(&state, "list_companies.html", &context)
}

/// `GET /rockets`
pub async fn rockets(State(state): State<AppState>) -> Result<Html<String>> {
    let (rockets, companies) = state
        .with_storage(|storage| Ok((storage.list_rockets()?, storage.list_companies()?)))
        .await?;

    let names: HashMap<i64, &str> = companies.iter().map(|c| (c.id, c.name.as_str())).collect();
    let rows: Vec<RocketRow<'_>> = rockets
        .iter()
        .map(|rocket| RocketRow {
            rocket,
            producer_name: names.get(&rocket.producer).copied().unwrap_or_default(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("rockets", &rows);
    context.insert("companies", &companies);
    render(&state, "list_rockets.html", &context)
}

/// `GET /launches`
pub async fn launches(State(state): State<AppState>) -> Result<Html<String>> {
    let (launches, rockets) = state
        .with_storage(|storage| Ok((storage.list_launches()?, storage.list_rockets()?)))
        .await?;

    let names: HashMap<i64, &str> = rockets.iter().map(|r| (r.id, r.name.as_str())).collect();
    let rows: Vec<LaunchRow<'_>> = launches
        .iter()
        .map(|launch| LaunchRow {
            launch,
            vehicle_name: names.get(&launch.vehicle).copied().unwrap_or_default(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("launches", &rows);
    context.insert("rockets", &rockets);
    render(&state, "list_launches.html", &context)
}
