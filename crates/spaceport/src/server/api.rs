//! JSON API handlers.
//!
//! List and get handlers answer `200`, create handlers answer `201` with the
//! assigned id. Create bodies are form-encoded and coerced through the
//! `TryFrom` impls in [`crate::record`].

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};

use super::{message, AppState};
use crate::error::{Entity, Error, Result};
use crate::record::{
    Company, CompanyForm, Launch, LaunchForm, NewCompany, NewLaunch, NewRocket, Rocket, RocketForm,
};
use crate::storage::Storage;

/// Body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Created {
    /// Human-readable confirmation.
    pub message: String,
    /// Id assigned to the new record.
    pub id: i64,
}

/// Body of `GET /api/rockets`.
#[derive(Debug, Clone, Serialize)]
pub struct RocketList {
    /// Every stored rocket.
    pub rockets: Vec<Rocket>,
}

fn created(entity: &str, id: i64) -> (StatusCode, Json<Created>) {
    (
        StatusCode::CREATED,
        Json(Created {
            message: format!("{entity} record created successfully"),
            id,
        }),
    )
}

type PathId = std::result::Result<Path<String>, PathRejection>;
type FormBody<T> = std::result::Result<Form<T>, FormRejection>;

/// Parse an `{id}` path segment. Anything but plain digits names no record.
fn record_id(entity: Entity, path: PathId) -> Result<i64> {
    let Path(raw) = path?;
    match raw.parse::<i64>() {
        Ok(id) if raw.bytes().all(|b| b.is_ascii_digit()) => Ok(id),
        _ => Err(Error::MalformedId { entity, raw }),
    }
}

/// `GET /api/`
pub async fn liveness_get() -> Response {
    message(StatusCode::OK, "get method called")
}

/// `POST /api/`
pub async fn liveness_post() -> Response {
    message(StatusCode::CREATED, "post method called")
}

/// `GET /api/rockets`
pub async fn list_rockets(State(state): State<AppState>) -> Result<Json<RocketList>> {
    let rockets = state.with_storage(Storage::list_rockets).await?;
    debug!("Listing {} rockets", rockets.len());
    Ok(Json(RocketList { rockets }))
}

/// `GET /api/companies`
pub async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<Company>>> {
    let companies = state.with_storage(Storage::list_companies).await?;
    debug!("Listing {} companies", companies.len());
    Ok(Json(companies))
}

/// `GET /api/launches`
pub async fn list_launches(State(state): State<AppState>) -> Result<Json<Vec<Launch>>> {
    let launches = state.with_storage(Storage::list_launches).await?;
    debug!("Listing {} launches", launches.len());
    Ok(Json(launches))
}

/// `GET /api/rockets/{id}`
pub async fn get_rocket(State(state): State<AppState>, path: PathId) -> Result<Json<Rocket>> {
    let id = record_id(Entity::Rocket, path)?;
    state
        .with_storage(move |storage| storage.get_rocket(id))
        .await?
        .map(Json)
        .ok_or(Error::not_found(Entity::Rocket, id))
}

/// `GET /api/companies/{id}`
pub async fn get_company(State(state): State<AppState>, path: PathId) -> Result<Json<Company>> {
    let id = record_id(Entity::Company, path)?;
    state
        .with_storage(move |storage| storage.get_company(id))
        .await?
        .map(Json)
        .ok_or(Error::not_found(Entity::Company, id))
}

/// `GET /api/launches/{id}`
pub async fn get_launch(State(state): State<AppState>, path: PathId) -> Result<Json<Launch>> {
    let id = record_id(Entity::Launch, path)?;
    state
        .with_storage(move |storage| storage.get_launch(id))
        .await?
        .map(Json)
        .ok_or(Error::not_found(Entity::Launch, id))
}

/// `POST /api/rockets`
pub async fn create_rocket(
    State(state): State<AppState>,
    form: FormBody<RocketForm>,
) -> Result<(StatusCode, Json<Created>)> {
    let Form(form) = form?;
    let rocket = NewRocket::try_from(form)?;
    let name = rocket.name.clone();
    let id = state
        .with_storage(move |storage| storage.create_rocket(&rocket))
        .await?;
    info!("Created rocket {} with id {}", name, id);
    Ok(created("Rocket", id))
}

/// `POST /api/companies`
pub async fn create_company(
    State(state): State<AppState>,
    form: FormBody<CompanyForm>,
) -> Result<(StatusCode, Json<Created>)> {
    let Form(form) = form?;
    let company = NewCompany::try_from(form)?;
    let name = company.name.clone();
    let id = state
        .with_storage(move |storage| storage.create_company(&company))
        .await?;
    info!("Created company {} with id {}", name, id);
    Ok(created("Company", id))
}

/// `POST /api/launches`
pub async fn create_launch(
    State(state): State<AppState>,
    form: FormBody<LaunchForm>,
) -> Result<(StatusCode, Json<Created>)> {
    let Form(form) = form?;
    let launch = NewLaunch::try_from(form)?;
    let name = launch.mission_name.clone();
    let id = state
        .with_storage(move |storage| storage.create_launch(&launch))
        .await?;
    info!("Created launch {} with id {}", name, id);
    Ok(created("Launch", id))
}
