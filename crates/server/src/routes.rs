//! Request handlers.
//!
//! Session operations take the user's session lock and may rank a whole
//! pool, so they run on the blocking pool.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use catalog::{Cuisine, CuisineFilter, DishDetail};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use session::{SessionStep, SwipeBatch};
use tokio::task::spawn_blocking;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

/// The cuisine a session is started for, by name or as a full record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CuisineSelector {
    Name(String),
    Record(Cuisine),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    pub cuisine: Option<CuisineSelector>,
}

impl StartSessionRequest {
    pub fn filter(&self) -> CuisineFilter {
        let name = self.cuisine.as_ref().map(|selector| match selector {
            CuisineSelector::Name(name) => name.as_str(),
            CuisineSelector::Record(cuisine) => cuisine.name.as_str(),
        });
        CuisineFilter::parse(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Batch,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinueSessionResponse {
    pub status: StepStatus,
    pub dishes: Vec<DishDetail>,
}

impl From<SessionStep> for ContinueSessionResponse {
    fn from(step: SessionStep) -> Self {
        let status = if step.is_complete() {
            StepStatus::Complete
        } else {
            StepStatus::Batch
        };
        Self {
            status,
            dishes: step.into_dishes(),
        }
    }
}

/// An empty body reads as the default request
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

pub async fn health_handler() -> &'static str {
    "ok"
}

pub async fn cuisines_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<Cuisine>>, ApiError> {
    Ok(Json(state.catalog.cuisines()?))
}

pub async fn start_session_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    body: Bytes,
) -> Result<Json<Vec<DishDetail>>, ApiError> {
    let request: StartSessionRequest = parse_body(&body)?;
    let filter = request.filter();

    let sessions = state.sessions.clone();
    let dishes = spawn_blocking(move || sessions.start_session(&user, &filter)).await??;
    Ok(Json(dishes))
}

pub async fn continue_session_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    body: Bytes,
) -> Result<Json<ContinueSessionResponse>, ApiError> {
    let batch: SwipeBatch = parse_body(&body)?;

    let sessions = state.sessions.clone();
    let step = spawn_blocking(move || sessions.continue_session(&user, batch)).await??;
    Ok(Json(step.into()))
}

pub async fn session_results_handler(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<DishDetail>>, ApiError> {
    let sessions = state.sessions.clone();
    let dishes = spawn_blocking(move || sessions.session_results(&user)).await??;
    Ok(Json(dishes))
}
