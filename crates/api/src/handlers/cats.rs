//! Handlers for the example `cats` resource.
//!
//! Everything here is mapping between HTTP and the generic CRUD service:
//! extract, call, translate `None` into 404.  A new resource gets a copy of
//! this module with the entity types swapped.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use db::schemas::{Cat, CatCreate};
use db::CatService;

use crate::{ApiError, AppState};

const CATS: CatService = CatService::new();

#[derive(Debug, serde::Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CatCreate>,
) -> Result<(StatusCode, Json<Cat>), ApiError> {
    let cat = CATS.create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(cat)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Cat>>, ApiError> {
    if params.limit.is_some_and(|l| l < 0) || params.offset.is_some_and(|o| o < 0) {
        return Err(ApiError::InvalidPagination);
    }
    let cats = match (params.limit, params.offset) {
        (None, None) => CATS.get_all(&state.pool).await?,
        // A bare offset still pages; i64::MAX plays the "no limit" role.
        (limit, offset) => {
            CATS.get_page(&state.pool, limit.unwrap_or(i64::MAX), offset.unwrap_or(0))
                .await?
        }
    };
    Ok(Json(cats))
}

pub async fn get(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Cat>, ApiError> {
    let cat = CATS
        .get_by_id(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(cat))
}

pub async fn update(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CatCreate>,
) -> Result<Json<Cat>, ApiError> {
    let cat = CATS
        .update(&state.pool, id, payload)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(cat))
}

pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    CATS.delete(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(StatusCode::NO_CONTENT)
}
