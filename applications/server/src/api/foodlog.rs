/// Food log API routes
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use calorie_core::{
    parse_date_key, CalorieError, DailyLog, MealEntry, MealEntryPatch, NewMealEntry, User,
    UserStore,
};
use serde::Deserialize;

use super::users::owned_user;

#[derive(Debug, Deserialize)]
pub struct LogFilter {
    pub meal: Option<String>,
    pub item: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddMealRequest {
    pub meal: String,
    pub item: String,
    pub calories: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMealRequest {
    pub meal: Option<String>,
    pub item: Option<String>,
    pub calories: Option<f64>,
}

/// GET /users/:username/foodlog
pub async fn get_food_log(
    Path(username): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<DailyLog>>> {
    let user = owned_user(&app_state, &auth, &username).await?;
    Ok(Json(user.food_log))
}

/// GET /users/:username/foodlog/:date
///
/// Optional `meal` and `item` query filters restrict the returned
/// entries; both filters compose as an intersection.
pub async fn get_daily_log(
    Path((username, date)): Path<(String, String)>,
    Query(filter): Query<LogFilter>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<MealEntry>>> {
    let user = owned_user(&app_state, &auth, &username).await?;
    let key = parse_date_key(&date)?;

    let log = user.daily_log(key).ok_or(CalorieError::LogNotFound(key))?;

    Ok(Json(log.entries_matching(
        filter.meal.as_deref(),
        filter.item.as_deref(),
    )))
}

/// POST /users/:username/foodlog/:date
pub async fn add_meal(
    Path((username, date)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<AddMealRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let mut user = owned_user(&app_state, &auth, &username).await?;
    let key = parse_date_key(&date)?;

    user.add_meal(
        key,
        NewMealEntry {
            meal: req.meal,
            item: req.item,
            calories: req.calories,
        },
    );
    app_state.db.save_food_log(&user).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/:username/foodlog/:date/:id
pub async fn update_meal(
    Path((username, date, id)): Path<(String, String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateMealRequest>,
) -> Result<Json<User>> {
    let mut user = owned_user(&app_state, &auth, &username).await?;
    let key = parse_date_key(&date)?;

    user.update_meal(
        key,
        &id,
        MealEntryPatch {
            meal: req.meal,
            item: req.item,
            calories: req.calories,
        },
    )?;
    app_state.db.save_food_log(&user).await?;

    Ok(Json(user))
}

/// DELETE /users/:username/foodlog/:date/:id
pub async fn delete_meal(
    Path((username, date, id)): Path<(String, String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<User>> {
    let mut user = owned_user(&app_state, &auth, &username).await?;
    let key = parse_date_key(&date)?;

    user.remove_meal(key, &id)?;
    app_state.db.save_food_log(&user).await?;

    Ok(Json(user))
}
