use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::db;
use crate::errors::AppError;
use crate::models::timesheet::TimesheetRecord;
use crate::utils::validation;

#[derive(Deserialize)]
pub struct TimesheetListParams {
    search: Option<String>,
    sort: Option<String>,
    order: Option<String>,
}

/// Shared payload for create and update; both paths write the full record.
#[derive(Deserialize)]
pub struct TimesheetForm {
    employee_id: i64,
    start_time: String,
    end_time: String,
    summary: Option<String>,
}

impl TimesheetForm {
    /// Applies the time-ordering rule and produces a typed record.
    fn into_record(self) -> Result<TimesheetRecord, &'static str> {
        let (start_time, end_time) =
            validation::check_time_order(&self.start_time, &self.end_time)?;
        Ok(TimesheetRecord {
            employee_id: self.employee_id,
            start_time,
            end_time,
            summary: self.summary.filter(|s| !s.trim().is_empty()),
        })
    }
}

pub async fn list_timesheets(
    params: web::Query<TimesheetListParams>,
) -> Result<HttpResponse, AppError> {
    let pool = db::pool().await?;
    let timesheets = db::timesheets::list(
        pool,
        params.search.as_deref().unwrap_or(""),
        params.sort.as_deref(),
        params.order.as_deref().unwrap_or("asc"),
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "timesheets": timesheets })))
}

pub async fn get_timesheet(id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let pool = db::pool().await?;
    let timesheet = db::timesheets::find(pool, id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Timesheet not found".to_string()))?;

    Ok(HttpResponse::Ok().json(timesheet))
}

pub async fn create_timesheet(
    form: web::Form<TimesheetForm>,
) -> Result<HttpResponse, AppError> {
    let record = form
        .into_inner()
        .into_record()
        .map_err(|msg| AppError::Validation(msg.to_string()))?;

    let pool = db::pool().await?;
    db::timesheets::insert(pool, &record).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/timesheets"))
        .finish())
}

/// Full-record update; rule violations come back as a structured result for
/// in-place redisplay.
pub async fn update_timesheet(
    id: web::Path<i64>,
    form: web::Form<TimesheetForm>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let pool = db::pool().await?;

    if db::timesheets::find(pool, id).await?.is_none() {
        return Err(AppError::NotFound("Timesheet not found".to_string()));
    }

    let record = match form.into_inner().into_record() {
        Ok(record) => record,
        Err(msg) => return Ok(HttpResponse::Ok().json(json!({ "error": msg }))),
    };
    db::timesheets::update(pool, id, &record).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": "Timesheet updated successfully!" })))
}
