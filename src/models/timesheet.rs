use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Timesheet {
    pub id: i64,
    pub employee_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub summary: Option<String>,
}

/// Validated record for both insert and full-record update; the two paths
/// carry the same field set.
#[derive(Debug, Clone)]
pub struct TimesheetRecord {
    pub employee_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub summary: Option<String>,
}

/// Timesheet joined with the owning employee's name, as every read path
/// presents timesheets next to who worked them.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct TimesheetWithEmployee {
    pub id: i64,
    pub employee_id: i64,
    pub full_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub summary: Option<String>,
}
