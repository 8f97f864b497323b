use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub job_title: String,
    pub department: String,
    pub salary: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub photo_path: Option<String>,
    pub document_path: Option<String>,
}

/// Validated creation record, ready for insert. Attachment paths are filled
/// in by file intake before the row is written.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub job_title: String,
    pub department: String,
    pub salary: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub photo_path: Option<String>,
    pub document_path: Option<String>,
}

/// Full-record update: every mutable column is rewritten in one statement.
/// date_of_birth and the attachment paths are set at creation and never
/// touched again.
#[derive(Debug, Clone)]
pub struct EmployeeUpdate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub department: String,
    pub salary: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Projection returned by the list endpoint; detail pages fetch the full record.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct EmployeeListRow {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub job_title: String,
    pub department: String,
    pub salary: f64,
}
