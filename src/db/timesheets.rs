use sqlx::sqlite::SqlitePool;

use crate::models::timesheet::{TimesheetRecord, TimesheetWithEmployee};
use crate::query::{self, SortOrder, TIMESHEET_DEFAULT_SORT, TIMESHEET_SORT_COLUMNS};

const JOINED_COLUMNS: &str = "timesheets.id, timesheets.employee_id, employees.full_name,
     timesheets.start_time, timesheets.end_time, timesheets.summary";

/// Full filtered, sorted result set; the timesheet list is not paginated.
/// Search matches the joined employee's name.
pub async fn list(
    pool: &SqlitePool,
    search: &str,
    sort: Option<&str>,
    order: &str,
) -> Result<Vec<TimesheetWithEmployee>, sqlx::Error> {
    let column = query::sort_column(sort, TIMESHEET_SORT_COLUMNS, TIMESHEET_DEFAULT_SORT);
    let direction = SortOrder::parse(order).as_sql();

    let sql = format!(
        "SELECT {}
         FROM timesheets
         JOIN employees ON timesheets.employee_id = employees.id
         WHERE employees.full_name LIKE ?
         ORDER BY {} {}",
        JOINED_COLUMNS, column, direction
    );
    sqlx::query_as::<_, TimesheetWithEmployee>(&sql)
        .bind(query::like_pattern(search))
        .fetch_all(pool)
        .await
}

pub async fn find(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<TimesheetWithEmployee>, sqlx::Error> {
    let sql = format!(
        "SELECT {}
         FROM timesheets
         JOIN employees ON timesheets.employee_id = employees.id
         WHERE timesheets.id = ?",
        JOINED_COLUMNS
    );
    sqlx::query_as::<_, TimesheetWithEmployee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, record: &TimesheetRecord) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO timesheets (employee_id, start_time, end_time, summary)
         VALUES (?, ?, ?, ?)",
    )
    .bind(record.employee_id)
    .bind(record.start_time)
    .bind(record.end_time)
    .bind(&record.summary)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    record: &TimesheetRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE timesheets
         SET employee_id = ?, start_time = ?, end_time = ?, summary = ?
         WHERE id = ?",
    )
    .bind(record.employee_id)
    .bind(record.start_time)
    .bind(record.end_time)
    .bind(&record.summary)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
