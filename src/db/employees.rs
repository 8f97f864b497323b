use sqlx::sqlite::SqlitePool;

use crate::models::employee::{Employee, EmployeeListRow, EmployeeUpdate, NewEmployee};
use crate::query::{
    self, SortOrder, EMPLOYEE_DEFAULT_SORT, EMPLOYEE_SORT_COLUMNS, PAGE_SIZE,
};

/// Filtered, sorted, paginated page of the employee list plus the unpaginated
/// match count. The sort column is resolved against the allow-list before it
/// is interpolated; search and pagination values are bound.
pub async fn list(
    pool: &SqlitePool,
    search: &str,
    sort: Option<&str>,
    order: &str,
    page: i64,
) -> Result<(Vec<EmployeeListRow>, i64), sqlx::Error> {
    let column = query::sort_column(sort, EMPLOYEE_SORT_COLUMNS, EMPLOYEE_DEFAULT_SORT);
    let direction = SortOrder::parse(order).as_sql();
    let pattern = query::like_pattern(search);

    let sql = format!(
        "SELECT id, full_name, email, job_title, department, salary
         FROM employees
         WHERE full_name LIKE ?
         ORDER BY {} {}
         LIMIT ? OFFSET ?",
        column, direction
    );
    let rows = sqlx::query_as::<_, EmployeeListRow>(&sql)
        .bind(&pattern)
        .bind(PAGE_SIZE)
        .bind(query::page_offset(page))
        .fetch_all(pool)
        .await?;

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE full_name LIKE ?")
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    Ok((rows, total))
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, employee: &NewEmployee) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO employees
            (full_name, email, phone, date_of_birth, job_title, department,
             salary, start_date, end_date, photo_path, document_path)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&employee.full_name)
    .bind(&employee.email)
    .bind(&employee.phone)
    .bind(employee.date_of_birth)
    .bind(&employee.job_title)
    .bind(&employee.department)
    .bind(employee.salary)
    .bind(employee.start_date)
    .bind(employee.end_date)
    .bind(&employee.photo_path)
    .bind(&employee.document_path)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Rewrites all mutable columns in a single statement keyed by id.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    update: &EmployeeUpdate,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE employees
         SET full_name = ?, email = ?, phone = ?, job_title = ?, department = ?,
             salary = ?, start_date = ?, end_date = ?
         WHERE id = ?",
    )
    .bind(&update.full_name)
    .bind(&update.email)
    .bind(&update.phone)
    .bind(&update.job_title)
    .bind(&update.department)
    .bind(update.salary)
    .bind(update.start_date)
    .bind(update.end_date)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
