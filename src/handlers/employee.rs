use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt as _;
use log::error;
use serde::Deserialize;
use serde_json::json;
use sqlx::sqlite::SqlitePool;
use std::collections::HashMap;
use std::path::Path;
use validator::Validate;

use crate::db;
use crate::errors::AppError;
use crate::models::employee::{EmployeeUpdate, NewEmployee};
use crate::query;
use crate::utils::upload::{self, AttachmentKind};
use crate::utils::validation::{
    self, first_message, validate_date_of_birth, validate_salary,
};

#[derive(Deserialize)]
pub struct EmployeeListParams {
    search: Option<String>,
    sort: Option<String>,
    order: Option<String>,
    page: Option<i64>,
}

/// Creation payload assembled from the multipart form. Field-level rules run
/// through `validator`; required-field presence is checked during assembly.
#[derive(Debug, Validate)]
struct NewEmployeeForm {
    full_name: String,
    email: String,
    phone: String,
    #[validate(custom = "validate_date_of_birth")]
    date_of_birth: String,
    job_title: String,
    department: String,
    #[validate(custom = "validate_salary")]
    salary: String,
    start_date: String,
    end_date: String,
}

#[derive(Deserialize)]
pub struct EmployeeUpdateForm {
    full_name: String,
    email: String,
    phone: String,
    job_title: String,
    department: String,
    salary: String,
    start_date: String,
    end_date: Option<String>,
}

pub async fn list_employees(
    params: web::Query<EmployeeListParams>,
) -> Result<HttpResponse, AppError> {
    let pool = db::pool().await?;
    let search = params.search.as_deref().unwrap_or("");
    let page = params.page.unwrap_or(1).max(1);

    let (employees, total) = db::employees::list(
        pool,
        search,
        params.sort.as_deref(),
        params.order.as_deref().unwrap_or("asc"),
        page,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "employees": employees,
        "total": total,
        "total_pages": query::page_count(total),
        "page": page,
    })))
}

pub async fn get_employee(id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let pool = db::pool().await?;
    let employee = db::employees::find(pool, id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(employee))
}

/// One uploaded file part: original filename plus body.
pub type FilePart = Option<(String, Vec<u8>)>;

struct EmployeeFormData {
    fields: HashMap<String, String>,
    photo: FilePart,
    document: FilePart,
}

async fn read_multipart_form(mut payload: Multipart) -> Result<EmployeeFormData, AppError> {
    let mut form = EmployeeFormData {
        fields: HashMap::new(),
        photo: None,
        document: None,
    };

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| AppError::Validation(format!("Malformed form data: {}", err)))?
    {
        let name = field.name().to_string();
        let filename = field
            .content_disposition()
            .get_filename()
            .map(|f| f.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|err| AppError::Validation(format!("Malformed form data: {}", err)))?
        {
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "photo" => form.photo = filename.map(|f| (f, std::mem::take(&mut data))),
            "document" => form.document = filename.map(|f| (f, std::mem::take(&mut data))),
            _ => {
                form.fields
                    .insert(name, String::from_utf8_lossy(&data).trim().to_string());
            }
        }
    }

    Ok(form)
}

fn required_field(fields: &HashMap<String, String>, key: &str) -> Result<String, AppError> {
    match fields.get(key) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(AppError::Validation(format!("{} is required", key))),
    }
}

pub async fn create_employee(payload: Multipart) -> Result<HttpResponse, AppError> {
    let data = read_multipart_form(payload).await?;

    let form = NewEmployeeForm {
        full_name: required_field(&data.fields, "full_name")?,
        email: required_field(&data.fields, "email")?,
        phone: required_field(&data.fields, "phone")?,
        date_of_birth: required_field(&data.fields, "date_of_birth")?,
        job_title: required_field(&data.fields, "job_title")?,
        department: required_field(&data.fields, "department")?,
        salary: required_field(&data.fields, "salary")?,
        start_date: required_field(&data.fields, "start_date")?,
        end_date: data.fields.get("end_date").cloned().unwrap_or_default(),
    };
    form.validate()
        .map_err(|errs| AppError::Validation(first_message(&errs)))?;

    // The custom hooks have already proven these parseable.
    let date_of_birth = validation::parse_date(&form.date_of_birth)
        .ok_or_else(|| AppError::Validation(validation::AGE_MESSAGE.to_string()))?;
    let salary: f64 = form
        .salary
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(validation::SALARY_MESSAGE.to_string()))?;
    let start_date = validation::parse_date(&form.start_date)
        .ok_or_else(|| AppError::Validation("Start date must be a valid date".to_string()))?;
    let end_date = if form.end_date.is_empty() {
        None
    } else {
        Some(
            validation::parse_date(&form.end_date)
                .ok_or_else(|| AppError::Validation("End date must be a valid date".to_string()))?,
        )
    };

    let employee = NewEmployee {
        full_name: form.full_name,
        email: form.email,
        phone: form.phone,
        date_of_birth,
        job_title: form.job_title,
        department: form.department,
        salary,
        start_date,
        end_date,
        photo_path: None,
        document_path: None,
    };

    let pool = db::pool().await?;
    store_attachments_and_insert(pool, &upload::public_root(), employee, data.photo, data.document)
        .await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/employees"))
        .finish())
}

/// Writes any attachments under `root`, then inserts the row. File writes
/// happen before the insert; if the document write or the insert fails,
/// already-written files are removed so no partial record and no orphaned
/// file is left behind.
pub async fn store_attachments_and_insert(
    pool: &SqlitePool,
    root: &Path,
    mut employee: NewEmployee,
    photo: FilePart,
    document: FilePart,
) -> Result<i64, AppError> {
    employee.photo_path = match &photo {
        Some((name, bytes)) => upload::store(root, AttachmentKind::Photo, name, bytes)
            .await
            .map_err(|err| AppError::Storage(format!("failed to store photo: {}", err)))?,
        None => None,
    };
    employee.document_path = match &document {
        Some((name, bytes)) => {
            match upload::store(root, AttachmentKind::Document, name, bytes).await {
                Ok(path) => path,
                Err(err) => {
                    if let Some(path) = &employee.photo_path {
                        upload::remove(root, path).await;
                    }
                    return Err(AppError::Storage(format!("failed to store document: {}", err)));
                }
            }
        }
        None => None,
    };

    match db::employees::insert(pool, &employee).await {
        Ok(id) => Ok(id),
        Err(err) => {
            error!("employee insert failed: {}", err);
            for path in [&employee.photo_path, &employee.document_path]
                .into_iter()
                .flatten()
            {
                upload::remove(root, path).await;
            }
            Err(AppError::Storage(err.to_string()))
        }
    }
}

/// Full-record update. Rule violations come back as a structured result so
/// the client redisplays the form in place instead of losing unsaved edits.
pub async fn update_employee(
    id: web::Path<i64>,
    form: web::Form<EmployeeUpdateForm>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let pool = db::pool().await?;

    if db::employees::find(pool, id).await?.is_none() {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }

    let salary = match validation::check_employee_update(
        &form.full_name,
        &form.email,
        &form.phone,
        &form.salary,
    ) {
        Ok(salary) => salary,
        Err(msg) => return Ok(HttpResponse::Ok().json(json!({ "error": msg }))),
    };
    let start_date = match validation::parse_date(&form.start_date) {
        Some(date) => date,
        None => {
            return Ok(HttpResponse::Ok().json(json!({ "error": validation::UPDATE_MESSAGE })))
        }
    };
    let end_date = match form.end_date.as_deref().filter(|raw| !raw.trim().is_empty()) {
        Some(raw) => match validation::parse_date(raw) {
            Some(date) => Some(date),
            None => {
                return Ok(HttpResponse::Ok().json(json!({ "error": validation::UPDATE_MESSAGE })))
            }
        },
        None => None,
    };

    let update = EmployeeUpdate {
        full_name: form.full_name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        job_title: form.job_title.clone(),
        department: form.department.clone(),
        salary,
        start_date,
        end_date,
    };
    db::employees::update(pool, id, &update).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": "Employee updated successfully!" })))
}
