use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;

use staffsheet::db;
use staffsheet::handlers::employee::store_attachments_and_insert;
use staffsheet::models::employee::{EmployeeUpdate, NewEmployee};
use staffsheet::query;

async fn test_pool() -> SqlitePool {
    db::connect("sqlite::memory:").await.unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_employee(full_name: &str, salary: f64) -> NewEmployee {
    NewEmployee {
        full_name: full_name.to_string(),
        email: format!("{}@example.com", full_name.to_lowercase().replace(' ', ".")),
        phone: "555-0101".to_string(),
        date_of_birth: date(1990, 6, 15),
        job_title: "Engineer".to_string(),
        department: "R&D".to_string(),
        salary,
        start_date: date(2020, 1, 6),
        end_date: None,
        photo_path: None,
        document_path: None,
    }
}

#[tokio::test]
async fn insert_and_read_back_round_trips_attachment_paths() {
    let pool = test_pool().await;

    let mut with_files = sample_employee("Jane Doe", 4500.0);
    with_files.photo_path = Some("uploads/photos/1735689600123_portrait.jpg".to_string());
    with_files.document_path = Some("uploads/documents/1735689600123_cv.pdf".to_string());
    let id = db::employees::insert(&pool, &with_files).await.unwrap();

    let stored = db::employees::find(&pool, id).await.unwrap().unwrap();
    assert_eq!(
        stored.photo_path.as_deref(),
        Some("uploads/photos/1735689600123_portrait.jpg")
    );
    assert_eq!(
        stored.document_path.as_deref(),
        Some("uploads/documents/1735689600123_cv.pdf")
    );
    assert_eq!(stored.full_name, "Jane Doe");
    assert_eq!(stored.salary, 4500.0);
    assert_eq!(stored.date_of_birth, date(1990, 6, 15));

    // Omitting both attachments leaves the columns unset.
    let without_files = sample_employee("John Roe", 3200.0);
    let id = db::employees::insert(&pool, &without_files).await.unwrap();
    let stored = db::employees::find(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.photo_path, None);
    assert_eq!(stored.document_path, None);
}

#[tokio::test]
async fn find_missing_employee_returns_none() {
    let pool = test_pool().await;
    assert!(db::employees::find(&pool, 9999).await.unwrap().is_none());
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let pool = test_pool().await;
    for name in ["Jane Doe", "ajanet", "Bob Smith"] {
        db::employees::insert(&pool, &sample_employee(name, 3500.0))
            .await
            .unwrap();
    }

    let (rows, total) = db::employees::list(&pool, "Jane", None, "asc", 1).await.unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(total, 2);
    assert_eq!(names, vec!["Jane Doe", "ajanet"]);

    // Empty term matches all rows.
    let (_, total) = db::employees::list(&pool, "", None, "asc", 1).await.unwrap();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn pagination_returns_fixed_pages_of_five() {
    let pool = test_pool().await;
    for i in 1..=12 {
        db::employees::insert(&pool, &sample_employee(&format!("Emp{:02}", i), 3500.0))
            .await
            .unwrap();
    }

    let (page1, total) = db::employees::list(&pool, "", None, "asc", 1).await.unwrap();
    assert_eq!(total, 12);
    assert_eq!(query::page_count(total), 3);
    let names: Vec<_> = page1.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, vec!["Emp01", "Emp02", "Emp03", "Emp04", "Emp05"]);

    let (page3, _) = db::employees::list(&pool, "", None, "asc", 3).await.unwrap();
    let names: Vec<_> = page3.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, vec!["Emp11", "Emp12"]);

    // Out-of-range page numbers clamp to the first page.
    let (clamped, _) = db::employees::list(&pool, "", None, "asc", 0).await.unwrap();
    assert_eq!(clamped.len(), 5);
    assert_eq!(clamped[0].full_name, "Emp01");
}

#[tokio::test]
async fn descending_sort_is_non_increasing() {
    let pool = test_pool().await;
    for (name, salary) in [("A", 4000.0), ("B", 6000.0), ("C", 5000.0)] {
        db::employees::insert(&pool, &sample_employee(name, salary))
            .await
            .unwrap();
    }

    let (rows, _) = db::employees::list(&pool, "", Some("salary"), "desc", 1)
        .await
        .unwrap();
    let salaries: Vec<_> = rows.iter().map(|r| r.salary).collect();
    assert_eq!(salaries, vec![6000.0, 5000.0, 4000.0]);
}

#[tokio::test]
async fn hostile_sort_input_is_not_interpolated() {
    let pool = test_pool().await;
    db::employees::insert(&pool, &sample_employee("Jane Doe", 3500.0))
        .await
        .unwrap();

    // Falls back to the default column instead of reaching query syntax.
    let (rows, _) = db::employees::list(
        &pool,
        "",
        Some("salary; DROP TABLE employees --"),
        "desc",
        1,
    )
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);

    let (rows, _) = db::employees::list(&pool, "", None, "asc", 1).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn create_with_attachments_stores_files_and_paths_together() {
    let pool = test_pool().await;
    let root = tempfile::tempdir().unwrap();

    let id = store_attachments_and_insert(
        &pool,
        root.path(),
        sample_employee("Jane Doe", 4500.0),
        Some(("portrait.jpg".to_string(), b"jpegdata".to_vec())),
        None,
    )
    .await
    .unwrap();

    let stored = db::employees::find(&pool, id).await.unwrap().unwrap();
    let photo = stored.photo_path.unwrap();
    assert!(photo.starts_with("uploads/photos/"));
    assert!(photo.ends_with("_portrait.jpg"));
    assert_eq!(std::fs::read(root.path().join(&photo)).unwrap(), b"jpegdata");
    assert_eq!(stored.document_path, None);
}

#[tokio::test]
async fn failed_insert_removes_written_attachments() {
    let pool = test_pool().await;
    let root = tempfile::tempdir().unwrap();

    // Force the insert to fail after the file writes have succeeded.
    sqlx::query("DROP TABLE employees")
        .execute(&pool)
        .await
        .unwrap();

    let result = store_attachments_and_insert(
        &pool,
        root.path(),
        sample_employee("Jane Doe", 4500.0),
        Some(("portrait.jpg".to_string(), b"jpegdata".to_vec())),
        Some(("cv.pdf".to_string(), b"%PDF-1.4".to_vec())),
    )
    .await;
    assert!(result.is_err());

    // The compensating deletes leave no orphaned file behind.
    for subdir in ["uploads/photos", "uploads/documents"] {
        let dir = root.path().join(subdir);
        if dir.exists() {
            assert_eq!(std::fs::read_dir(dir).unwrap().count(), 0);
        }
    }
}

#[tokio::test]
async fn update_rewrites_mutable_fields_and_preserves_the_rest() {
    let pool = test_pool().await;
    let mut employee = sample_employee("Jane Doe", 4500.0);
    employee.photo_path = Some("uploads/photos/1_portrait.jpg".to_string());
    let id = db::employees::insert(&pool, &employee).await.unwrap();

    let update = EmployeeUpdate {
        full_name: "Jane Smith".to_string(),
        email: "jane.smith@example.com".to_string(),
        phone: "555-0202".to_string(),
        job_title: "Staff Engineer".to_string(),
        department: "Platform".to_string(),
        salary: 5200.0,
        start_date: date(2020, 1, 6),
        end_date: Some(date(2026, 12, 31)),
    };
    db::employees::update(&pool, id, &update).await.unwrap();

    let stored = db::employees::find(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.full_name, "Jane Smith");
    assert_eq!(stored.salary, 5200.0);
    assert_eq!(stored.end_date, Some(date(2026, 12, 31)));
    // Immutable-at-update columns survive untouched.
    assert_eq!(stored.date_of_birth, date(1990, 6, 15));
    assert_eq!(stored.photo_path.as_deref(), Some("uploads/photos/1_portrait.jpg"));
}
