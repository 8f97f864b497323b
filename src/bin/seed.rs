//! Clears and repopulates the database with plausible fake data: ten
//! employees, two timesheets each.

use chrono::{Datelike, Duration, Local, NaiveDate, Utc};
use dotenv::dotenv;
use fake::faker::company::en::Industry;
use fake::faker::internet::en::SafeEmail;
use fake::faker::job::en::Title;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use log::info;
use rand::Rng;

use staffsheet::db;
use staffsheet::models::employee::NewEmployee;
use staffsheet::models::timesheet::TimesheetRecord;

const EMPLOYEE_COUNT: usize = 10;
const TIMESHEETS_PER_EMPLOYEE: usize = 2;

fn random_date_between(rng: &mut impl Rng, earliest: NaiveDate, latest: NaiveDate) -> NaiveDate {
    let span = (latest - earliest).num_days().max(1);
    earliest + Duration::days(rng.gen_range(0..span))
}

#[tokio::main]
async fn main() -> Result<(), sqlx::Error> {
    dotenv().ok();
    env_logger::init();

    let pool = db::pool().await?;

    info!("Clearing old data...");
    sqlx::query("DELETE FROM timesheets").execute(pool).await?;
    sqlx::query("DELETE FROM employees").execute(pool).await?;

    let mut rng = rand::thread_rng();
    let today = Local::now().date_naive();

    info!("Seeding employees...");
    let mut employee_ids = Vec::with_capacity(EMPLOYEE_COUNT);
    for _ in 0..EMPLOYEE_COUNT {
        // Ages 18-60 by calendar year, so every seeded employee passes the
        // creation rules.
        let birth_year = rng.gen_range(today.year() - 60..=today.year() - 18);
        let date_of_birth = NaiveDate::from_ymd_opt(
            birth_year,
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        )
        .unwrap();
        let start_date = random_date_between(&mut rng, today - Duration::days(3650), today);
        let end_date = if rng.gen_bool(0.2) {
            Some(random_date_between(&mut rng, today, today + Duration::days(365)))
        } else {
            None
        };
        let salary = (rng.gen_range(3000.0..10000.0_f64) * 100.0).round() / 100.0;

        let employee = NewEmployee {
            full_name: Name().fake(),
            email: SafeEmail().fake(),
            phone: PhoneNumber().fake(),
            date_of_birth,
            job_title: Title().fake(),
            department: Industry().fake(),
            salary,
            start_date,
            end_date,
            photo_path: Some(format!("uploads/photos/{:016x}.jpg", rng.gen::<u64>())),
            document_path: Some(format!("uploads/documents/{:016x}_cv.pdf", rng.gen::<u64>())),
        };
        employee_ids.push(db::employees::insert(pool, &employee).await?);
    }

    info!("Seeding timesheets...");
    for employee_id in &employee_ids {
        for _ in 0..TIMESHEETS_PER_EMPLOYEE {
            let start_time = Utc::now().naive_utc()
                - Duration::days(rng.gen_range(0..30))
                - Duration::hours(rng.gen_range(0..12));
            let record = TimesheetRecord {
                employee_id: *employee_id,
                start_time,
                end_time: start_time + Duration::hours(rng.gen_range(2..10)),
                summary: Some(Sentence(3..8).fake()),
            };
            db::timesheets::insert(pool, &record).await?;
        }
    }

    info!(
        "Seeded {} employees and {} timesheets.",
        employee_ids.len(),
        employee_ids.len() * TIMESHEETS_PER_EMPLOYEE
    );
    Ok(())
}
