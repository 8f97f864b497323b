//! Business rules applied before any write is committed. All functions here
//! are pure; handlers decide how a violation is surfaced (request-level error
//! on create, structured result on update).

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub const MIN_AGE: i32 = 18;
pub const MIN_SALARY: f64 = 3000.0;

pub const AGE_MESSAGE: &str = "Employee must be at least 18 years old.";
pub const SALARY_MESSAGE: &str = "Salary must be at least $3000.";
pub const UPDATE_MESSAGE: &str =
    "All required fields must be filled, and salary must be at least $3000.";
pub const TIME_ORDER_MESSAGE: &str = "Start time must be before end time.";

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Accepts `datetime-local` input (`2025-03-01T09:00`) as well as full ISO
/// timestamps with seconds and fractional seconds.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Age as the original system computed it: current year minus birth year,
/// not adjusted for whether the birthday has passed.
pub fn age_in_calendar_years(date_of_birth: NaiveDate, current_year: i32) -> i32 {
    current_year - date_of_birth.year()
}

/// Custom hook for the creation payload's `date_of_birth` field.
pub fn validate_date_of_birth(raw: &str) -> Result<(), ValidationError> {
    let date_of_birth = parse_date(raw).ok_or_else(|| violation("date", AGE_MESSAGE))?;
    if age_in_calendar_years(date_of_birth, Local::now().year()) < MIN_AGE {
        return Err(violation("min_age", AGE_MESSAGE));
    }
    Ok(())
}

/// Custom hook for the creation payload's `salary` field. Form values arrive
/// as text; an unparseable salary is rejected rather than inserted.
pub fn validate_salary(raw: &str) -> Result<(), ValidationError> {
    let salary: f64 = raw
        .trim()
        .parse()
        .map_err(|_| violation("salary", SALARY_MESSAGE))?;
    // "NaN" and "inf" parse as f64 but are not salaries; NaN in particular
    // compares false against the threshold.
    if !salary.is_finite() || salary < MIN_SALARY {
        return Err(violation("min_salary", SALARY_MESSAGE));
    }
    Ok(())
}

/// Update-path check: full_name/email/phone must be present and salary must
/// parse to a number >= 3000. Returns the parsed salary. Date-of-birth is
/// deliberately not re-checked here; it is validated at creation only.
pub fn check_employee_update(
    full_name: &str,
    email: &str,
    phone: &str,
    salary_raw: &str,
) -> Result<f64, &'static str> {
    if full_name.trim().is_empty() || email.trim().is_empty() || phone.trim().is_empty() {
        return Err(UPDATE_MESSAGE);
    }
    let salary: f64 = salary_raw.trim().parse().map_err(|_| UPDATE_MESSAGE)?;
    if !salary.is_finite() || salary < MIN_SALARY {
        return Err(UPDATE_MESSAGE);
    }
    Ok(salary)
}

/// Timesheet rule: start must be strictly earlier than end.
pub fn check_time_order(
    start_raw: &str,
    end_raw: &str,
) -> Result<(NaiveDateTime, NaiveDateTime), &'static str> {
    let start = parse_datetime(start_raw).ok_or(TIME_ORDER_MESSAGE)?;
    let end = parse_datetime(end_raw).ok_or(TIME_ORDER_MESSAGE)?;
    if start >= end {
        return Err(TIME_ORDER_MESSAGE);
    }
    Ok((start, end))
}

/// Fields are reported in the order the creation rules are applied, so the
/// surfaced message is deterministic when several rules fail at once; the
/// age rule comes first, as it always did.
const FIELD_ORDER: &[&str] = &["date_of_birth", "salary"];

/// Pulls the first human-readable message out of a `validator` error tree.
pub fn first_message(errors: &ValidationErrors) -> String {
    let map = errors.errors();
    for key in FIELD_ORDER {
        if let Some(msg) = map.get(key).and_then(kind_message) {
            return msg;
        }
    }
    // Remaining fields in name order; never hash-map iteration order.
    let mut rest: Vec<_> = map
        .iter()
        .filter(|(key, _)| !FIELD_ORDER.contains(*key))
        .collect();
    rest.sort_by(|a, b| a.0.cmp(&b.0));
    for (_, kind) in rest {
        if let Some(msg) = kind_message(kind) {
            return msg;
        }
    }
    "Invalid input".to_string()
}

fn kind_message(kind: &ValidationErrorsKind) -> Option<String> {
    match kind {
        ValidationErrorsKind::Field(list) => list.first().map(|err| {
            err.message
                .as_ref()
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| err.code.to_string())
        }),
        ValidationErrorsKind::Struct(nested) => Some(first_message(nested)),
        ValidationErrorsKind::List(map) => {
            map.values().next().map(|nested| first_message(nested))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn age_uses_calendar_year_subtraction() {
        let dob = NaiveDate::from_ymd_opt(2008, 12, 31).unwrap();
        // Counted as 18 for the whole of 2026 even before the birthday.
        assert_eq!(age_in_calendar_years(dob, 2026), 18);
        assert_eq!(age_in_calendar_years(dob, 2025), 17);
    }

    #[test]
    fn salary_threshold_is_inclusive() {
        assert!(validate_salary("3000").is_ok());
        assert!(validate_salary("3000.00").is_ok());
        assert!(validate_salary("2999.99").is_err());
        assert!(validate_salary("not-a-number").is_err());
        assert!(validate_salary("").is_err());
        // Parseable-but-non-finite values are not salaries.
        assert!(validate_salary("NaN").is_err());
        assert!(validate_salary("nan").is_err());
        assert!(validate_salary("inf").is_err());
        assert!(validate_salary("-inf").is_err());
        assert!(validate_salary("infinity").is_err());
    }

    #[test]
    fn update_check_requires_all_fields() {
        assert_eq!(
            check_employee_update("Jane Doe", "jane@example.com", "555-0101", "4500"),
            Ok(4500.0)
        );
        assert!(check_employee_update("", "jane@example.com", "555-0101", "4500").is_err());
        assert!(check_employee_update("Jane Doe", "", "555-0101", "4500").is_err());
        assert!(check_employee_update("Jane Doe", "jane@example.com", "", "4500").is_err());
        assert!(check_employee_update("Jane Doe", "jane@example.com", "555-0101", "abc").is_err());
        assert!(check_employee_update("Jane Doe", "jane@example.com", "555-0101", "2999").is_err());
        assert!(check_employee_update("Jane Doe", "jane@example.com", "555-0101", "NaN").is_err());
        assert!(check_employee_update("Jane Doe", "jane@example.com", "555-0101", "inf").is_err());
        // Exactly at the threshold is accepted.
        assert_eq!(
            check_employee_update("Jane Doe", "jane@example.com", "555-0101", "3000"),
            Ok(3000.0)
        );
    }

    #[test]
    fn time_order_must_be_strict() {
        assert!(check_time_order("2025-03-01T09:00", "2025-03-01T17:00").is_ok());
        assert!(check_time_order("2025-03-01T09:00", "2025-03-01T09:00").is_err());
        assert!(check_time_order("2025-03-01T17:00", "2025-03-01T09:00").is_err());
        // One millisecond of separation is enough.
        assert!(check_time_order("2025-03-01T09:00:00.000", "2025-03-01T09:00:00.001").is_ok());
        assert!(check_time_order("garbage", "2025-03-01T09:00").is_err());
    }

    #[test]
    fn datetime_parsing_accepts_datetime_local_and_iso() {
        assert!(parse_datetime("2025-03-01T09:00").is_some());
        assert!(parse_datetime("2025-03-01T09:00:30").is_some());
        assert!(parse_datetime("2025-03-01T09:00:30.250").is_some());
        assert!(parse_datetime("2025-03-01T09:00:30.250Z").is_some());
        assert!(parse_datetime("2025-03-01").is_none());
    }

    #[test]
    fn first_message_reports_the_age_rule_before_salary() {
        let mut errors = ValidationErrors::new();
        // Insertion order deliberately reversed; the reported order must not
        // depend on it (or on hash-map iteration).
        errors.add("salary", violation("min_salary", SALARY_MESSAGE));
        errors.add("date_of_birth", violation("min_age", AGE_MESSAGE));
        assert_eq!(first_message(&errors), AGE_MESSAGE);

        let mut errors = ValidationErrors::new();
        errors.add("salary", violation("min_salary", SALARY_MESSAGE));
        assert_eq!(first_message(&errors), SALARY_MESSAGE);
    }

    #[test]
    fn dob_hook_rejects_underage_and_garbage() {
        assert!(validate_date_of_birth("not-a-date").is_err());
        // Born last year: always underage by calendar-year subtraction.
        let last_year = Local::now().year() - 1;
        assert!(validate_date_of_birth(&format!("{}-06-15", last_year)).is_err());
        assert!(validate_date_of_birth("1980-06-15").is_ok());
    }
}
