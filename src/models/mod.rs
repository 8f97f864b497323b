pub mod employee;
pub mod timesheet;
