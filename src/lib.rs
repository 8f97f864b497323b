pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod query;
pub mod utils;
