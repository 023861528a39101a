pub mod database;
pub mod export;
pub mod report;
