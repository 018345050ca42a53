pub mod history;
pub mod review;
pub mod schedule;
pub mod standings;
