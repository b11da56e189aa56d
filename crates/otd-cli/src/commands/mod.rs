pub mod browse;
pub mod days;
pub mod dispatch;
pub mod months;
pub mod query;
pub mod search;
pub mod today;
