pub mod auth;
pub mod calendar;
pub mod catalog;
pub mod days;
pub mod reports;
