pub mod auth;
pub mod catalog;
pub mod ledger;
pub mod reports;
pub mod stats;
