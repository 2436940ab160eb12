pub mod auth;
pub mod catalog_service;
pub mod ledger_service;
pub mod report_service;
pub mod stats_service;
