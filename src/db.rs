pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod ledger_repo;
pub use ledger_repo::LedgerRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
