pub mod auth;
pub mod catalog_service;
pub mod ledger_service;
