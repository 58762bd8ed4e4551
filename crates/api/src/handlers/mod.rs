pub mod access;
pub mod advances;
pub mod attendance;
pub mod auth;
pub mod companies;
pub mod employees;
pub mod form;
pub mod holidays;
pub mod lookups;
pub mod quotations;
pub mod salary;
pub mod stock;
pub mod tasks;
pub mod visit_reports;
