//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod access_repo;
pub mod advance_repo;
pub mod attendance_repo;
pub mod company_repo;
pub mod employee_repo;
pub mod holiday_repo;
pub mod lookup_repo;
pub mod quotation_repo;
pub mod salary_repo;
pub mod stock_repo;
pub mod task_repo;
pub mod user_repo;
pub mod visit_report_repo;

pub use access_repo::AccessRepo;
pub use advance_repo::AdvanceRepo;
pub use attendance_repo::AttendanceRepo;
pub use company_repo::CompanyRepo;
pub use employee_repo::EmployeeRepo;
pub use holiday_repo::HolidayRepo;
pub use lookup_repo::LookupRepo;
pub use quotation_repo::QuotationRepo;
pub use salary_repo::SalaryRepo;
pub use stock_repo::{GrnRepo, MrpRepo, StockRepo, StockSoldRepo};
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
pub use visit_report_repo::VisitReportRepo;
