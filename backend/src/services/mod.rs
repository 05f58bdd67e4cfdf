//! Business logic services for the Inventory & Quotation Management backend

pub mod alert;
pub mod auth;
pub mod category;
pub mod customer;
pub mod movement;
pub mod product;
pub mod quotation;
pub mod reporting;
pub mod supplier;
pub mod user;

pub use alert::AlertService;
pub use auth::AuthService;
pub use category::CategoryService;
pub use customer::CustomerService;
pub use movement::MovementService;
pub use product::ProductService;
pub use quotation::QuotationService;
pub use reporting::ReportingService;
pub use supplier::SupplierService;
pub use user::UserService;
