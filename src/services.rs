pub mod aggregation;
pub mod auth;
pub mod cashier_service;
pub mod catalog_service;
pub mod dashboard_service;
pub mod report_service;
pub mod revenue;
pub mod view_assembler;
pub mod view_state;
