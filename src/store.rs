pub mod client;
pub use client::{HttpRecordStore, RecordStore, Resource};
pub mod response;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
