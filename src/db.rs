pub mod crud;

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod dealership_repo;
pub use dealership_repo::DealershipRepository;
pub mod vehicle_repo;
pub use vehicle_repo::VehicleRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod service_repo;
pub use service_repo::ServiceRepository;
