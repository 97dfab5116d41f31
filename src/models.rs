pub mod auth;
pub mod customer;
pub mod dealership;
pub mod sale;
pub mod service;
pub mod vehicle;
