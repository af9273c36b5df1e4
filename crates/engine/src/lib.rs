pub mod analysis;
pub mod config;
pub mod generator;
pub mod routes;
pub mod store;
pub mod submission;
