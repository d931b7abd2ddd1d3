#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication and authorization"]
#![doc = "mechanisms, storage access, routing configuration, and error handling for"]
#![doc = "the TaskTrack service. The main binary (`main.rs`) uses it to construct"]
#![doc = "and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
