pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;
pub mod validation;
pub mod dtos;
pub mod mapper;
pub mod crud;
pub mod reviews;
pub mod state;

pub use startup::run;
