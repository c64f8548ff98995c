pub mod auth;
pub mod cla;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod paths;
pub mod signing;
pub mod templates_structs;
