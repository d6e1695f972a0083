pub mod config;
pub mod dashboard;
pub mod exposure;
pub mod fetch;
pub mod outcome;
pub mod output;
pub mod parser;
pub mod profile;
pub mod routes;
