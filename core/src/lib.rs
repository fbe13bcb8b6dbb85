pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod model;
pub mod service;
pub mod store;
pub mod validator;
