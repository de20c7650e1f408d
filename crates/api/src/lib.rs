//! HTTP surface of the Commander 500 site: routing, configuration and the
//! route guard middleware.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
