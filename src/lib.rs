// Library for tests to access modules

pub mod cli;
pub mod config;
pub mod counters;
pub mod models;
pub mod routes;
pub mod sampler;
pub mod tls;
pub mod version;
