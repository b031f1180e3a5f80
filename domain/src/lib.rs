pub mod models;
pub mod paragraph;
pub mod ports;
pub mod session;
