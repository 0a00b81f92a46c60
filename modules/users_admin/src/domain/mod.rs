pub mod demo;
pub mod error;
pub mod repo;
pub mod service;
