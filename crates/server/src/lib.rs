//! University registrar service: accounts, course registration, grading
//! and reporting over a sea-orm database, served with axum.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod repository;
pub mod service;
