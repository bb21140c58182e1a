//! PatientDB: a minimal patient record management service
//!
//! PatientDB keeps patient health records in a single JSON-backed
//! collection, derives BMI and a health verdict on every read, and exposes
//! read/sort/create operations over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod patient;
pub mod query;
pub mod service;
pub mod storage;
