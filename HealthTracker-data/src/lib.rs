// Health Tracker Data
// This crate owns local persistence: storage backends, persisted models and the reading store

// Storage configuration and SQLite connection management
pub mod database;

// Persisted entity models
pub mod models;

// Reading store built on top of the key-value backends
pub mod repository;

// Key-value and blob storage backends
pub mod storage;
