// src/services/mod.rs
pub mod auth_service;
pub mod export_service;
pub mod progress_service;
pub mod schedule_service;
pub mod turma_service;
pub mod user_service;
