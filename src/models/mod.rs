// src/models/mod.rs
pub mod schedule;
pub mod turma;
pub mod user;
