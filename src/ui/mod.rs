// src/ui/mod.rs
pub mod dashboard;
