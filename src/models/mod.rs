// src/models/mod.rs

pub mod answer_key;
pub mod evaluation;
pub mod participation;
pub mod question;
pub mod submission;
