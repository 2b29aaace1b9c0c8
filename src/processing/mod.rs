//! Detection and redaction module

pub mod detector;
pub mod document;
pub mod patterns;
pub mod pipeline;
pub mod redactor;
