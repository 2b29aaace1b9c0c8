//! Output module for console results, reports and cleaned files

pub mod export;
pub mod formatter;
pub mod report;

pub use formatter::ConsoleFormatter;
pub use report::DetectionReport;
