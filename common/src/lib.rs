//! Inheritance Intake Common Library
//!
//! 取込クライアントで共有される型と集計ロジック（I/Oなし）

pub mod category;
pub mod types;
pub mod aggregate;
pub mod error;

pub use category::{Category, CategoryCode, resolve_label};
pub use types::{BatchResponse, ExportRequest, HealthReport, ProcessedDocument};
pub use aggregate::{aggregate, data_preview, CategoryCounts, DisplayRow, ResultSummary};
pub use error::{Error, Result};
