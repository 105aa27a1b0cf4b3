//! Data ingestion: CSV and graph JSON in, a validated [`GraphModel`] out.
//!
//! ```text
//! CSV text  -> tokenize -> classify -> ColumnMapping::resolve -> build ─┐
//! JSON text -> serde_json -> validate ─────────────────────────────────┴─> GraphModel
//! ```
//!
//! Nothing here touches the browser, so it is tested natively.

pub mod builder;
pub mod columns;
pub mod ingest;
pub mod model;
pub mod samples;
pub mod tokenizer;
pub mod validate;

pub use builder::{BuildReport, BuildWarning, build, build_report};
pub use columns::{ColumnChoice, ColumnMapping, ColumnRole, MappingError, ResolvedColumns, classify};
pub use ingest::{IngestError, SourceFormat};
pub use model::{Edge, Extra, GraphModel, Metadata, MetadataValue, Node, Position};
pub use tokenizer::{Row, Table, tokenize};
pub use validate::{ValidationError, validate};
