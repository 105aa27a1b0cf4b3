pub mod file_io;
pub mod force_graph;
pub mod json_loader;
pub mod notice;
pub mod tabular_loader;
