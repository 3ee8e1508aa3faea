//! Input discovery and loading

pub mod scanner;

pub use scanner::{DatScanner, ScanStats};
