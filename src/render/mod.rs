//! Output rendering (CSV table, run report)

pub mod csv_writer;
pub mod report;
pub mod table;

pub use csv_writer::{write_output, AtomicCsvWriter};
pub use report::write_report;
pub use table::{select_header, OutputTable, TableRow};
