//! dat-merge: merge and deduplicate `.dat` files into a single CSV
//!
//! Reads every tab-separated `.dat` file in the input directory, drops
//! duplicate rows across files, and writes `output.csv` followed by summary
//! statistics of the salary column.

use anyhow::Result;

fn main() -> Result<()> {
    dat_merge::cli::run()
}
