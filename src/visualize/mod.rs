//! Derived table, insights, PNG charts and the text report.

mod charts;
mod insights;
mod report;
mod table;

pub use charts::*;
pub use insights::*;
pub use report::*;
pub use table::*;
