mod driver;
mod report;

pub use driver::{Generator, Source};
pub use report::RunSummary;
