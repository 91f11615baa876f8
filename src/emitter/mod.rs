mod banner;
mod guard;
mod sink;
mod splitter;

pub use banner::Banner;
pub use guard::{Guard, GuardLines};
pub use sink::OutputSink;
pub use splitter::{SplitOutcome, SplitStats, Splitter};
