mod lines;
mod markers;
mod types;
mod zones;

pub use lines::split_lines;
pub use markers::{Marker, MarkerSet};
pub use types::{Action, Line};
pub use zones::Zone;
