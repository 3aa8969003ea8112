// Process-tree monitoring module

mod snapshot;
mod tree;

pub use snapshot::{ProcState, ProcessRecord, Snapshot};
pub use tree::descendants;
