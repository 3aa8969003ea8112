// Admission policy module

mod admission;

pub use admission::{decide, CycleDecision, Decision, DesiredState};
