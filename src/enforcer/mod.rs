// Signal enforcement module

mod signals;

pub use signals::{action_for, enforce, resume, Action, SignalOutcome};
