pub use crate::diagnostics::{CstError, ParseDiagnostic};
pub use crate::events::{normalize_events, normalize_str, Arg, Event};
pub use crate::normalize::{Normalized, Normalizer};

pub mod cli;
pub mod cst;
pub mod diagnostics;
pub mod events;
pub mod logging;
pub mod normalize;
pub mod test_harness;
