//! Minification detection and the read/edit/write workflow.
//!
//! - [`detector`]: heuristic cascade deciding whether code is minified
//! - [`modifications`]: parsing of the find/replace payload
//! - [`workflow`]: [`SmartProcessor`], which chains detection, formatting and edits

pub mod detector;
pub mod modifications;
pub mod workflow;

pub use detector::{detect, is_minified, Detection, Rule};
pub use modifications::{apply_all, parse_modifications, ModificationError};
pub use workflow::{smart_process, ProcessRequest, SmartProcessor};
