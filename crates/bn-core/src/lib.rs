pub mod config;
pub mod error;
pub mod mcp;
pub mod types;

pub use config::BeaunifiConfig;
pub use error::{BnError, Result};
pub use types::{char_len, Action, Language, Modification, ProcessResult};
