//! Beautify and minify for JavaScript and CSS.
//!
//! - [`js`]: oxc parse and codegen
//! - [`css`]: lightningcss parse and print
//! - [`traits`]: the [`CodeFormatter`] seam and the per-language [`FormatterSet`]

pub mod css;
pub mod js;
pub mod traits;

pub use traits::{CodeFormatter, CssFormatter, FormatterSet, JsFormatter};

#[cfg(test)]
mod tests;
