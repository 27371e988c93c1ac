//! Format implementations
//!
//! - `ipynb`: notebook JSON, the converter's native output.
//! - `html`: report rendered from the notebook by `jupyter nbconvert`.
//!
//! The R Markdown reader lives in [`crate::rmarkdown`].

#[cfg(feature = "native-export")]
pub mod html;
pub mod ipynb;

#[cfg(feature = "native-export")]
pub use html::{HtmlFormat, HtmlOptions};
pub use ipynb::IpynbFormat;
