//! R Markdown to SoS notebook conversion
//!
//!     This crate converts R Markdown documents (Markdown prose interleaved with fenced knitr
//!     chunks in several languages, plus an optional YAML header) into Jupyter notebooks for the
//!     multi-language SoS kernel, and from there into HTML reports.
//!
//!     TLDR:
//!         - The R Markdown reader is a single-pass, line-oriented scanner. It never evaluates
//!           code: chunks become code cells tagged with the kernel that should run them.
//!         - Execution and rendering belong to the Jupyter tools (papermill, nbconvert); this
//!           crate only stages notebooks for them and collects the results.
//!         - This is a pure lib, it powers the rmd-cli. It never prints; recoverable problems in
//!           the input are reported through the `log` facade.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── notebook                # nbformat v4 model and the notebook envelope builder
//!     ├── rmarkdown               # the R Markdown reader (scanner and its parts)
//!     ├── formats
//!     │   ├── ipynb.rs            # notebook JSON
//!     │   └── html                # reports via jupyter nbconvert
//!     ├── execute.rs              # Executor trait, papermill executor
//!     ├── tools.rs                # locating and running external tools
//!     ├── source.rs               # reading input files
//!     └── publish.rs              # conversion pipeline
//!
//! Testing
//!     tests
//!     └── <area>
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait, see [./format.rs].
//!     - rmarkdown: input only.
//!     - ipynb: both ways; reading is how executed notebooks come back from papermill.
//!     - html: output only, needs `jupyter` (feature `native-export`).

pub mod error;
pub mod execute;
pub mod format;
pub mod formats;
pub mod notebook;
pub mod publish;
pub mod registry;
pub mod rmarkdown;
pub mod source;
#[cfg(feature = "native-export")]
pub mod tools;

pub use error::FormatError;
#[cfg(feature = "native-export")]
pub use execute::PapermillExecutor;
pub use execute::{Executed, Executor};
pub use format::Format;
pub use notebook::{BuildOptions, Notebook};
pub use publish::{ConvertRequest, PublishArtifact, PublishResult, PublishSpec};
pub use registry::FormatRegistry;
pub use rmarkdown::{convert, Conversion, RmarkdownFormat};
