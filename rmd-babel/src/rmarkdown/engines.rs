//! Knitr engine → SoS kernel resolution
//!
//! Each chunk names a knitr engine (`r`, `python`, `bash`, ...). SoS routes a cell by kernel
//! name, so the engine is mapped onto the kernel that runs that language. The kernels a document
//! actually uses are collected, in first-use order, into the notebook's kernel list.

use crate::notebook::KernelEntry;

/// The SoS kernel itself. Always first in the kernel list: it is the notebook's default kernel
/// and delegates every other cell to its subkernel.
pub const SOS_KERNEL: (&str, &str) = ("SoS", "sos");

/// Kernel that expands inline `` `r ...` `` spans inside Markdown text.
pub const MARKDOWN_KERNEL: (&str, &str) = ("Markdown", "markdown");

/// Known knitr engines and the kernel (display name, kernel name) that runs them.
const ENGINE_KERNELS: &[(&str, (&str, &str))] = &[
    ("python", ("Python3", "python3")),
    ("sas", ("SAS", "sas")),
    ("ruby", ("Ruby", "ruby")),
    ("sh", ("Bash", "bash")),
    ("bash", ("Bash", "bash")),
    ("Node", ("JavaScript", "javascript")),
    ("r", ("R", "ir")),
    ("Rscript", ("R", "ir")),
    ("stata", ("Stata", "stata")),
    ("octave", ("Octave", "octave")),
];

/// Look up the kernel for a knitr engine name. Engine names are case sensitive.
pub fn lookup(engine: &str) -> Option<KernelEntry> {
    ENGINE_KERNELS
        .iter()
        .find(|(name, _)| *name == engine)
        .map(|(_, (display, kernel))| KernelEntry::new(*display, *kernel))
}

/// Resolve an engine name, falling back to a kernel named after the engine itself.
pub fn resolve(engine: &str) -> KernelEntry {
    lookup(engine).unwrap_or_else(|| KernelEntry::new(engine, engine))
}

/// Ordered, de-duplicated list of the kernels a document uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelRegistry {
    used: Vec<KernelEntry>,
}

impl KernelRegistry {
    /// A registry seeded with the SoS kernel.
    pub fn new() -> Self {
        KernelRegistry {
            used: vec![KernelEntry::new(SOS_KERNEL.0, SOS_KERNEL.1)],
        }
    }

    /// Resolve `engine`, record its kernel as used and return the name cells should carry.
    pub fn use_engine(&mut self, engine: &str) -> String {
        let entry = resolve(engine);
        let display = entry.display_name.clone();
        self.insert(entry);
        display
    }

    /// Append `entry` unless a structurally equal entry is already present.
    pub fn insert(&mut self, entry: KernelEntry) {
        if !self.used.contains(&entry) {
            self.used.push(entry);
        }
    }

    /// Append the Markdown kernel. Done once, after scanning, so it always ends the list.
    pub fn push_markdown(&mut self) {
        self.used
            .push(KernelEntry::new(MARKDOWN_KERNEL.0, MARKDOWN_KERNEL.1));
    }

    pub fn entries(&self) -> &[KernelEntry] {
        &self.used
    }

    /// True when the document only needs SoS and, at most, the R kernel.
    pub fn is_sos_or_r_only(&self) -> bool {
        self.used.len() <= 2 && self.used.iter().skip(1).all(|entry| entry.name == "ir")
    }

    pub fn into_entries(self) -> Vec<KernelEntry> {
        self.used
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
