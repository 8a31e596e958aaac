//! Source location identifiers.
//!
//! The AST collaborator tags nodes with locations that are stable for the
//! lifetime of one generation pass. The emitter never resolves them back to
//! text; it only needs them as unique, deterministic identifiers when
//! synthesizing internal names.

/// Identifier of a source file within one generation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// A line/column position inside a file.
///
/// Lines and columns are 1-based, matching what compilers print. A
/// default-constructed location (all zeros) means "no location available";
/// name synthesis falls back to a purely name-based scheme for those.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceLoc {
    pub file: FileId,
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    pub fn new(file: FileId, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }

    /// True when this location carries real position information.
    pub fn is_valid(&self) -> bool {
        self.line != 0
    }
}

impl std::fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.0, self.line, self.column)
    }
}
