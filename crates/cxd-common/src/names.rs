//! Synthesis of internal names for compiler-generated entities.
//!
//! Desugared output introduces names the source never contained: the
//! temporary holding a decomposed value, the closure class of a lambda, the
//! guard flag of a static local. Names must be deterministic for a fixed
//! input and unique within one generation pass. When a node carries a valid
//! source location the name is derived from a stable hash of the original
//! name plus that location; otherwise a per-pass counter keeps the purely
//! name-based scheme collision-free.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::position::SourceLoc;

/// Per-pass generator for internal names. One instance per generation pass;
/// nothing persists across passes.
#[derive(Debug, Default)]
pub struct NameGenerator {
    // base name -> number of location-less names handed out for it
    unnamed: FxHashMap<String, u32>,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Internal variable name for a synthesized entity derived from `base`.
    pub fn internal_var_name(&mut self, base: &str, location: Option<SourceLoc>) -> String {
        match location {
            Some(loc) if loc.is_valid() => {
                let mut hasher = FxHasher::default();
                base.hash(&mut hasher);
                loc.hash(&mut hasher);
                format!("__{base}{:x}", hasher.finish() & 0xFFFF)
            }
            _ => {
                let counter = self.unnamed.entry(base.to_string()).or_insert(0);
                *counter += 1;
                if *counter == 1 {
                    format!("__{base}")
                } else {
                    format!("__{base}{}", *counter)
                }
            }
        }
    }

    /// Name of the closure class a lambda expression denotes.
    pub fn lambda_class_name(location: SourceLoc) -> String {
        format!("__lambda_{}_{}", location.line, location.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::FileId;

    #[test]
    fn located_names_differ_by_location() {
        let mut names = NameGenerator::new();
        let a = names.internal_var_name("e", Some(SourceLoc::new(FileId(0), 4, 10)));
        let b = names.internal_var_name("e", Some(SourceLoc::new(FileId(0), 9, 10)));
        assert_ne!(a, b);
        assert!(a.starts_with("__e"));
    }

    #[test]
    fn located_names_are_deterministic() {
        let loc = SourceLoc::new(FileId(1), 12, 5);
        let mut first = NameGenerator::new();
        let mut second = NameGenerator::new();
        assert_eq!(
            first.internal_var_name("p", Some(loc)),
            second.internal_var_name("p", Some(loc))
        );
    }

    #[test]
    fn unlocated_names_stay_unique() {
        let mut names = NameGenerator::new();
        assert_eq!(names.internal_var_name("s", None), "__s");
        assert_eq!(names.internal_var_name("s", None), "__s2");
        assert_eq!(names.internal_var_name("s", None), "__s3");
    }

    #[test]
    fn lambda_names_follow_location() {
        let name = NameGenerator::lambda_class_name(SourceLoc::new(FileId(0), 7, 13));
        assert_eq!(name, "__lambda_7_13");
    }
}
