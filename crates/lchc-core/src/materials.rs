//! Material taxonomy: combo names, standard categories, and the
//! index-to-name map persisted alongside a trained bundle.

use serde::{Deserialize, Serialize};

use crate::error::{LchcError, Result};

/// Standard material category a combo rolls up to.
///
/// The reference table (`materials_curated.csv`) is keyed by these
/// categories, so every combo in the training data must map to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StdCategory {
    Timber,
    Concrete,
}

impl StdCategory {
    /// The category name as it appears in the reference table.
    pub fn as_str(&self) -> &'static str {
        match self {
            StdCategory::Timber => "timber",
            StdCategory::Concrete => "concrete",
        }
    }

    /// Parse a reference-table category name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "timber" => Some(StdCategory::Timber),
            "concrete" => Some(StdCategory::Concrete),
            _ => None,
        }
    }
}

/// Maps a material combo to its standard category.
pub fn combo_to_std_category(combo: &str) -> Option<StdCategory> {
    match combo {
        "timber_frame_concrete_slab" | "all_timber" => Some(StdCategory::Timber),
        "concrete_shell_timber_roof" | "all_concrete" => Some(StdCategory::Concrete),
        _ => None,
    }
}

/// Index-to-name mapping for material combos.
///
/// The classifier predicts an index into this map. Names are stored in
/// sorted order so that the same dataset always produces the same codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialMap {
    names: Vec<String>,
}

impl MaterialMap {
    /// Build a map from the distinct combo names in a dataset.
    ///
    /// Duplicates are collapsed and the result is sorted, matching the
    /// category-code assignment used for the classification target.
    pub fn from_combos<I, S>(combos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = combos.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// The class index for a combo name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).ok()
    }

    /// The combo name for a class index.
    pub fn name_of(&self, index: usize) -> Result<&str> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(LchcError::InvalidWidth {
                expected: self.names.len(),
                actual: index,
            })
    }

    /// Number of distinct materials.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
