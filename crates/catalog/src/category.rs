use serde::{Deserialize, Serialize};

/// The six content categories, grouped into three opposite pairs:
/// `(Wise, Stupid)`, `(Beautiful, Repulsive)`, `(Funny, Unfunny)`.
///
/// The declaration order is the canonical order used for weight vectors and
/// for every deterministic tie-break.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Wise,
    Stupid,
    Beautiful,
    Repulsive,
    Funny,
    Unfunny,
}

impl Category {
    pub const COUNT: usize = 6;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Wise,
        Category::Stupid,
        Category::Beautiful,
        Category::Repulsive,
        Category::Funny,
        Category::Unfunny,
    ];

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Category {
        match self {
            Category::Wise => Category::Stupid,
            Category::Stupid => Category::Wise,
            Category::Beautiful => Category::Repulsive,
            Category::Repulsive => Category::Beautiful,
            Category::Funny => Category::Unfunny,
            Category::Unfunny => Category::Funny,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Wise => "wise",
            Category::Stupid => "stupid",
            Category::Beautiful => "beautiful",
            Category::Repulsive => "repulsive",
            Category::Funny => "funny",
            Category::Unfunny => "unfunny",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
