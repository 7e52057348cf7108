//! Rarity tiers used to group sprite files.
//!
//! Every sprite file carries its rarity as the label between `_BBTap_` and
//! `.png`. This module maps those labels to a fixed set of variants and builds
//! the canonical file name a retained sprite is renumbered to.
//!
//! # Examples
//!
//! ```
//! use sprite_curator::rarity::Rarity;
//!
//! assert_eq!(Rarity::from_label("Epic"), Some(Rarity::Epic));
//! assert_eq!(Rarity::from_label("Mythic"), None);
//! assert_eq!(Rarity::Rare.target_name(3), "3_BBTap_Rare.png");
//! ```

use std::fmt;

/// Marker between the numeric prefix and the rarity label.
pub const NAME_MARKER: &str = "_BBTap_";

/// Extension carried by every sprite file.
pub const NAME_EXTENSION: &str = ".png";

/// A rarity tier.
///
/// Variants are declared in processing order: the special tiers are selected
/// first, `Common` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    /// Rare sprites.
    Rare,
    /// Epic sprites.
    Epic,
    /// Legendary sprites.
    Legendary,
    /// Common sprites, selected after every other tier.
    Common,
}

impl Rarity {
    /// All rarities in processing order.
    pub const ALL: [Rarity; 4] = [
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Common,
    ];

    /// Rarities that claim prefixes before `Common` is considered.
    pub const SPECIAL: [Rarity; 3] = [Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    /// Returns the label used in file names for this rarity.
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Common => "Common",
        }
    }

    /// Parses a file name label. Matching is case-sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rarity| rarity.label() == label)
    }

    /// Builds the file name for the `index`-th retained sprite of this rarity.
    ///
    /// Indices are 1-based.
    pub fn target_name(&self, index: usize) -> String {
        format!("{}{}{}{}", index, NAME_MARKER, self.label(), NAME_EXTENSION)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
