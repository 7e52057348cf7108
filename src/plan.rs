//! Selection of the sprites that survive a run.
//!
//! Planning is pure: it takes the scanned sprites and the rule table and
//! decides which files are deleted and how the survivors are renumbered,
//! without touching the filesystem. [`crate::curator::Curator`] applies the
//! resulting [`CurationPlan`].

use crate::config::{CurationRules, RarityRule};
use crate::curator::{CurateError, CurateResult};
use crate::rarity::Rarity;
use crate::sprite_file::SpriteFile;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Prefixes claimed by retained sprites so far.
///
/// The set is shared by every rarity and is passed by value from one
/// selection step to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedPrefixes(HashSet<u64>);

impl UsedPrefixes {
    /// Returns true if a retained sprite already carries `prefix`.
    pub fn contains(&self, prefix: u64) -> bool {
        self.0.contains(&prefix)
    }

    fn claim(mut self, prefix: u64) -> Self {
        self.0.insert(prefix);
        self
    }

    /// Number of distinct prefixes claimed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Why a sprite is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionReason {
    /// Its prefix is carried by a retained sprite.
    PrefixConflict,
    /// Its rarity was already full.
    Excess,
}

impl fmt::Display for DeletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionReason::PrefixConflict => f.write_str("prefix conflict"),
            DeletionReason::Excess => f.write_str("excess"),
        }
    }
}

/// A sprite scheduled for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub sprite: SpriteFile,
    pub reason: DeletionReason,
}

/// A retained sprite moving to its dense position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub rarity: Rarity,
    pub from: String,
    pub to: String,
}

/// Outcome of selection for one directory snapshot.
#[derive(Debug, Clone, Default)]
pub struct CurationPlan {
    /// Retained sprites per rarity, sorted by prefix ascending.
    pub retained: BTreeMap<Rarity, Vec<SpriteFile>>,
    /// Sprites to delete, by rarity then listing order.
    pub deletions: Vec<Deletion>,
    /// Prefixes claimed once every rarity has been selected.
    pub used_prefixes: UsedPrefixes,
}

impl CurationPlan {
    /// Selects the survivors among `sprites`, which must be in listing order.
    ///
    /// # Errors
    ///
    /// Returns `CurateError::RenameCollision` if renumbering a rarity would
    /// overwrite one of its own survivors before that survivor is renamed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprite_curator::config::CurationRules;
    /// use sprite_curator::plan::CurationPlan;
    /// use sprite_curator::rarity::Rarity;
    /// use sprite_curator::sprite_file::SpriteFile;
    ///
    /// let sprites: Vec<_> = ["13_BBTap_Rare.png", "5_BBTap_Rare.png", "9_BBTap_Common.png"]
    ///     .iter()
    ///     .filter_map(|name| SpriteFile::parse(name))
    ///     .collect();
    /// let rules = CurationRules::builtin().unwrap();
    ///
    /// let plan = CurationPlan::build(&sprites, &rules).unwrap();
    /// assert_eq!(plan.retained_count(Rarity::Rare), 2);
    /// assert_eq!(plan.retained_count(Rarity::Common), 1);
    /// assert!(plan.deletions.is_empty());
    /// ```
    pub fn build(sprites: &[SpriteFile], rules: &CurationRules) -> CurateResult<Self> {
        let groups = group_by_rarity(sprites);
        let empty = Vec::new();
        let group = |rarity: Rarity| groups.get(&rarity).unwrap_or(&empty);

        let mut retained = BTreeMap::new();
        let mut used = UsedPrefixes::default();

        for rarity in Rarity::SPECIAL {
            let (kept, claimed) = select_tier(group(rarity), rules.rule(rarity), used);
            used = claimed;
            retained.insert(rarity, kept);
        }

        let (kept, claimed) = select_common(group(Rarity::Common), rules.rule(Rarity::Common), used);
        used = claimed;
        retained.insert(Rarity::Common, kept);

        let deletions = Rarity::ALL
            .into_iter()
            .flat_map(|rarity| group(rarity).iter())
            .filter(|sprite| {
                !retained
                    .get(&sprite.rarity)
                    .is_some_and(|kept| kept.contains(sprite))
            })
            .map(|sprite| Deletion {
                sprite: sprite.clone(),
                reason: if used.contains(sprite.prefix) {
                    DeletionReason::PrefixConflict
                } else {
                    DeletionReason::Excess
                },
            })
            .collect();

        for kept in retained.values_mut() {
            kept.sort_by_key(|sprite| sprite.prefix);
        }

        let plan = Self {
            retained,
            deletions,
            used_prefixes: used,
        };
        plan.check_renames()?;
        Ok(plan)
    }

    /// Number of sprites of `rarity` that survive.
    pub fn retained_count(&self, rarity: Rarity) -> usize {
        self.retained.get(&rarity).map_or(0, Vec::len)
    }

    /// Renames to perform, in execution order.
    ///
    /// Survivors already carrying their target name are left out.
    pub fn renames(&self) -> Vec<Rename> {
        self.retained
            .iter()
            .flat_map(|(rarity, kept)| {
                kept.iter().enumerate().map(move |(index, sprite)| Rename {
                    rarity: *rarity,
                    from: sprite.name.clone(),
                    to: rarity.target_name(index + 1),
                })
            })
            .filter(|rename| rename.from != rename.to)
            .collect()
    }

    /// Rejects plans where a rename would land on a survivor that has not
    /// been renamed yet.
    fn check_renames(&self) -> CurateResult<()> {
        for (rarity, kept) in &self.retained {
            for (index, sprite) in kept.iter().enumerate() {
                let target = rarity.target_name(index + 1);
                if target == sprite.name {
                    continue;
                }
                if let Some(occupant) = kept[index + 1..].iter().find(|later| later.name == target) {
                    return Err(CurateError::RenameCollision {
                        rarity: *rarity,
                        from: sprite.name.clone(),
                        occupant: occupant.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Partitions sprites by rarity, keeping listing order inside each group.
fn group_by_rarity(sprites: &[SpriteFile]) -> BTreeMap<Rarity, Vec<SpriteFile>> {
    let mut groups: BTreeMap<Rarity, Vec<SpriteFile>> = BTreeMap::new();
    for sprite in sprites {
        groups.entry(sprite.rarity).or_default().push(sprite.clone());
    }
    groups
}

/// Keeps the preferred sprites present in `group`, then fills up to capacity
/// in listing order. Every kept prefix is claimed.
fn select_tier(
    group: &[SpriteFile],
    rule: &RarityRule,
    used: UsedPrefixes,
) -> (Vec<SpriteFile>, UsedPrefixes) {
    let (preferred, others): (Vec<&SpriteFile>, Vec<&SpriteFile>) =
        group.iter().partition(|sprite| rule.is_preferred(&sprite.name));

    let fill = rule.capacity.saturating_sub(preferred.len());
    let kept: Vec<SpriteFile> = preferred
        .into_iter()
        .chain(others.into_iter().take(fill))
        .cloned()
        .collect();

    let used = kept
        .iter()
        .fold(used, |used, sprite| used.claim(sprite.prefix));
    (kept, used)
}

/// Keeps Common sprites whose prefix is still free, in listing order, up to
/// capacity. Each kept prefix is claimed before the next candidate is checked.
fn select_common(
    group: &[SpriteFile],
    rule: &RarityRule,
    mut used: UsedPrefixes,
) -> (Vec<SpriteFile>, UsedPrefixes) {
    let mut kept = Vec::new();
    for sprite in group {
        if kept.len() >= rule.capacity {
            break;
        }
        if used.contains(sprite.prefix) {
            continue;
        }
        used = used.claim(sprite.prefix);
        kept.push(sprite.clone());
    }
    (kept, used)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprites(names: &[&str]) -> Vec<SpriteFile> {
        names
            .iter()
            .map(|name| SpriteFile::parse(name).expect("test names must classify"))
            .collect()
    }

    fn retained_names(plan: &CurationPlan, rarity: Rarity) -> Vec<&str> {
        plan.retained
            .get(&rarity)
            .map(|kept| kept.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default()
    }

    fn deleted(plan: &CurationPlan) -> Vec<(&str, DeletionReason)> {
        plan.deletions
            .iter()
            .map(|d| (d.sprite.name.as_str(), d.reason))
            .collect()
    }

    fn rules() -> CurationRules {
        CurationRules::builtin().unwrap()
    }

    #[test]
    fn test_preferred_rare_files_win_over_fillers() {
        let input = sprites(&[
            "13_BBTap_Rare.png",
            "14_BBTap_Rare.png",
            "23_BBTap_Rare.png",
            "4_BBTap_Rare.png",
            "5_BBTap_Rare.png",
        ]);

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(
            retained_names(&plan, Rarity::Rare),
            vec![
                "4_BBTap_Rare.png",
                "13_BBTap_Rare.png",
                "14_BBTap_Rare.png",
                "23_BBTap_Rare.png"
            ]
        );
        assert_eq!(
            deleted(&plan),
            vec![("5_BBTap_Rare.png", DeletionReason::Excess)]
        );
    }

    #[test]
    fn test_fillers_follow_listing_order() {
        // Listing order is lexicographic: "10" < "24" < "30" < "7".
        let input = sprites(&[
            "10_BBTap_Epic.png",
            "24_BBTap_Epic.png",
            "30_BBTap_Epic.png",
            "7_BBTap_Epic.png",
        ]);

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(
            retained_names(&plan, Rarity::Epic),
            vec!["10_BBTap_Epic.png", "24_BBTap_Epic.png"]
        );
        assert_eq!(
            deleted(&plan),
            vec![
                ("30_BBTap_Epic.png", DeletionReason::Excess),
                ("7_BBTap_Epic.png", DeletionReason::Excess),
            ]
        );
    }

    #[test]
    fn test_missing_preferred_files_are_filled() {
        let input = sprites(&["1_BBTap_Legendary.png", "2_BBTap_Legendary.png"]);

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(
            retained_names(&plan, Rarity::Legendary),
            vec!["1_BBTap_Legendary.png"]
        );
        assert_eq!(plan.deletions.len(), 1);
    }

    #[test]
    fn test_common_skips_claimed_prefixes() {
        let input = sprites(&[
            "15_BBTap_Common.png",
            "15_BBTap_Legendary.png",
            "16_BBTap_Common.png",
        ]);

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(
            retained_names(&plan, Rarity::Common),
            vec!["16_BBTap_Common.png"]
        );
        assert_eq!(
            deleted(&plan),
            vec![("15_BBTap_Common.png", DeletionReason::PrefixConflict)]
        );
    }

    #[test]
    fn test_common_claims_prefixes_as_it_goes() {
        let input = sprites(&["03_BBTap_Common.png", "3_BBTap_Common.png"]);

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(
            retained_names(&plan, Rarity::Common),
            vec!["03_BBTap_Common.png"]
        );
        assert_eq!(
            deleted(&plan),
            vec![("3_BBTap_Common.png", DeletionReason::PrefixConflict)]
        );
    }

    #[test]
    fn test_common_capacity() {
        let names: Vec<String> = (1..=25).map(|n| Rarity::Common.target_name(n)).collect();
        let mut input: Vec<SpriteFile> =
            names.iter().filter_map(|n| SpriteFile::parse(n)).collect();
        input.sort_by(|a, b| a.name.cmp(&b.name));

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(plan.retained_count(Rarity::Common), 20);
        assert_eq!(plan.deletions.len(), 5);
        assert!(
            plan.deletions
                .iter()
                .all(|d| d.reason == DeletionReason::Excess)
        );
    }

    #[test]
    fn test_excess_file_sharing_a_kept_prefix_is_a_conflict() {
        let input = sprites(&[
            "1_BBTap_Legendary.png",
            "2_BBTap_Common.png",
            "2_BBTap_Legendary.png",
        ]);

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(
            deleted(&plan),
            vec![("2_BBTap_Legendary.png", DeletionReason::PrefixConflict)]
        );
    }

    #[test]
    fn test_special_tiers_do_not_check_each_other() {
        let input = sprites(&["8_BBTap_Epic.png", "8_BBTap_Rare.png"]);

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(plan.retained_count(Rarity::Rare), 1);
        assert_eq!(plan.retained_count(Rarity::Epic), 1);
        assert!(plan.deletions.is_empty());
    }

    #[test]
    fn test_used_prefixes_accumulate_across_tiers() {
        let input = sprites(&[
            "1_BBTap_Common.png",
            "2_BBTap_Epic.png",
            "3_BBTap_Legendary.png",
            "4_BBTap_Rare.png",
        ]);

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(plan.used_prefixes.len(), 4);
        for prefix in 1..=4 {
            assert!(plan.used_prefixes.contains(prefix));
        }
    }

    #[test]
    fn test_renames_are_dense_and_skip_noops() {
        let input = sprites(&["1_BBTap_Epic.png", "9_BBTap_Epic.png", "40_BBTap_Rare.png"]);

        let plan = CurationPlan::build(&input, &rules()).unwrap();

        assert_eq!(
            plan.renames(),
            vec![
                Rename {
                    rarity: Rarity::Rare,
                    from: "40_BBTap_Rare.png".to_string(),
                    to: "1_BBTap_Rare.png".to_string(),
                },
                Rename {
                    rarity: Rarity::Epic,
                    from: "9_BBTap_Epic.png".to_string(),
                    to: "2_BBTap_Epic.png".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_rename_collision_is_rejected() {
        // Both carry prefix 1; renaming "01" to "1" would overwrite the other.
        let input = sprites(&["01_BBTap_Rare.png", "1_BBTap_Rare.png"]);

        let result = CurationPlan::build(&input, &rules());

        match result {
            Err(CurateError::RenameCollision {
                rarity,
                from,
                occupant,
            }) => {
                assert_eq!(rarity, Rarity::Rare);
                assert_eq!(from, "01_BBTap_Rare.png");
                assert_eq!(occupant, "1_BBTap_Rare.png");
            }
            other => panic!("expected a rename collision, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let plan = CurationPlan::build(&[], &rules()).unwrap();

        assert!(plan.deletions.is_empty());
        assert!(plan.renames().is_empty());
        assert!(plan.used_prefixes.is_empty());
        for rarity in Rarity::ALL {
            assert_eq!(plan.retained_count(rarity), 0);
        }
    }
}
