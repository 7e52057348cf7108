/// Applies a curation plan to a sprite directory.
///
/// The curator scans the directory once, builds a [`CurationPlan`], deletes
/// every rejected sprite and renames the survivors to their dense positions.
/// The first failing filesystem operation aborts the run; nothing already
/// deleted or renamed is restored.
use crate::config::{ConfigError, CurationRules};
use crate::output::OutputFormatter;
use crate::plan::{CurationPlan, Deletion, Rename};
use crate::rarity::Rarity;
use crate::sprite_file::scan_directory;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during a curation run.
#[derive(Debug)]
pub enum CurateError {
    /// The directory could not be listed.
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A rejected sprite could not be deleted.
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A retained sprite could not be renamed.
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// Renumbering would overwrite a survivor that has not been renamed yet.
    RenameCollision {
        rarity: Rarity,
        from: String,
        occupant: String,
    },
    /// The rule table could not be loaded.
    Rules(ConfigError),
}

impl std::fmt::Display for CurateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryRead { path, source } => {
                write!(f, "Error reading directory {}: {}", path.display(), source)
            }
            Self::DeleteFailed { path, source } => {
                write!(f, "Failed to delete {}: {}", path.display(), source)
            }
            Self::RenameFailed { from, to, source } => {
                write!(
                    f,
                    "Failed to rename {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
            Self::RenameCollision {
                rarity,
                from,
                occupant,
            } => {
                write!(
                    f,
                    "Cannot rename {}: its target name is taken by {}, another {} file still to be renumbered; nothing was changed",
                    from, occupant, rarity
                )
            }
            Self::Rules(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CurateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryRead { source, .. }
            | Self::DeleteFailed { source, .. }
            | Self::RenameFailed { source, .. } => Some(source),
            Self::Rules(e) => Some(e),
            Self::RenameCollision { .. } => None,
        }
    }
}

impl From<ConfigError> for CurateError {
    fn from(e: ConfigError) -> Self {
        Self::Rules(e)
    }
}

/// Result type for curation operations.
pub type CurateResult<T> = Result<T, CurateError>;

/// What a completed run did.
#[derive(Debug, Clone, Default)]
pub struct CurationReport {
    /// Deleted sprites with the reason each was rejected.
    pub deleted: Vec<Deletion>,
    /// Renames performed, in order.
    pub renamed: Vec<Rename>,
    /// Number of sprites left per rarity.
    pub retained: BTreeMap<Rarity, usize>,
    /// Regular files that were not sprites and were left alone.
    pub ignored: Vec<String>,
}

impl CurationReport {
    /// Total number of sprites left in the directory.
    pub fn total_retained(&self) -> usize {
        self.retained.values().sum()
    }
}

/// Curates one sprite directory.
#[derive(Debug, Clone)]
pub struct Curator {
    directory: PathBuf,
}

impl Curator {
    /// Creates a curator for `directory`. Nothing is read until [`Curator::run`].
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The directory this curator works on.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Scans the directory and plans the run without changing anything.
    pub fn plan(&self, rules: &CurationRules) -> CurateResult<(CurationPlan, Vec<String>)> {
        let scan = scan_directory(&self.directory)?;
        let plan = CurationPlan::build(&scan.sprites, rules)?;
        Ok((plan, scan.ignored))
    }

    /// Deletes rejected sprites and renumbers the survivors.
    ///
    /// Every delete and rename is printed as it happens.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed, if the plan would
    /// overwrite a survivor, or on the first delete or rename that fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sprite_curator::config::CurationRules;
    /// use sprite_curator::curator::Curator;
    ///
    /// let rules = CurationRules::builtin().unwrap();
    /// let report = Curator::new("/path/to/sprites").run(&rules).unwrap();
    /// println!("{} sprites left", report.total_retained());
    /// ```
    pub fn run(&self, rules: &CurationRules) -> CurateResult<CurationReport> {
        let (plan, ignored) = self.plan(rules)?;

        for deletion in &plan.deletions {
            self.delete(deletion)?;
        }

        let renames = plan.renames();
        for rename in &renames {
            self.rename(rename)?;
        }

        Ok(CurationReport {
            deleted: plan.deletions.clone(),
            renamed: renames,
            retained: Rarity::ALL
                .into_iter()
                .map(|rarity| (rarity, plan.retained_count(rarity)))
                .collect(),
            ignored,
        })
    }

    fn delete(&self, deletion: &Deletion) -> CurateResult<()> {
        let path = self.directory.join(&deletion.sprite.name);
        fs::remove_file(&path).map_err(|source| CurateError::DeleteFailed {
            path: path.clone(),
            source,
        })?;
        OutputFormatter::deleted(&deletion.sprite.name, deletion.reason);
        Ok(())
    }

    fn rename(&self, rename: &Rename) -> CurateResult<()> {
        let from = self.directory.join(&rename.from);
        let to = self.directory.join(&rename.to);
        fs::rename(&from, &to).map_err(|source| CurateError::RenameFailed {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
        OutputFormatter::renamed(&rename.from, &rename.to);
        Ok(())
    }
}
