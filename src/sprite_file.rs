/// Sprite file classification and directory scanning.
///
/// A sprite file is named `<digits>_BBTap_<Rarity>.png`. Everything else in the
/// directory is reported as ignored and never touched.
use crate::curator::{CurateError, CurateResult};
use crate::rarity::Rarity;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static SPRITE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)_BBTap_([^.]+)\.png$").expect("sprite name pattern is valid")
});

/// A file whose name matched the sprite naming pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteFile {
    /// Decimal value of the leading digits. Not unique across the directory.
    pub prefix: u64,
    /// Rarity parsed from the label.
    pub rarity: Rarity,
    /// The file name as found on disk.
    pub name: String,
}

impl SpriteFile {
    /// Classifies a file name.
    ///
    /// Returns `None` when the name does not match the pattern, when the label
    /// is not a known rarity, or when the prefix does not fit in a `u64`.
    ///
    /// ```
    /// use sprite_curator::rarity::Rarity;
    /// use sprite_curator::sprite_file::SpriteFile;
    ///
    /// let sprite = SpriteFile::parse("013_BBTap_Epic.png").unwrap();
    /// assert_eq!(sprite.prefix, 13);
    /// assert_eq!(sprite.rarity, Rarity::Epic);
    ///
    /// assert!(SpriteFile::parse("13_BBTap_Mythic.png").is_none());
    /// assert!(SpriteFile::parse("notes.txt").is_none());
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let captures = SPRITE_NAME.captures(name)?;
        let prefix = captures[1].parse::<u64>().ok()?;
        let rarity = Rarity::from_label(&captures[2])?;

        Some(Self {
            prefix,
            rarity,
            name: name.to_string(),
        })
    }
}

/// Result of reading a directory once.
#[derive(Debug, Clone, Default)]
pub struct DirectoryScan {
    /// Sprite files in listing order.
    pub sprites: Vec<SpriteFile>,
    /// Names of regular files that did not classify as sprites.
    pub ignored: Vec<String>,
}

/// Lists the regular files directly inside `dir_path` and classifies them.
///
/// Listing order is the byte-wise order of the file names, so selection is
/// reproducible across platforms. Sub-directories and names that are not valid
/// UTF-8 are skipped.
pub fn scan_directory(dir_path: &Path) -> CurateResult<DirectoryScan> {
    let read_error = |source: std::io::Error| CurateError::DirectoryRead {
        path: dir_path.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        if !entry.file_type().map_err(read_error)?.is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();

    let mut scan = DirectoryScan::default();
    for name in names {
        match SpriteFile::parse(&name) {
            Some(sprite) => scan.sprites.push(sprite),
            None => scan.ignored.push(name),
        }
    }

    Ok(scan)
}
