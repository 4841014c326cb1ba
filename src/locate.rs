use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CFinderError, Result};

/// Marker CFinder puts in the name of every per-clique-size directory.
pub const K_MARKER: &str = "k=";

/// One `k=<N>` directory of an output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KDir {
    pub k: u32,
    pub path: PathBuf,
}

/// Lists the immediate subdirectories of `root` whose name contains `k=`,
/// sorted by `k`.
pub fn find_k_dirs(root: &Path) -> Result<Vec<KDir>> {
    if !root.is_dir() {
        return Err(CFinderError::NotFound {
            path: root.to_path_buf(),
        });
    }

    let entries = fs::read_dir(root).map_err(|e| CFinderError::io(root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CFinderError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.contains(K_MARKER) {
            continue;
        }
        let k = parse_k(&name).ok_or_else(|| {
            CFinderError::format(&path, format!("directory name {name:?} has no positive k"))
        })?;
        dirs.push(KDir { k, path });
    }
    dirs.sort_by_key(|d| d.k);
    Ok(dirs)
}

/// Parses the clique size from a name such as `k=3`.
pub fn parse_k(name: &str) -> Option<u32> {
    let (_, rest) = name.split_once(K_MARKER)?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok().filter(|k| *k > 0)
}
