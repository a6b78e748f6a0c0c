//! Batch renaming of exported notes, whose names end in a space and a
//! 32-character id like `Meeting 9a1f0c2e4b6d8f0a1c3e5b7d9f1a3c5e.md`.

use std::{
    cmp::Reverse,
    collections::HashSet,
    path::{Path, PathBuf},
};

use log::info;
use walkdir::WalkDir;

use crate::FileError;

/// the length of the id appended to exported names
pub const ID_LEN: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

fn strip(name: &str) -> String {
    let mut words: Vec<&str> = name.split(' ').collect();
    if words.len() > 1 && words[words.len() - 1].chars().count() == ID_LEN {
        words.pop();
    }
    words.join(" ")
}

/// drop a trailing id from `name`. For files the id is looked for before the
/// extension, directory names are taken as a whole
pub fn strip_id(name: &str, is_dir: bool) -> String {
    if is_dir {
        return strip(name);
    }
    let p = Path::new(name);
    match (p.file_stem(), p.extension()) {
        (Some(stem), Some(ext)) => format!(
            "{}.{}",
            strip(&stem.to_string_lossy()),
            ext.to_string_lossy()
        ),
        _ => strip(name),
    }
}

/// `path` if nothing is there yet and `taken` does not contain it, otherwise
/// the first free `<stem>_<n><ext>` counting from 1
pub fn uniquify(path: &Path, taken: &HashSet<PathBuf>) -> PathBuf {
    let free = |p: &Path| !p.exists() && !taken.contains(p);
    if free(path) {
        return path.to_path_buf();
    }
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let mut n = 1;
    loop {
        let candidate = path.with_file_name(format!("{stem}_{n}{ext}"));
        if free(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

struct Renamer {
    dry_run: bool,
    taken: HashSet<PathBuf>,
    renames: Vec<Rename>,
}

impl Renamer {
    fn rename(&mut self, from: PathBuf, is_dir: bool) -> Result<(), FileError> {
        let name = from.file_name().unwrap_or_default().to_string_lossy();
        let new = strip_id(&name, is_dir);
        if new == name {
            return Ok(());
        }
        let to = uniquify(&from.with_file_name(new), &self.taken);
        info!("renaming {} to {}", from.display(), to.display());
        if !self.dry_run {
            std::fs::rename(&from, &to)
                .map_err(|e| FileError::io(&from, e))?;
        }
        self.taken.insert(to.clone());
        self.renames.push(Rename { from, to });
        Ok(())
    }
}

/// strip the trailing ids from every file and directory below `root`,
/// without renaming `root` itself. Symbolic links are renamed like files and
/// never followed. With `dry_run`, nothing is renamed but the returned list
/// is the same
pub fn rename_tree(
    root: impl AsRef<Path>,
    dry_run: bool,
) -> Result<Vec<Rename>, FileError> {
    let root = root.as_ref();
    let mut entries = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            FileError::io(path, e.into())
        })?;
        let is_dir = entry.file_type().is_dir();
        entries.push((entry.depth(), is_dir, entry.into_path()));
    }
    // deepest first, so no path is invalidated before it is renamed, and
    // files before directories on the same level
    entries.sort_by_key(|(depth, is_dir, _)| (Reverse(*depth), *is_dir));
    let mut r = Renamer {
        dry_run,
        taken: HashSet::new(),
        renames: Vec::new(),
    };
    for (_, is_dir, path) in entries {
        r.rename(path, is_dir)?;
    }
    Ok(r.renames)
}
