use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Resolve a program name the way a typical shell would.
///
/// - Absolute path: returned if it exists.
/// - `./foo`, or any relative path with several components (e.g. `bin/sh`):
///   resolved against `current_dir` and returned if it exists.
/// - Single component: each directory in `search_paths` (`PATH` syntax) is
///   tried in order and the first existing match is returned.
/// - Empty path: `None`.
pub(crate) fn find_program(search_paths: &OsStr, current_dir: &Path, program: &Path) -> Option<PathBuf> {
    if program.is_absolute() {
        return existing(program.to_path_buf());
    }

    let mut components = program.components();
    match (components.next(), components.next()) {
        (None, _) => None,
        (Some(single), None) => {
            std::env::split_paths(search_paths).find_map(|dir| existing(dir.join(single)))
        }
        _ => existing(current_dir.join(program)),
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() { Some(path) } else { None }
}
