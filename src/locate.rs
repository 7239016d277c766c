// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Terminfo search path resolution

use std::{
    env,
    ffi::OsStr,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

/// Compiled-in locations, searched last
const DEFAULT_DIRS: &[&str] = &[
    "/etc/terminfo",
    "/lib/terminfo",
    "/usr/share/terminfo",
    "/usr/lib/terminfo",
    "/boot/system/data/terminfo", // haiku
];

/// Errors reported when looking for a terminfo database file
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Empty name, or a name containing a path separator
    #[error("Invalid terminal name {0:?}")]
    InvalidTerminalName(String),
    /// No search directory has an entry for the terminal
    #[error("Terminfo entry for {0} not found")]
    FileNotFound(String),
}

/// Directories searched for terminfo files, in order
///
/// These are `$TERMINFO`, `$HOME/.terminfo`, the elements of
/// `$TERMINFO_DIRS` and the compiled-in defaults. An empty element in
/// `TERMINFO_DIRS` stands for the defaults, which are then not repeated at
/// the end. The directories are not checked for existence.
#[must_use]
pub fn search_directories() -> Vec<PathBuf> {
    let mut defaults = Some(DEFAULT_DIRS.iter().map(PathBuf::from));

    let mut dirs: Vec<PathBuf> = env::var_os("TERMINFO")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .into_iter()
        .collect();
    dirs.extend(env::home_dir().map(|home| home.join(".terminfo")));

    if let Some(list) = env::var_os("TERMINFO_DIRS") {
        for dir in env::split_paths(&list) {
            if dir.as_os_str().is_empty() {
                dirs.extend(defaults.take().into_iter().flatten());
            } else {
                dirs.push(dir);
            }
        }
    }

    dirs.extend(defaults.into_iter().flatten());
    dirs
}

/// Find the terminfo file for `term_name` in the given directories
///
/// Each directory is probed with the standard layout (`x/xterm`) and then
/// with the hexadecimal layout used on case-insensitive filesystems
/// (`78/xterm`).
pub fn locate_in<I, P>(dirs: I, term_name: &OsStr) -> Result<PathBuf, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let bytes = term_name.as_encoded_bytes();
    let first = match bytes.first() {
        Some(&first) if !bytes.iter().any(|c| std::path::is_separator(char::from(*c))) => first,
        _ => {
            return Err(Error::InvalidTerminalName(
                term_name.to_string_lossy().into_owned(),
            ));
        }
    };
    let leaves = [char::from(first).to_string(), format!("{first:02x}")];

    for dir in dirs {
        for leaf in &leaves {
            let path = dir.as_ref().join(leaf).join(term_name);
            trace!(path = %path.display(), "probing");
            if path.is_file() {
                debug!(path = %path.display(), "found terminfo entry");
                return Ok(path);
            }
        }
    }

    Err(Error::FileNotFound(term_name.to_string_lossy().into_owned()))
}

/// Find the terminfo file for `term_name` in [`search_directories`]
pub fn locate(term_name: impl AsRef<OsStr>) -> Result<PathBuf, Error> {
    locate_in(search_directories(), term_name.as_ref())
}

#[cfg(test)]
mod test {
    use std::fs::{File, create_dir_all};

    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use super::*;

    const TERM_NAME: &str = "termproto-test-1";

    /// Temporary directory with an empty entry under `leaf`
    fn database(leaf: &str) -> (TempDir, PathBuf) {
        let temp_dir = tempdir().unwrap();
        let leaf_dir = temp_dir.path().join(leaf);
        create_dir_all(&leaf_dir).unwrap();
        let file = leaf_dir.join(TERM_NAME);
        File::create(&file).unwrap();
        (temp_dir, file)
    }

    fn paths(dirs: &[&str]) -> Vec<PathBuf> {
        dirs.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn invalid_names() {
        assert_eq!(
            locate(""),
            Err(Error::InvalidTerminalName(String::new()))
        );
        assert_eq!(
            locate_in(["/"], OsStr::new("x/term")),
            Err(Error::InvalidTerminalName("x/term".into()))
        );
    }

    #[test]
    fn missing_entry() {
        let (temp_dir, _) = database("t");
        assert_eq!(
            locate_in([temp_dir.path()], OsStr::new("termproto-missing")),
            Err(Error::FileNotFound("termproto-missing".into()))
        );
    }

    #[test]
    fn standard_layout() {
        let (temp_dir, file) = database("t");
        assert_eq!(locate_in([temp_dir.path()], OsStr::new(TERM_NAME)), Ok(file));
    }

    #[test]
    fn hex_layout() {
        let (temp_dir, file) = database("74");
        assert_eq!(locate_in([temp_dir.path()], OsStr::new(TERM_NAME)), Ok(file));
    }

    #[test]
    fn first_directory_wins() {
        let (first, file) = database("t");
        let (second, _) = database("t");
        assert_eq!(
            locate_in([first.path(), second.path()], OsStr::new(TERM_NAME)),
            Ok(file)
        );
    }

    #[test]
    fn terminfo_dirs_variable() {
        let (temp_dir, file) = database("t");
        let terminfo_dirs = format!("/nonexistent:{}", temp_dir.path().display());
        temp_env::with_vars(
            [("TERMINFO_DIRS", Some(terminfo_dirs)), ("TERMINFO", None)],
            || assert_eq!(locate(TERM_NAME), Ok(file)),
        );
    }

    #[test]
    fn terminfo_variable() {
        let (temp_dir, file) = database("74");
        temp_env::with_vars(
            [("TERMINFO_DIRS", None), ("TERMINFO", Some(temp_dir.path()))],
            || assert_eq!(locate(TERM_NAME), Ok(file)),
        );
    }

    #[test]
    fn home_directory() {
        let (temp_dir, file) = database(".terminfo/t");
        temp_env::with_vars(
            [
                ("TERMINFO_DIRS", None),
                ("TERMINFO", None),
                ("HOME", Some(temp_dir.path())),
            ],
            || assert_eq!(locate(TERM_NAME), Ok(file)),
        );
    }

    #[test]
    fn search_order() {
        temp_env::with_vars(
            [
                ("TERMINFO", Some("/opt/terminfo")),
                ("HOME", Some("/home/tester")),
                ("TERMINFO_DIRS", Some("/site/a:/site/b")),
            ],
            || {
                assert_eq!(
                    search_directories(),
                    paths(&[
                        "/opt/terminfo",
                        "/home/tester/.terminfo",
                        "/site/a",
                        "/site/b",
                        "/etc/terminfo",
                        "/lib/terminfo",
                        "/usr/share/terminfo",
                        "/usr/lib/terminfo",
                        "/boot/system/data/terminfo",
                    ])
                );
            },
        );
    }

    #[test]
    fn empty_element_inserts_defaults() {
        temp_env::with_vars(
            [
                ("TERMINFO", Some("")),
                ("HOME", Some("/home/tester")),
                ("TERMINFO_DIRS", Some("/site/a::/site/b")),
            ],
            || {
                assert_eq!(
                    search_directories(),
                    paths(&[
                        "/home/tester/.terminfo",
                        "/site/a",
                        "/etc/terminfo",
                        "/lib/terminfo",
                        "/usr/share/terminfo",
                        "/usr/lib/terminfo",
                        "/boot/system/data/terminfo",
                        "/site/b",
                    ])
                );
            },
        );
    }
}
