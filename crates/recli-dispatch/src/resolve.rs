//! Path resolution under a `bin/` tree (spec §4.9 step 1, §6.1).
//!
//! Grounded on `examples/original_source/dir.c::recli_exec`'s directory
//! descent loop: consume argv words one at a time, each extending the
//! path; stop descending at the first word that is not itself a
//! directory. Reworked from the original's fixed `buffer`/`argv` pointer
//! juggling into an owned `PathBuf` and `Vec<String>`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DispatchError;

/// Which fallback name to try when a path component doesn't exist: the
/// caller selects this per spec §4.9 ("`/DEFAULT` for syntax discovery,
/// `/run` for execution").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Discovery,
    Execution,
}

impl Mode {
    fn fallback_name(self) -> &'static str {
        match self {
            Mode::Discovery => "DEFAULT",
            Mode::Execution => "run",
        }
    }
}

/// The resolved executable and the argv it should be run with.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub executable: PathBuf,
    pub argv: Vec<String>,
}

/// Resolve `argv` against `rundir`'s directory tree.
///
/// At each step the current path is extended by the next argv word. If
/// that candidate is a directory, descent continues; if it is a file, it
/// is the executable and the remaining (unconsumed) words become its
/// argv. If it doesn't exist at all, the *current* directory's fallback
/// name (`DEFAULT` or `run`) is tried instead - and if that exists, it
/// becomes the executable and receives the **entire original argv**
/// (matching the original's `index = 0; goto run;`, since a fallback
/// handler is a generic catch-all that needs the full command line, not
/// just the suffix past where descent stopped).
pub fn resolve(rundir: &Path, argv: &[String], mode: Mode) -> Result<Resolved, DispatchError> {
    if argv.is_empty() {
        return Err(DispatchError::Resolve { argv: vec![], reason: "empty command".to_string() });
    }

    let root_meta = fs::metadata(rundir).map_err(|e| DispatchError::Resolve {
        argv: argv.to_vec(),
        reason: format!("reading rundir '{}': {e}", rundir.display()),
    })?;
    if !root_meta.is_dir() {
        return Err(DispatchError::Resolve {
            argv: argv.to_vec(),
            reason: format!("'{}' is not a directory", rundir.display()),
        });
    }

    let mut dir = rundir.to_path_buf();
    let mut index = 0;

    loop {
        if index >= argv.len() {
            return Err(DispatchError::Resolve {
                argv: argv.to_vec(),
                reason: format!("incompletely defined '{}'", dir.display()),
            });
        }

        let candidate = dir.join(&argv[index]);
        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_dir() => {
                dir = candidate;
                index += 1;
            }
            Ok(_) => {
                return Ok(Resolved { executable: candidate, argv: argv[index + 1..].to_vec() });
            }
            Err(_) => {
                let fallback = dir.join(mode.fallback_name());
                return match fs::metadata(&fallback) {
                    Ok(meta) if !meta.is_dir() => {
                        Ok(Resolved { executable: fallback, argv: argv.to_vec() })
                    }
                    _ => Err(DispatchError::Resolve {
                        argv: argv.to_vec(),
                        reason: format!("no such command: {}", argv.join(" ")),
                    }),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn touch_executable(path: &Path) {
        fs::write(path, b"#!/bin/sh\necho hi\n").unwrap();
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }

    #[test]
    fn resolves_nested_executable() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("show")).unwrap();
        touch_executable(&root.path().join("show/interface"));

        let argv = vec!["show".to_string(), "interface".to_string(), "eth0".to_string()];
        let resolved = resolve(root.path(), &argv, Mode::Execution).unwrap();
        assert_eq!(resolved.executable, root.path().join("show/interface"));
        assert_eq!(resolved.argv, vec!["eth0".to_string()]);
    }

    #[test]
    fn falls_back_to_run_with_full_argv() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("configure")).unwrap();
        touch_executable(&root.path().join("configure/run"));

        let argv = vec!["configure".to_string(), "terminal".to_string()];
        let resolved = resolve(root.path(), &argv, Mode::Execution).unwrap();
        assert_eq!(resolved.executable, root.path().join("configure/run"));
        assert_eq!(resolved.argv, argv);
    }

    #[test]
    fn falls_back_to_default_in_discovery_mode() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("show")).unwrap();
        touch_executable(&root.path().join("show/DEFAULT"));

        let argv = vec!["show".to_string(), "anything".to_string()];
        let resolved = resolve(root.path(), &argv, Mode::Discovery).unwrap();
        assert_eq!(resolved.executable, root.path().join("show/DEFAULT"));
        assert_eq!(resolved.argv, argv);
    }

    #[test]
    fn unknown_command_fails() {
        let root = tempdir().unwrap();
        let argv = vec!["bogus".to_string()];
        assert!(resolve(root.path(), &argv, Mode::Execution).is_err());
    }

    #[test]
    fn exhausting_argv_inside_a_directory_is_incomplete() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("show")).unwrap();
        let argv = vec!["show".to_string()];
        let err = resolve(root.path(), &argv, Mode::Execution).unwrap_err();
        assert!(matches!(err, DispatchError::Resolve { reason, .. } if reason.contains("incompletely defined")));
    }
}
