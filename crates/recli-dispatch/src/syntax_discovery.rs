//! Syntax-discovery sub-mode (spec §4.9 "Syntax discovery sub-mode",
//! §6.1: "a helper invoked with `--config syntax` must print its accepted
//! grammar lines to stdout, one alternative per line").
//!
//! Grounded on `examples/original_source/dir.c`'s `rbuf_t`/
//! `recli_fprintf_syntax`/`recli_exec_syntax`: run the helper, capture its
//! stdout line-by-line, and prefix each line with the helper's own path
//! (relative to `bin/`, separators turned into spaces) so that a helper
//! at `bin/show/interface` contributes lines under `show interface ...`
//! without needing to know its own mount point. This module stops short
//! of parsing the resulting text into a `Node` - that needs
//! `recli-parser`'s grammar-text parser, which would make this crate
//! depend downward on a crate layered above it (see `DESIGN.md`), so the
//! caller (`recli-cli`'s bootstrap) does the parsing and merging.

use std::path::{Path, PathBuf};

use crate::error::DispatchError;
use crate::spawn::spawn_and_multiplex;

/// One helper's contribution to the root grammar: ready-to-parse lines of
/// grammar text, and the helper's raw stderr for the caller to forward
/// (spec §4.9: "Errors on the child's stderr are forwarded").
#[derive(Debug, Clone, Default)]
pub struct DiscoveredSyntax {
    pub lines: Vec<String>,
    pub stderr: Vec<u8>,
}

/// Run `bin_root/relative` with `--config syntax` and collect its output.
///
/// Each output line is prefixed with `relative`'s path components joined
/// by spaces (spec: "replacing the executable's path separators with
/// spaces and prepending that prefix"). A `DEFAULT ` prefix already
/// present in a line is stripped before the helper's own prefix is
/// applied, so a catch-all helper's lines read as if written by its
/// parent directory's own command.
pub fn discover_syntax(bin_root: &Path, relative: &Path) -> Result<DiscoveredSyntax, DispatchError> {
    let executable: PathBuf = bin_root.join(relative);

    let prefix: String = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = vec!["--config".to_string(), "syntax".to_string()];
    spawn_and_multiplex(&executable, &argv, &[], &mut stdout, &mut stderr)?;

    let text = String::from_utf8_lossy(&stdout);
    let mut lines = Vec::new();
    for raw in text.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let body = trimmed.strip_prefix("DEFAULT ").unwrap_or(trimmed);
        lines.push(format!("{prefix} {body}"));
    }

    Ok(DiscoveredSyntax { lines, stderr })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn install_helper(root: &Path, relative: &str, stdout: &str, stderr: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("#!/bin/sh\nprintf '{stdout}'\nprintf '{stderr}' 1>&2\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }

    #[test]
    fn prefixes_each_line_with_the_helpers_path() {
        let root = tempdir().unwrap();
        install_helper(root.path(), "show/interface", "ethernet\\nwifi\\n", "");

        let discovered = discover_syntax(root.path(), Path::new("show/interface")).unwrap();
        assert_eq!(discovered.lines, vec!["show interface ethernet", "show interface wifi"]);
    }

    #[test]
    fn strips_a_default_prefix_from_a_line() {
        let root = tempdir().unwrap();
        install_helper(root.path(), "show/DEFAULT", "DEFAULT WORD\\n", "");

        let discovered = discover_syntax(root.path(), Path::new("show/DEFAULT")).unwrap();
        assert_eq!(discovered.lines, vec!["show DEFAULT WORD"]);
    }

    #[test]
    fn forwards_stderr_for_the_caller_to_print() {
        let root = tempdir().unwrap();
        install_helper(root.path(), "broken", "", "bad syntax file");

        let discovered = discover_syntax(root.path(), Path::new("broken")).unwrap();
        assert_eq!(String::from_utf8(discovered.stderr).unwrap(), "bad syntax file");
    }
}
