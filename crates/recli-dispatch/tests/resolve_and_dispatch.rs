//! End-to-end resolve -> spawn flow over a real `bin/` tree (spec §4.9).

use std::fs;
use std::os::unix::fs::PermissionsExt;

use recli_dispatch::{resolve, spawn_and_multiplex, Mode};
use tempfile::tempdir;

fn install(root: &std::path::Path, relative: &str, body: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
}

#[test]
fn resolves_then_dispatches_a_nested_command() {
    let root = tempdir().unwrap();
    install(root.path(), "show/interface", "echo \"up: $1\"");

    let argv = vec!["show".to_string(), "interface".to_string(), "eth0".to_string()];
    let resolved = resolve(root.path(), &argv, Mode::Execution).unwrap();

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let outcome = spawn_and_multiplex(&resolved.executable, &resolved.argv, &[], &mut stdout, &mut stderr).unwrap();

    assert_eq!(outcome.0, 0);
    assert_eq!(String::from_utf8(stdout).unwrap(), "up: eth0\n");
}

#[test]
fn envp_replaces_the_child_environment() {
    let root = tempdir().unwrap();
    install(root.path(), "whoami", "echo \"$RECLI_DIR\"");

    let resolved = resolve(root.path(), &["whoami".to_string()], Mode::Execution).unwrap();
    let envp = vec![("RECLI_DIR".to_string(), "/etc/recli/demo".to_string())];

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    spawn_and_multiplex(&resolved.executable, &resolved.argv, &envp, &mut stdout, &mut stderr).unwrap();
    assert_eq!(String::from_utf8(stdout).unwrap(), "/etc/recli/demo\n");
}
