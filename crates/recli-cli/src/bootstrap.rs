//! Configuration bootstrap (spec §4.10, §6.1). Grounded on
//! `examples/original_source/dir.c::recli_bootstrap` and
//! `recli.c::main()`'s config-dir fallback logic, split per-stage so
//! each failure can be attributed (`ConfigError`) for logging, matching
//! SPEC_FULL.md §4.10's elaboration of the original's single monolithic
//! function.

use std::fs;
use std::io::Write as _;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};

use recli_core::grammar::{merge_all, Node};
use recli_core::permission::Rule;
use recli_core::RecliConfig;
use recli_dispatch::discover_syntax;
use recli_parser::datatypes::DatatypeRegistry;
use recli_parser::{grammar_text, help};

use crate::cli::Cli;
use crate::error::ConfigError;

/// Default configuration root when `-d` is not given (spec §6.4).
pub const DEFAULT_CONFIG_ROOT: &str = "/etc/recli";

/// `{DEFAULT_CONFIG_ROOT}/{progname}` unless `-d` overrides it.
pub fn config_dir(cli: &Cli, progname: &str) -> PathBuf {
    cli.dir.clone().unwrap_or_else(|| Path::new(DEFAULT_CONFIG_ROOT).join(progname))
}

/// Everything a session needs to start running, assembled by [`bootstrap`].
pub struct Bootstrap {
    pub config: RecliConfig,
    pub permissions: Vec<Rule>,
    pub long_help: Option<Node>,
    pub short_help: Option<Node>,
    pub datatypes: DatatypeRegistry,
}

pub fn bootstrap(cli: &Cli, dir: PathBuf) -> Result<Bootstrap, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::MissingDirectory(dir));
    }

    let datatypes = DatatypeRegistry;
    let is_datatype = |name: &str| datatypes.is_known(name);

    let prompt = cli.prompt.clone().unwrap_or_else(|| "recli> ".to_string());
    let mut config = RecliConfig::new(dir.clone(), prompt);

    load_env(&dir, &mut config)?;

    let syntax = load_grammar(cli, &dir, &is_datatype, &mut config)?;
    config.syntax = Some(syntax);

    let (long_help, short_help) = load_help(cli, &dir, &is_datatype)?;
    config.long_help = long_help.clone();
    config.short_help = short_help.clone();

    if let Some(banner) = read_banner(&dir) {
        print!("{banner}");
        let _ = std::io::stdout().flush();
        config.banner = Some(banner);
    }

    let permissions = load_permissions(cli, &dir)?;

    Ok(Bootstrap { config, permissions, long_help, short_help, datatypes })
}

/// Spec §4.10 step 1: `{dir}/ENV`, one `KEY=VALUE` per line, capped at
/// 127 entries including the appended `RECLI_DIR`.
fn load_env(dir: &Path, config: &mut RecliConfig) -> Result<(), ConfigError> {
    let path = dir.join("ENV");
    if let Ok(text) = fs::read_to_string(&path) {
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            if line.len() > 8191 {
                return Err(ConfigError::Io {
                    stage: "ENV",
                    source: std::io::Error::other(format!("line too long in {}", path.display())),
                });
            }
            if let Some((key, value)) = line.split_once('=') {
                config.push_env(key.to_string(), value.to_string());
            }
        }
    }
    config.push_env("RECLI_DIR".to_string(), dir.display().to_string());
    Ok(())
}

/// Spec §4.10 step 3: `-s FILE` overrides for testing; otherwise the
/// cache-file/bin-tree-walk choice keyed on inode identity.
fn load_grammar(
    cli: &Cli,
    dir: &Path,
    is_datatype: &dyn Fn(&str) -> bool,
    config: &mut RecliConfig,
) -> Result<Node, ConfigError> {
    if let Some(path) = &cli.syntax_file {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io { stage: "reading -s syntax file", source: e })?;
        return grammar_text::parse_file(&text, is_datatype)
            .map_err(|e| ConfigError::Parse { stage: "parsing -s syntax file", source: e });
    }

    let cache_path = dir.join("cache/syntax.txt");
    if let Ok(meta) = fs::metadata(&cache_path) {
        let text = fs::read_to_string(&cache_path)
            .map_err(|e| ConfigError::Io { stage: "reading cache/syntax.txt", source: e })?;
        let node = grammar_text::parse_file(&text, is_datatype)
            .map_err(|e| ConfigError::Parse { stage: "parsing cache/syntax.txt", source: e })?;
        config.syntax_inode = Some(meta.ino());
        return Ok(node);
    }

    let bin_root = dir.join("bin");
    let mut lines = Vec::new();
    if bin_root.is_dir() {
        walk_bin(&bin_root, Path::new(""), &mut lines)?;
    }

    let mut nodes = Vec::new();
    for line in &lines {
        if let Some(node) = grammar_text::parse_line(line, is_datatype)
            .map_err(|e| ConfigError::Parse { stage: "parsing discovered syntax", source: e })?
        {
            nodes.push(node);
        }
    }
    merge_all(nodes).map_err(|e| ConfigError::Merge { stage: "merging discovered syntax", source: e })
}

/// Re-check `{dir}/cache/syntax.txt` against the remembered inode and
/// reparse on a mismatch (spec §4.10's "atomic cache update convention" -
/// control flow note: "dispatch -> re-load grammar (in case the child
/// produced a new syntax)"). Returns whether the grammar was reloaded.
pub fn reload_grammar_if_stale(
    dir: &Path,
    is_datatype: &dyn Fn(&str) -> bool,
    config: &mut RecliConfig,
) -> Result<bool, ConfigError> {
    let cache_path = dir.join("cache/syntax.txt");
    let Ok(meta) = fs::metadata(&cache_path) else {
        return Ok(false);
    };
    if config.syntax_inode == Some(meta.ino()) {
        return Ok(false);
    }
    let text = fs::read_to_string(&cache_path)
        .map_err(|e| ConfigError::Io { stage: "reloading cache/syntax.txt", source: e })?;
    let node = grammar_text::parse_file(&text, is_datatype)
        .map_err(|e| ConfigError::Parse { stage: "reparsing cache/syntax.txt", source: e })?;
    config.syntax = Some(node);
    config.syntax_inode = Some(meta.ino());
    Ok(true)
}

/// Walk `bin_root/relative` depth-first, skipping dotfiles and names
/// containing `~` (spec §4.10 step 3), running each executable regular
/// file in syntax-discovery mode and accumulating its lines.
fn walk_bin(bin_root: &Path, relative: &Path, lines: &mut Vec<String>) -> Result<(), ConfigError> {
    let dir = bin_root.join(relative);
    let mut entries: Vec<_> = fs::read_dir(&dir)
        .map_err(|e| ConfigError::Io { stage: "reading bin/", source: e })?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name();
        let name_str = name.to_string_lossy();
        if name_str.starts_with('.') || name_str.contains('~') {
            continue;
        }

        let relative_path = relative.join(&name);
        let meta = entry
            .metadata()
            .map_err(|e| ConfigError::Io { stage: "stat bin/ entry", source: e })?;

        if meta.is_dir() {
            walk_bin(bin_root, &relative_path, lines)?;
        } else if meta.is_file() && meta.permissions().mode() & 0o111 != 0 {
            let discovered = discover_syntax(bin_root, &relative_path)
                .map_err(|e| ConfigError::Dispatch { stage: "syntax discovery", source: e })?;
            if !discovered.stderr.is_empty() {
                let _ = std::io::stderr().write_all(&discovered.stderr);
            }
            lines.extend(discovered.lines);
        }
    }
    Ok(())
}

/// Spec §4.10 step 4: `-H FILE` override, else `{dir}/help.md` if present.
fn load_help(
    cli: &Cli,
    dir: &Path,
    is_datatype: &dyn Fn(&str) -> bool,
) -> Result<(Option<Node>, Option<Node>), ConfigError> {
    let path = cli.help_file.clone().unwrap_or_else(|| dir.join("help.md"));
    let Ok(text) = fs::read_to_string(&path) else {
        return Ok((None, None));
    };
    let dags = help::parse_help(&text, is_datatype)
        .map_err(|e| ConfigError::Parse { stage: "parsing help.md", source: e })?;
    Ok((Some(dags.long), Some(dags.short)))
}

/// Spec §4.10 step 5: `{dir}/banner.txt`, if present.
fn read_banner(dir: &Path) -> Option<String> {
    fs::read_to_string(dir.join("banner.txt")).ok()
}

/// Spec §4.10 step 6: `-p FILE` override, else `{dir}/permission/{user}.txt`
/// falling back to `{dir}/permission/DEFAULT.txt`. The invoking username
/// comes from `$USER`/`$LOGNAME` rather than a `getpwuid` lookup - recli-cli
/// carries no extra dependency purely to resolve a uid to a name when the
/// environment already names the user (see `DESIGN.md`).
fn load_permissions(cli: &Cli, dir: &Path) -> Result<Vec<Rule>, ConfigError> {
    let path = if let Some(p) = &cli.permission_file {
        p.clone()
    } else {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .unwrap_or_else(|_| "DEFAULT".to_string());
        let per_user = dir.join("permission").join(format!("{user}.txt"));
        if per_user.exists() { per_user } else { dir.join("permission/DEFAULT.txt") }
    };

    if !path.exists() {
        return Ok(Vec::new());
    }

    recli_session::permission_file::parse_file(&path)
        .map_err(|e| ConfigError::Permission { stage: "reading permission file", source: e })
}
