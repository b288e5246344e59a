//! Session configuration (spec §3.4). The full set of recognized options
//! is exactly this struct's field list.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::grammar::Node;

/// Bound on `envp` (spec §3.4, §4.10 step 1).
pub const MAX_ENV_ENTRIES: usize = 127;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecliConfig {
    pub dir: PathBuf,
    pub prompt: String,
    pub banner: Option<String>,
    #[serde(skip)]
    pub syntax: Option<Node>,
    /// Inode of `cache/syntax.txt` at the time `syntax` was loaded from it;
    /// the cache-invalidation token (spec §4.10 step 3).
    pub syntax_inode: Option<u64>,
    #[serde(skip)]
    pub long_help: Option<Node>,
    #[serde(skip)]
    pub short_help: Option<Node>,
    pub permissions_path: Option<PathBuf>,
    pub envp: Vec<(String, String)>,
}

impl RecliConfig {
    pub fn new(dir: PathBuf, prompt: String) -> Self {
        Self {
            dir,
            prompt,
            banner: None,
            syntax: None,
            syntax_inode: None,
            long_help: None,
            short_help: None,
            permissions_path: None,
            envp: Vec::new(),
        }
    }

    /// Push one `KEY=VALUE` pair, silently dropping entries past the
    /// 127-entry cap (spec §4.10 step 1).
    pub fn push_env(&mut self, key: String, value: String) {
        if self.envp.len() < MAX_ENV_ENTRIES {
            self.envp.push((key, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_env_caps_at_127_entries() {
        let mut cfg = RecliConfig::new(PathBuf::from("/etc/recli/demo"), "demo> ".to_string());
        for i in 0..200 {
            cfg.push_env(format!("K{i}"), "v".to_string());
        }
        assert_eq!(cfg.envp.len(), MAX_ENV_ENTRIES);
    }
}
