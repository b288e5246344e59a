//! Permission rule evaluation (spec §3.2, §4.7).
//!
//! Grounded on `permission.c::permission_enforce`. Parsing the rule *file*
//! (line splitting, `!`/`;`/`#` handling) lives in `recli-session`, which
//! owns filesystem access to `D/permission/{USER}.txt`; this module is the
//! pure evaluator over an already-parsed rule list.

use serde::{Deserialize, Serialize};

/// One line of a permission file: `allow` unless prefixed with `!`, and an
/// argv pattern where `*` is a wildcard word and anything else must match
/// literally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub allow: bool,
    pub pattern: Vec<String>,
}

impl Rule {
    pub fn new(allow: bool, pattern: Vec<String>) -> Self {
        Self { allow, pattern }
    }

    /// Whether `argv` matches this rule's pattern. A pattern is shorter
    /// than or equal in length to `argv`; `*` matches any single word.
    fn matches(&self, argv: &[String]) -> bool {
        if self.pattern.len() > argv.len() {
            return false;
        }
        self.pattern
            .iter()
            .zip(argv.iter())
            .all(|(pat, word)| pat == "*" || pat == word)
    }
}

/// `enforce(rules, argv)`: true iff the first matching rule allows.
/// Argv matching no rule at all is allowed by default - a permission file
/// is a list of exceptions, not a whitelist (`permission.c::permission_enforce`
/// falls through to `return 1` when no rule's pattern matches).
pub fn enforce(rules: &[Rule], argv: &[String]) -> bool {
    if argv.is_empty() {
        return true;
    }
    rules.iter().find(|r| r.matches(argv)).is_none_or(|r| r.allow)
}

/// The file-level shortcut `!*` alone: no permission at all. A session
/// whose rule set is exactly this must exit immediately on start (spec
/// §4.7, §4.10 step 6).
pub fn denies_everything(rules: &[Rule]) -> bool {
    rules.len() == 1 && !rules[0].allow && rules[0].pattern == ["*"]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![
            Rule::new(false, vec!["show".into(), "secret".into(), "*".into()]),
            Rule::new(true, vec!["*".into()]),
        ];
        assert!(!enforce(&rules, &argv(&["show", "secret", "key"])));
        assert!(enforce(&rules, &argv(&["show", "interface"])));
    }

    #[test]
    fn bang_star_alone_denies_everything() {
        let rules = vec![Rule::new(false, vec!["*".into()])];
        assert!(denies_everything(&rules));
        assert!(!enforce(&rules, &argv(&["anything"])));
    }

    #[test]
    fn unmatched_argv_is_allowed_by_default() {
        let rules = vec![Rule::new(false, vec!["configure".into()])];
        assert!(enforce(&rules, &argv(&["show"])));
    }

    #[test]
    fn empty_argv_is_always_allowed() {
        let rules = vec![Rule::new(false, vec!["*".into()])];
        assert!(enforce(&rules, &[]));
    }
}
