//! Context stack (spec §3.3, §4.8). Grounded on `recli.c`'s `ctx_stack_t` /
//! `CTX_STACK_MAX` / `ctx_stack_push` / `ctx_stack_pop`, reimplemented as an
//! owned `Vec<Frame>` instead of a fixed array of raw-pointer-sliced argv
//! buffers - there is no fixed-size `ctx_line_buf`/`ctx_argv_buf` to slice
//! into; each frame owns its own argv words.

use recli_core::grammar::{skip_prefix, Node};

/// Bound on context depth (spec §3.3).
pub const MAX_DEPTH: usize = 32;

/// One entered, not-yet-complete command prefix (spec §3.3).
#[derive(Debug, Clone)]
pub struct Frame {
    /// The accumulated argv words that got us into this frame.
    pub argv: Vec<String>,
    /// The grammar remaining after consuming `argv`.
    pub grammar: Node,
    /// The long-help DAG remaining after consuming `argv`, if any.
    pub long_help: Option<Node>,
    /// The short-help DAG remaining after consuming `argv`, if any.
    pub short_help: Option<Node>,
    pub prompt: String,
}

impl Frame {
    pub fn root(grammar: Node, long_help: Option<Node>, short_help: Option<Node>, prompt: String) -> Self {
        Self { argv: Vec::new(), grammar, long_help, short_help, prompt }
    }
}

/// Bounded stack of [`Frame`]s (spec §3.3, §4.8 states `Editing(depth)`).
#[derive(Debug, Clone)]
pub struct Stack {
    frames: Vec<Frame>,
}

impl Stack {
    pub fn new(root: Frame) -> Self {
        Self { frames: vec![root] }
    }

    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn top(&self) -> &Frame {
        self.frames.last().expect("stack is never empty")
    }

    /// The full argv accumulated across every frame below the top, plus
    /// the top frame's own words - what the original calls `total_argc`.
    pub fn full_argv(&self) -> Vec<String> {
        self.frames.iter().flat_map(|f| f.argv.iter().cloned()).collect()
    }

    /// Push a new frame projecting the current grammar past `consumed`
    /// words (spec §4.8 transition 5). Returns `false` without pushing if
    /// the stack is already at `MAX_DEPTH`.
    pub fn push(&mut self, consumed: Vec<String>, matched: Node, prompt: String) -> bool {
        if self.depth() >= MAX_DEPTH - 1 {
            return false;
        }
        let n = consumed.len();
        let top = self.top();
        let grammar = skip_prefix(&matched, n);
        let long_help = top.long_help.as_ref().map(|h| skip_prefix(h, n));
        let short_help = top.short_help.as_ref().map(|h| skip_prefix(h, n));
        self.frames.push(Frame { argv: consumed, grammar, long_help, short_help, prompt });
        true
    }

    /// Pop the top frame (spec §4.8 transition 1, built-in `exit`). A
    /// no-op at depth 0 - the caller is responsible for exiting the
    /// process in that case, matching `recli.c::process`'s `exit(0)`.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Pop every frame down to the root (built-in `end`).
    pub fn pop_all(&mut self) {
        self.frames.truncate(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recli_core::grammar::{concat, keyword};

    fn kw(s: &str) -> Node {
        keyword(s, false, false).unwrap()
    }

    #[test]
    fn push_and_pop_tracks_depth() {
        let root_grammar = concat(kw("show"), kw("interface"));
        let mut stack = Stack::new(Frame::root(root_grammar.clone(), None, None, "r> ".into()));
        assert_eq!(stack.depth(), 0);

        assert!(stack.push(vec!["show".into()], root_grammar, "r ...> ".into()));
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.full_argv(), vec!["show".to_string()]);

        stack.pop();
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn push_refuses_past_max_depth() {
        let g = kw("x");
        let mut stack = Stack::new(Frame::root(g.clone(), None, None, "r> ".into()));
        for _ in 0..(MAX_DEPTH - 1) {
            assert!(stack.push(vec!["x".into()], g.clone(), "r ...> ".into()));
        }
        assert!(!stack.push(vec!["x".into()], g.clone(), "r ...> ".into()));
        assert_eq!(stack.depth(), MAX_DEPTH - 1);
    }

    #[test]
    fn pop_all_returns_to_root() {
        let g = kw("x");
        let mut stack = Stack::new(Frame::root(g.clone(), None, None, "r> ".into()));
        stack.push(vec!["x".into()], g.clone(), "r ...> ".into());
        stack.push(vec!["x".into()], g, "r ...> ".into());
        stack.pop_all();
        assert_eq!(stack.depth(), 0);
    }
}
