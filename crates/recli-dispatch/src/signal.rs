//! Signal handling for the session/child relationship (spec §5
//! "Cancellation", §4.8's quote state note on SIGINT/SIGQUIT forwarding).
//!
//! The session itself never handles SIGINT/SIGQUIT - while a child is
//! running, both are forwarded to it; the parent's own read-loop is never
//! interrupted. SIGPIPE is ignored globally so that a downstream reader
//! going away produces an ordinary `EPIPE` write error instead of killing
//! the process.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Once;

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::Pid;

/// 0 means "no child running"; otherwise the pid signals should be
/// forwarded to. A plain `AtomicI32` rather than a `Mutex` because the
/// signal handler itself must only call async-signal-safe functions.
static FORWARD_TARGET: AtomicI32 = AtomicI32::new(0);

static INSTALL: Once = Once::new();

extern "C" fn forward_handler(signum: nix::libc::c_int) {
    let pid = FORWARD_TARGET.load(Ordering::Relaxed);
    if pid != 0 {
        let signal = match signum {
            x if x == Signal::SIGINT as i32 => Signal::SIGINT,
            x if x == Signal::SIGQUIT as i32 => Signal::SIGQUIT,
            _ => return,
        };
        let _ = signal::kill(Pid::from_raw(pid), signal);
    }
}

/// Install the SIGINT/SIGQUIT forwarding handlers once per process. Safe
/// to call repeatedly; only the first call takes effect.
fn install() {
    INSTALL.call_once(|| {
        let action = SigAction::new(
            SigHandler::Handler(forward_handler),
            SaFlags::SA_RESTART,
            SigSet::empty(),
        );
        unsafe {
            let _ = signal::sigaction(Signal::SIGINT, &action);
            let _ = signal::sigaction(Signal::SIGQUIT, &action);
        }
    });
}

/// Ignore SIGPIPE for the remainder of the process (spec §5).
pub fn ignore_sigpipe() {
    unsafe {
        let _ = signal::signal(Signal::SIGPIPE, SigHandler::SigIgn);
    }
}

/// Mark `pid` as the forwarding target for SIGINT/SIGQUIT, run `body`,
/// then clear the target - regardless of how `body` returns, so a failed
/// dispatch never leaves a stale forwarding target pointed at a reaped
/// pid (spec §5: fds/targets are cleared on every exit path).
pub fn forward_signals_to_child<T>(pid: i32, body: impl FnOnce() -> T) -> T {
    install();
    FORWARD_TARGET.store(pid, Ordering::Relaxed);
    let result = body();
    FORWARD_TARGET.store(0, Ordering::Relaxed);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_target_is_cleared_after_body_runs() {
        forward_signals_to_child(4242, || {
            assert_eq!(FORWARD_TARGET.load(Ordering::Relaxed), 4242);
        });
        assert_eq!(FORWARD_TARGET.load(Ordering::Relaxed), 0);
    }
}
