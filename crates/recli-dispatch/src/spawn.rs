//! Fork/exec with piped stdout/stderr and non-blocking multiplex (spec
//! §4.9 steps 2-5, §5).
//!
//! Grounded on `examples/original_source/dir.c::recli_exec`'s pipe/fork/
//! select loop, reimplemented with `std::process::Command` for the
//! spawn/pipe wiring (no safe portable `fork()` in Rust without
//! `unsafe`) and `nix::poll` standing in for `select(2)` on the two
//! non-blocking read ends. Ordering between stdout and stderr bytes is
//! not preserved across streams, only within each (spec §5).

use std::io::{Read, Write};
use std::os::fd::{AsFd, AsRawFd, RawFd};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use nix::errno::Errno;
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::Pid;

use crate::error::DispatchError;
use crate::signal::forward_signals_to_child;

const READ_CHUNK: usize = 8192;

/// Result of running a child to completion: 0 iff its exit status was 0,
/// else -1 (spec §4.9 step 5's exact return convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome(pub i32);

fn set_nonblocking(fd: RawFd) -> nix::Result<()> {
    let flags = OFlag::from_bits_truncate(fcntl(fd, FcntlArg::F_GETFL)?);
    fcntl(fd, FcntlArg::F_SETFL(flags | OFlag::O_NONBLOCK))?;
    Ok(())
}

/// Drain whatever is currently available on `fd` into `sink`. Returns
/// `true` once the peer has closed its end (EOF). `EINTR` is retried in
/// place, matching the original's "partial reads on EINTR do not close
/// the fd" (spec §5).
fn drain(stream: &mut impl Read, sink: &mut dyn Write) -> Result<bool, DispatchError> {
    let mut buf = [0u8; READ_CHUNK];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => return Ok(true),
            Ok(n) => {
                let _ = sink.write_all(&buf[..n]);
                return Ok(false);
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => return Ok(false),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(_) => return Ok(true),
        }
    }
}

/// Spawn `executable` with `argv`, wire its stdin to `/dev/null` and its
/// stdout/stderr to pipes, forward SIGINT/SIGQUIT to it while it runs,
/// and multiplex its output into `stdout_sink`/`stderr_sink` until both
/// streams are closed (spec §4.9 steps 2-5).
///
/// `envp` replaces the environment entirely when non-empty (spec §3.4,
/// §6.5: "envp from `D/ENV` plus `RECLI_DIR`"); when empty, the child
/// inherits the parent's environment (spec §4.9 step 3: "or the parent's
/// if empty").
pub fn spawn_and_multiplex(
    executable: &Path,
    argv: &[String],
    envp: &[(String, String)],
    stdout_sink: &mut dyn Write,
    stderr_sink: &mut dyn Write,
) -> Result<Outcome, DispatchError> {
    let mut command = Command::new(executable);
    command.args(argv);
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    if !envp.is_empty() {
        command.env_clear();
        command.envs(envp.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    let mut child = spawn_child(command, executable)?;
    let pid = child.id() as i32;

    let result = forward_signals_to_child(pid, || multiplex(&mut child, stdout_sink, stderr_sink));

    let status = waitpid(Pid::from_raw(pid), None).map_err(|e| DispatchError::Wait(std::io::Error::from(e)))?;
    result?;

    Ok(Outcome(match status {
        WaitStatus::Exited(_, 0) => 0,
        _ => -1,
    }))
}

fn spawn_child(mut command: Command, executable: &Path) -> Result<Child, DispatchError> {
    command.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DispatchError::Exec { path: executable.to_path_buf(), source: e }
        } else {
            DispatchError::Fork { path: executable.to_path_buf(), source: e }
        }
    })
}

fn multiplex(child: &mut Child, stdout_sink: &mut dyn Write, stderr_sink: &mut dyn Write) -> Result<(), DispatchError> {
    let mut out = child.stdout.take().expect("stdout was piped");
    let mut err = child.stderr.take().expect("stderr was piped");

    set_nonblocking(out.as_raw_fd()).map_err(|e| DispatchError::Pipe(std::io::Error::from(e)))?;
    set_nonblocking(err.as_raw_fd()).map_err(|e| DispatchError::Pipe(std::io::Error::from(e)))?;

    let mut out_open = true;
    let mut err_open = true;

    while out_open || err_open {
        let mut fds = Vec::with_capacity(2);
        if out_open {
            fds.push(PollFd::new(out.as_fd(), PollFlags::POLLIN));
        }
        if err_open {
            fds.push(PollFd::new(err.as_fd(), PollFlags::POLLIN));
        }

        match poll(&mut fds, PollTimeout::NONE) {
            Ok(_) => {}
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(DispatchError::Pipe(std::io::Error::from(e))),
        }

        if out_open && drain(&mut out, stdout_sink)? {
            out_open = false;
        }
        if err_open && drain(&mut err, stderr_sink)? {
            err_open = false;
        }
    }

    Ok(())
}
