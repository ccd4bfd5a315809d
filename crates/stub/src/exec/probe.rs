//! Readiness checks that turn client input into interrupt requests.
//!
//! While the target runs in continue mode, any byte from the client means
//! "stop". The controller asks an `InterruptProbe` between quanta.

use std::io;
use std::os::fd::AsRawFd;

/// Source of interrupt requests checked between execution quanta.
pub trait InterruptProbe {
    /// Waits for client input according to the probe's timeout.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the client has sent bytes (or hung up), `Ok(false)` if the wait elapsed quietly.
    ///
    /// # Errors
    ///
    /// Returns the OS error from the readiness wait. `ErrorKind::Interrupted` is retryable.
    fn interrupt_pending(&mut self) -> io::Result<bool>;
}

/// `poll(2)`-based probe on a borrowed socket.
#[derive(Debug)]
pub struct PollProbe<'a, T> {
    source: &'a T,
    timeout_ms: i32,
}

impl<'a, T: AsRawFd> PollProbe<'a, T> {
    /// Probes `source`, waiting up to `timeout_ms` per check (negative waits indefinitely).
    pub const fn new(source: &'a T, timeout_ms: i32) -> Self {
        Self { source, timeout_ms }
    }
}

impl<T: AsRawFd> InterruptProbe for PollProbe<'_, T> {
    fn interrupt_pending(&mut self) -> io::Result<bool> {
        let mut fds = libc::pollfd {
            fd: self.source.as_raw_fd(),
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: `fds` is a single initialized pollfd that outlives the call,
        // and the descriptor stays open because `source` is borrowed.
        let ready = unsafe { libc::poll(&raw mut fds, 1, self.timeout_ms) };
        if ready < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(ready > 0 && fds.revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR) != 0)
    }
}
