//! Listening socket creation.
//!
//! `std::net::TcpListener::bind` does not expose the listen backlog, so the
//! socket is created with `libc`: `SO_REUSEADDR` is set before `bind`, and
//! `listen` uses the configured backlog. The descriptor is owned from the
//! moment it is created, so every failure path closes it.

use std::io;
use std::mem;
use std::net::{SocketAddr, TcpListener};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use crate::common::{StubError, StubResult};
use crate::config::ServerConfig;

/// Creates a TCP listener per `config`.
///
/// # Errors
///
/// Returns `StubError::Bind` naming the failing step (`create`, `configure`, `bind`, `listen`).
pub fn bind_listener(config: &ServerConfig) -> StubResult<TcpListener> {
    let addr = config.socket_addr();
    let fail = |op: &'static str| StubError::Bind {
        op,
        addr,
        source: io::Error::last_os_error(),
    };

    let domain = match addr {
        SocketAddr::V4(_) => libc::AF_INET,
        SocketAddr::V6(_) => libc::AF_INET6,
    };
    // SAFETY: plain socket(2) call with constant arguments.
    let raw = unsafe { libc::socket(domain, libc::SOCK_STREAM | libc::SOCK_CLOEXEC, 0) };
    if raw < 0 {
        return Err(fail("create"));
    }
    // SAFETY: `raw` is a freshly created descriptor owned by nobody else.
    let fd = unsafe { OwnedFd::from_raw_fd(raw) };

    let enable: libc::c_int = 1;
    // SAFETY: `enable` is a live c_int and its size is passed alongside it.
    let rc = unsafe {
        libc::setsockopt(
            fd.as_raw_fd(),
            libc::SOL_SOCKET,
            libc::SO_REUSEADDR,
            (&raw const enable).cast(),
            mem::size_of::<libc::c_int>() as libc::socklen_t,
        )
    };
    if rc < 0 {
        return Err(fail("configure"));
    }

    let rc = match addr {
        SocketAddr::V4(v4) => {
            // SAFETY: sockaddr_in is plain old data; all-zero is a valid value.
            let mut sin: libc::sockaddr_in = unsafe { mem::zeroed() };
            sin.sin_family = libc::AF_INET as libc::sa_family_t;
            sin.sin_port = v4.port().to_be();
            sin.sin_addr.s_addr = u32::from_ne_bytes(v4.ip().octets());
            // SAFETY: `sin` is a valid sockaddr_in and its exact size is passed.
            unsafe {
                libc::bind(
                    fd.as_raw_fd(),
                    (&raw const sin).cast(),
                    mem::size_of::<libc::sockaddr_in>() as libc::socklen_t,
                )
            }
        }
        SocketAddr::V6(v6) => {
            // SAFETY: sockaddr_in6 is plain old data; all-zero is a valid value.
            let mut sin6: libc::sockaddr_in6 = unsafe { mem::zeroed() };
            sin6.sin6_family = libc::AF_INET6 as libc::sa_family_t;
            sin6.sin6_port = v6.port().to_be();
            sin6.sin6_addr.s6_addr = v6.ip().octets();
            // SAFETY: `sin6` is a valid sockaddr_in6 and its exact size is passed.
            unsafe {
                libc::bind(
                    fd.as_raw_fd(),
                    (&raw const sin6).cast(),
                    mem::size_of::<libc::sockaddr_in6>() as libc::socklen_t,
                )
            }
        }
    };
    if rc < 0 {
        return Err(fail("bind"));
    }

    // SAFETY: `fd` is a bound stream socket.
    if unsafe { libc::listen(fd.as_raw_fd(), config.backlog) } < 0 {
        return Err(fail("listen"));
    }

    Ok(TcpListener::from(fd))
}
