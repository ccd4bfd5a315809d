//! TCP server and per-connection session loop.
//!
//! The server is single-threaded and serves one client at a time:
//! 1. **Accept:** Block in `accept`, retrying failed accepts.
//! 2. **Session:** Create fresh session state, then read, acknowledge, dispatch and answer packets in order.
//! 3. **Teardown:** On end of stream or a socket error, close the client and return to listening.
//!
//! Transport errors end the current session only. A failure to create the
//! listening socket is the one fatal error.

/// Listening socket creation.
pub mod listener;
/// Connection state machine.
pub mod state;

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::os::fd::AsRawFd;

use tracing::{debug, info, trace, warn};

use crate::common::{StubError, StubResult};
use crate::config::Config;
use crate::dispatch::CommandDispatcher;
use crate::exec::{ExecutionController, PollProbe};
use crate::protocol::command::Command;
use crate::protocol::transport::PacketTransport;
use crate::session::Session;
use crate::target::DebugTarget;

pub use state::{StubEvent, StubState};

/// Remote debug server bound to a listening socket.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    dispatcher: CommandDispatcher,
    packet_capacity: usize,
    poll_timeout_ms: i32,
    state: StubState,
}

impl Server {
    /// Binds the listening socket described by `config.server`.
    ///
    /// # Errors
    ///
    /// Returns `StubError::Bind` if the socket cannot be created, bound or put into listening mode.
    pub fn bind(config: &Config) -> StubResult<Self> {
        let listener = listener::bind_listener(&config.server)?;
        let server = Self {
            listener,
            dispatcher: CommandDispatcher::new(ExecutionController::from_config(&config.execution)),
            packet_capacity: config.protocol.packet_capacity,
            poll_timeout_ms: config.execution.poll_timeout_ms,
            state: StubState::Listening,
        };
        info!(addr = %server.local_addr()?, "waiting for debugger");
        Ok(server)
    }

    /// Address the listener is bound to.
    ///
    /// # Errors
    ///
    /// Returns `StubError::Io` if the OS cannot report the address.
    pub fn local_addr(&self) -> StubResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Current connection state.
    pub const fn state(&self) -> StubState {
        self.state
    }

    /// Serves clients one after another, forever.
    ///
    /// # Errors
    ///
    /// Returns `StubError::NoStrands` if the target has nothing to debug; every
    /// other failure is logged and the server keeps listening.
    pub fn run<T: DebugTarget + ?Sized>(&mut self, target: &mut T) -> StubResult<()> {
        loop {
            match self.serve_next(target) {
                Ok(()) => {}
                Err(e @ StubError::NoStrands(_)) => return Err(e),
                Err(e) => warn!(error = %e, "session setup failed"),
            }
        }
    }

    /// Accepts the next client and serves it until it disconnects.
    ///
    /// Failed accepts are retried.
    ///
    /// # Errors
    ///
    /// Returns `StubError::NoStrands` if the target reports no strands.
    pub fn serve_next<T: DebugTarget + ?Sized>(&mut self, target: &mut T) -> StubResult<()> {
        let (stream, peer) = loop {
            match self.listener.accept() {
                Ok(client) => break client,
                Err(e) => debug!(error = %e, "accept failed; retrying"),
            }
        };
        info!(%peer, "got connection from debugger");
        self.serve_connection(stream, target)
    }

    /// Runs a session on an accepted client socket.
    ///
    /// The socket is closed when this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns `StubError::NoStrands` if the target reports no strands and
    /// `StubError::InvalidTransition` if the server was not listening.
    pub fn serve_connection<S, T>(&mut self, stream: S, target: &mut T) -> StubResult<()>
    where
        S: Read + Write + AsRawFd,
        T: DebugTarget + ?Sized,
    {
        self.transition(StubEvent::ClientAccepted)?;
        let mut session = match Session::new(target.strand_count()) {
            Ok(session) => session,
            Err(e) => {
                self.transition(StubEvent::StreamClosed)?;
                return Err(e);
            }
        };
        let _ = self.dispatcher.controller().select_strand(target, 0);
        self.transition(StubEvent::SessionReady)?;

        let mut transport = PacketTransport::new(stream, self.packet_capacity);
        let outcome = self.session_loop(&mut transport, &mut session, target);
        self.transition(StubEvent::StreamClosed)?;
        drop(transport);

        match outcome {
            Ok(()) => info!("disconnected from debugger"),
            Err(e) => warn!(error = %e, "debugger session ended"),
        }
        Ok(())
    }

    fn session_loop<S, T>(
        &mut self,
        transport: &mut PacketTransport<S>,
        session: &mut Session,
        target: &mut T,
    ) -> StubResult<()>
    where
        S: Read + Write + AsRawFd,
        T: DebugTarget + ?Sized,
    {
        loop {
            let Some(packet) = transport.read_packet()? else {
                return Ok(());
            };
            self.transition(StubEvent::PacketReceived)?;

            if session.ack_required() {
                transport.send_ack()?;
            }
            debug!("<< {}", String::from_utf8_lossy(packet.body()));

            let command = Command::parse(packet.body());
            let response = {
                let mut probe = PollProbe::new(transport.get_ref(), self.poll_timeout_ms);
                self.dispatcher.dispatch(&command, session, target, &mut probe)
            };

            let body = response.to_body();
            debug!(">> {}", String::from_utf8_lossy(&body));
            transport.send_packet(&body)?;
            self.transition(StubEvent::ResponseSent)?;
        }
    }

    fn transition(&mut self, event: StubEvent) -> StubResult<()> {
        let next = self.state.on(event)?;
        trace!(from = ?self.state, to = ?next, ?event, "state transition");
        self.state = next;
        Ok(())
    }
}
