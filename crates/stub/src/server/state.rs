//! Connection state machine.
//!
//! The server moves through four states:
//!
//! ```text
//! Listening --ClientAccepted--> Connected --SessionReady--> AwaitingPacket
//! AwaitingPacket --PacketReceived--> Dispatching --ResponseSent--> AwaitingPacket
//! Connected | AwaitingPacket | Dispatching --StreamClosed--> Listening
//! ```
//!
//! `StubState::on` is a pure function so every transition can be checked
//! without a socket.

use crate::common::{StubError, StubResult};

/// Where the server is in its accept/read/dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StubState {
    /// No client attached; waiting in `accept`.
    #[default]
    Listening,
    /// A client was accepted; its session is being set up.
    Connected,
    /// Blocked reading the next packet.
    AwaitingPacket,
    /// Handling a packet and sending its response.
    Dispatching,
}

/// Inputs that drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubEvent {
    /// `accept` returned a client socket.
    ClientAccepted,
    /// Session state was created and ack mode reset.
    SessionReady,
    /// A complete packet was read.
    PacketReceived,
    /// The response for the current packet was written.
    ResponseSent,
    /// The client disconnected or the socket failed.
    StreamClosed,
}

impl StubState {
    /// Returns the state reached by applying `event`.
    ///
    /// # Errors
    ///
    /// Returns `StubError::InvalidTransition` if `event` cannot occur in this state.
    pub const fn on(self, event: StubEvent) -> StubResult<Self> {
        match (self, event) {
            (Self::Listening, StubEvent::ClientAccepted) => Ok(Self::Connected),
            (Self::Connected, StubEvent::SessionReady)
            | (Self::Dispatching, StubEvent::ResponseSent) => Ok(Self::AwaitingPacket),
            (Self::AwaitingPacket, StubEvent::PacketReceived) => Ok(Self::Dispatching),
            (Self::Connected | Self::AwaitingPacket | Self::Dispatching, StubEvent::StreamClosed) => {
                Ok(Self::Listening)
            }
            (state, event) => Err(StubError::InvalidTransition { state, event }),
        }
    }

    /// True while a client is attached.
    pub const fn has_client(self) -> bool {
        !matches!(self, Self::Listening)
    }
}
