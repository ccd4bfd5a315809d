//! Command dispatch.
//!
//! `CommandDispatcher` turns one parsed command into exactly one response,
//! reading and updating the session and driving the target through the
//! execution controller. It never fails: out-of-range arguments and
//! unknown commands produce `Response::Empty`.

use tracing::debug;

use crate::common::TRAP_SIGNAL;
use crate::common::constants::MAX_MEMORY_READ;
use crate::exec::{ExecutionController, InterruptProbe};
use crate::protocol::command::{Command, ThreadId};
use crate::protocol::response::Response;
use crate::registers::{self, RegisterInfo, RegisterKind, RegisterValue};
use crate::session::Session;
use crate::target::DebugTarget;

/// Routes commands to the register space, the execution controller and the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandDispatcher {
    controller: ExecutionController,
}

impl CommandDispatcher {
    /// Creates a dispatcher that runs the target through `controller`.
    pub const fn new(controller: ExecutionController) -> Self {
        Self { controller }
    }

    /// Execution controller used for continue and step.
    pub const fn controller(&self) -> &ExecutionController {
        &self.controller
    }

    /// Handles one command and returns its response.
    ///
    /// `probe` is consulted between quanta while a continue is running.
    pub fn dispatch<T, P>(
        &self,
        command: &Command,
        session: &mut Session,
        target: &mut T,
        probe: &mut P,
    ) -> Response
    where
        T: DebugTarget + ?Sized,
        P: InterruptProbe + ?Sized,
    {
        match command {
            Command::StartNoAckMode => {
                session.disable_acks();
                Response::Ok
            }
            Command::LaunchSuccess | Command::SetArguments => Response::Ok,
            Command::HostInfo => Response::HostInfo,
            Command::ProcessInfo => Response::ProcessInfo,
            Command::FirstThreadInfo => Response::ThreadList {
                strands: target.strand_count(),
            },
            Command::NextThreadInfo => Response::EndOfThreadList,
            Command::ThreadStopInfo | Command::LastSignal => {
                Response::Signal(session.last_signal(session.selected_strand()))
            }
            Command::RegisterInfo(id) => {
                RegisterInfo::describe(*id).map_or(Response::Empty, Response::RegisterInfo)
            }
            Command::CurrentThread => Response::CurrentThread {
                strand: session.selected_strand(),
            },
            Command::Continue | Command::ContContinue => {
                let cause = self.controller.continue_until_interrupt(target, probe);
                debug!(?cause, "target stopped");
                Self::report_stop(session)
            }
            Command::Step => {
                self.controller.single_step(target);
                Self::report_stop(session)
            }
            Command::ContStep(thread) => {
                if let Some(strand) = thread.and_then(ThreadId::strand) {
                    self.select(session, target, strand);
                }
                self.controller.single_step(target);
                Self::report_stop(session)
            }
            Command::SelectThread(thread) => {
                if let Some(strand) = thread.strand() {
                    self.select(session, target, strand);
                }
                Response::Ok
            }
            Command::ReadRegister(id) => {
                registers::read_register(&*target, *id).map_or(Response::Empty, Response::Register)
            }
            Command::WriteRegister { id, value } => {
                let written = RegisterValue::from_hex(RegisterKind::classify(*id), value)
                    .is_some_and(|value| registers::write_register(target, *id, value));
                if written { Response::Ok } else { Response::Empty }
            }
            Command::ReadMemory { address, length } => {
                Response::Memory(read_memory(&*target, *address, *length))
            }
            Command::InsertBreakpoint(address) => {
                if target.set_breakpoint(*address) {
                    Response::Ok
                } else {
                    Response::Empty
                }
            }
            Command::RemoveBreakpoint(address) => {
                // Removing an absent breakpoint is not a failure for the client.
                let _ = target.clear_breakpoint(*address);
                Response::Ok
            }
            Command::ContQuery => Response::ContActions,
            Command::Unsupported => Response::Empty,
        }
    }

    /// Selects `strand` on the target and in the session, or on neither.
    fn select<T: DebugTarget + ?Sized>(&self, session: &mut Session, target: &mut T, strand: usize) {
        if self.controller.select_strand(target, strand) && session.select_strand(strand) {
            debug!(strand, "selected strand");
        } else {
            debug!(strand, "ignoring selection of unknown strand");
        }
    }

    /// Records a trap for the selected strand and reports it.
    fn report_stop(session: &mut Session) -> Response {
        let strand = session.selected_strand();
        session.record_stop(strand, TRAP_SIGNAL);
        Response::Signal(session.last_signal(strand))
    }
}

/// Reads up to `length` bytes, stopping at the first unreadable address.
fn read_memory<T: DebugTarget + ?Sized>(target: &T, address: u32, length: usize) -> Vec<u8> {
    (0..length.min(MAX_MEMORY_READ))
        .map_while(|offset| {
            let addr = address.checked_add(u32::try_from(offset).ok()?)?;
            target.read_memory(addr)
        })
        .collect()
}
