//! Inbound command parsing.
//!
//! A packet body is routed by its leading byte, then by exact name or prefix
//! for the multi-character queries. Anything unrecognized, including unknown
//! sub-commands under a known prefix, parses as `Command::Unsupported`.
//!
//! Numeric arguments are hex and parse like C `strtoul`: leading hex digits
//! are taken, the rest is ignored, and no digits at all means 0.

/// A hex thread id as sent by the client.
///
/// Wire ids are one-based. `0` ("any") and `-1` ("all") do not name a
/// single strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadId {
    /// A specific thread, one-based.
    Id(u64),
    /// `0` or `-1`.
    Any,
}

impl ThreadId {
    fn parse(text: &[u8]) -> Self {
        if text.starts_with(b"-") {
            return Self::Any;
        }
        match parse_hex_prefix(text) {
            0 => Self::Any,
            id => Self::Id(id),
        }
    }

    /// Zero-based strand index this id names, if it names one.
    pub fn strand(self) -> Option<usize> {
        match self {
            Self::Id(id) => usize::try_from(id - 1).ok(),
            Self::Any => None,
        }
    }
}

/// A parsed debugger request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `QStartNoAckMode`.
    StartNoAckMode,
    /// `qLaunchSuccess`.
    LaunchSuccess,
    /// `qHostInfo`.
    HostInfo,
    /// `qProcessInfo`.
    ProcessInfo,
    /// `qfThreadInfo`.
    FirstThreadInfo,
    /// `qsThreadInfo`.
    NextThreadInfo,
    /// `qThreadStopInfo...`.
    ThreadStopInfo,
    /// `qRegisterInfo<hex-id>`.
    RegisterInfo(u64),
    /// `qC`.
    CurrentThread,
    /// `A...`: program arguments, accepted and ignored.
    SetArguments,
    /// `c`/`C`.
    Continue,
    /// `s`/`S`.
    Step,
    /// `Hg<id>`.
    SelectThread(ThreadId),
    /// `p<hex-id>` or `g<hex-id>`.
    ReadRegister(u64),
    /// `P<hex-id>=<hex-value>`.
    WriteRegister {
        /// Flat register id.
        id: u64,
        /// Hex text of the new value.
        value: Vec<u8>,
    },
    /// `m<addr>,<len>`.
    ReadMemory {
        /// First byte address.
        address: u32,
        /// Number of bytes requested.
        length: usize,
    },
    /// `Z0,<addr>,<kind>`.
    InsertBreakpoint(u32),
    /// `z0,<addr>,<kind>`.
    RemoveBreakpoint(u32),
    /// `vCont?`.
    ContQuery,
    /// `vCont;s[:<id>]...`.
    ContStep(Option<ThreadId>),
    /// `vCont;c...`.
    ContContinue,
    /// `?`.
    LastSignal,
    /// Anything else.
    Unsupported,
}

impl Command {
    /// Parses a packet body.
    pub fn parse(body: &[u8]) -> Self {
        let Some((&lead, rest)) = body.split_first() else {
            return Self::Unsupported;
        };
        match lead {
            b'Q' => match rest {
                b"StartNoAckMode" => Self::StartNoAckMode,
                _ => Self::Unsupported,
            },
            b'q' => Self::parse_query(rest),
            b'A' => Self::SetArguments,
            b'c' | b'C' => Self::Continue,
            b's' | b'S' => Self::Step,
            b'H' => match rest.split_first() {
                Some((b'g', id)) => Self::SelectThread(ThreadId::parse(id)),
                _ => Self::Unsupported,
            },
            b'p' | b'g' => Self::ReadRegister(parse_hex_prefix(rest)),
            b'P' => Self::parse_register_write(rest),
            b'm' => Self::parse_memory_read(rest),
            b'Z' | b'z' => Self::parse_breakpoint(lead, rest),
            b'v' => Self::parse_cont(body),
            b'?' => Self::LastSignal,
            _ => Self::Unsupported,
        }
    }

    fn parse_query(rest: &[u8]) -> Self {
        match rest {
            b"LaunchSuccess" => Self::LaunchSuccess,
            b"HostInfo" => Self::HostInfo,
            b"ProcessInfo" => Self::ProcessInfo,
            b"fThreadInfo" => Self::FirstThreadInfo,
            b"sThreadInfo" => Self::NextThreadInfo,
            b"C" => Self::CurrentThread,
            _ if rest.starts_with(b"ThreadStopInfo") => Self::ThreadStopInfo,
            _ => match rest.strip_prefix(b"RegisterInfo") {
                Some(id) => Self::RegisterInfo(parse_hex_prefix(id)),
                None => Self::Unsupported,
            },
        }
    }

    fn parse_register_write(rest: &[u8]) -> Self {
        let Some(eq) = rest.iter().position(|&b| b == b'=') else {
            return Self::Unsupported;
        };
        Self::WriteRegister {
            id: parse_hex_prefix(&rest[..eq]),
            value: rest[eq + 1..].to_vec(),
        }
    }

    fn parse_memory_read(rest: &[u8]) -> Self {
        let mut fields = rest.splitn(2, |&b| b == b',');
        let (Some(address), Some(length)) = (fields.next(), fields.next()) else {
            return Self::Unsupported;
        };
        let Ok(address) = u32::try_from(parse_hex_prefix(address)) else {
            return Self::Unsupported;
        };
        let Ok(length) = usize::try_from(parse_hex_prefix(length)) else {
            return Self::Unsupported;
        };
        Self::ReadMemory { address, length }
    }

    fn parse_breakpoint(lead: u8, rest: &[u8]) -> Self {
        let Some(address) = rest.strip_prefix(b"0,") else {
            return Self::Unsupported;
        };
        let Ok(address) = u32::try_from(parse_hex_prefix(address)) else {
            return Self::Unsupported;
        };
        if lead == b'Z' {
            Self::InsertBreakpoint(address)
        } else {
            Self::RemoveBreakpoint(address)
        }
    }

    fn parse_cont(body: &[u8]) -> Self {
        if body == b"vCont?" {
            return Self::ContQuery;
        }
        let Some(action) = body.strip_prefix(b"vCont;") else {
            return Self::Unsupported;
        };
        match action.split_first() {
            Some((b's', args)) => {
                Self::ContStep(args.strip_prefix(b":").map(ThreadId::parse))
            }
            Some((b'c', _)) => Self::ContContinue,
            _ => Self::Unsupported,
        }
    }
}

/// Parses the leading hex digits of `text`, saturating at `u64::MAX`. No digits yields 0.
pub fn parse_hex_prefix(text: &[u8]) -> u64 {
    text.iter()
        .map_while(|&b| char::from(b).to_digit(16))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(16).saturating_add(u64::from(digit))
        })
}
