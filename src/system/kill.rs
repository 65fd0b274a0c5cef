use super::source::ProcSource;

/// Outcome of one kill request, rendered as a one-line status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillResult {
    Sent(u32),
    Failed(u32, String),
    InvalidPid,
}

impl KillResult {
    pub fn message(&self) -> String {
        match self {
            KillResult::Sent(pid) => format!("Sent SIGTERM to PID {pid}"),
            KillResult::Failed(pid, err) => format!("kill({pid}) failed: {err}"),
            KillResult::InvalidPid => "Invalid PID".to_string(),
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, KillResult::Sent(_))
    }
}

/// Parses operator input into a signalable pid. Pids 0 and 1 are rejected:
/// 1 is init, and 0 would signal the monitor's own process group.
pub fn parse_pid(input: &str) -> Option<u32> {
    let pid: u32 = input.trim().parse().ok()?;
    if pid <= 1 { None } else { Some(pid) }
}

/// Validates the typed pid and sends SIGTERM through the source. Failures
/// are reported, never retried, and the signal is never escalated.
pub fn kill_with_sigterm<S: ProcSource>(source: &S, input: &str) -> KillResult {
    let Some(pid) = parse_pid(input) else {
        return KillResult::InvalidPid;
    };
    match source.send_sigterm(pid) {
        Ok(()) => KillResult::Sent(pid),
        Err(err) => KillResult::Failed(pid, err.to_string()),
    }
}
