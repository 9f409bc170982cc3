use std::process::ExitCode;

/// Program status returned by `GameClient::run`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitStatus {
    /// Clean shutdown.
    Ok,
    /// Initialization or content loading failed; the loop never ran.
    FatalError,
}

impl ExitStatus {
    pub const fn code(self) -> u8 {
        match self {
            ExitStatus::Ok => 0,
            ExitStatus::FatalError => 1,
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, ExitStatus::Ok)
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
