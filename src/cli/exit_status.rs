use std::process::ExitCode;

/// Exit status of a CLI run.
///
/// - `Success` (0): finished; skipped call sites do not change this
/// - `Failure` (1): finished, but some source or catalog file could not be
///   processed
/// - `Error` (2): aborted (bad configuration, bad arguments)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
