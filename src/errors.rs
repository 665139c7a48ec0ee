use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("unknown status: {0}")]
    UnknownStatus(String),
}
