use thiserror::Error;

pub type WindowResult<T> = Result<T, WindowError>;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("invalid history: time_increment={time_increment}, range={range}")]
    InvalidHistory { time_increment: i32, range: i32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
