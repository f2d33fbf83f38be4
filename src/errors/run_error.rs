use std::fmt;

use super::{ApiError, IoError};

/* Any failure that aborts one fund's run. Other funds keep going. */
#[derive(Debug, Clone)]
pub enum RunError {
    Api(ApiError),
    Io(IoError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunError::Api(error) => write!(f, "{}", error),
            RunError::Io(error) => write!(f, "{}", error),
        }
    }
}

impl From<ApiError> for RunError {
    fn from(error: ApiError) -> Self {
        return RunError::Api(error);
    }
}

impl From<IoError> for RunError {
    fn from(error: IoError) -> Self {
        return RunError::Io(error);
    }
}

impl From<std::io::Error> for RunError {
    fn from(error: std::io::Error) -> Self {
        return RunError::Io(IoError::from(error));
    }
}
