use std::fmt;

#[derive(Debug, Clone)]
pub struct IoError {
    error: String,
}

impl IoError {
    pub fn new(error: String) -> Self {
        return IoError { error };
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl From<std::io::Error> for IoError {
    fn from(error: std::io::Error) -> Self {
        return IoError::new(error.to_string());
    }
}

impl From<csv::Error> for IoError {
    fn from(error: csv::Error) -> Self {
        return IoError::new(error.to_string());
    }
}
