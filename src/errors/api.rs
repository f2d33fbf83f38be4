use std::fmt;

#[derive(Debug, Clone)]
pub enum ApiError {
    ApiCallError(String),
    UnexpectedShape(String),
    DeserializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::ApiCallError(error) => write!(f, "api call failed: {}", *error),
            ApiError::UnexpectedShape(what) => {
                write!(f, "response did not have the expected shape: {}", *what)
            }
            ApiError::DeserializationError(e) => {
                write!(f, "Error during serde deserialisation: {e}")
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        return ApiError::ApiCallError(error.to_string());
    }
}
