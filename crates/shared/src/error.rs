#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0}")]
    User(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("no internet connection: {0}")]
    NoInternet(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

/// The two categories the UI distinguishes when something goes wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NoInternet,
    Other,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoInternet(_) => ErrorKind::NoInternet,
            _ => ErrorKind::Other,
        }
    }

    /// Classifies an HTTP client failure. Anything that never reached the
    /// remote host is reported as a connectivity problem.
    pub fn from_transport(value: reqwest::Error) -> Self {
        if value.is_connect() || value.is_timeout() {
            return Self::NoInternet(value.to_string());
        }

        Self::Unknown(value.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::from_transport(value)
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Unknown($crate::__anyhow::anyhow!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Unknown($crate::__anyhow::anyhow!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! user {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::User(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::User(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! not_found {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotFound(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::NotFound(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_connectivity_failures_are_no_internet() {
        assert_eq!(
            Error::NoInternet("dns".to_owned()).kind(),
            ErrorKind::NoInternet
        );
        assert_eq!(Error::User("nope".to_owned()).kind(), ErrorKind::Other);
        assert_eq!(Error::NotFound("recipe".to_owned()).kind(), ErrorKind::Other);
        assert_eq!(
            Error::Unknown(anyhow::anyhow!("boom")).kind(),
            ErrorKind::Other
        );
    }

    #[test]
    fn not_found_message() {
        fn find() -> Result<()> {
            crate::not_found!("recipe {}", 42);
        }

        assert_eq!(find().unwrap_err().to_string(), "recipe 42 not found");
    }
}
