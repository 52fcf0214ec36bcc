/// Failures surfaced by the ring and its configuration.
///
/// Duplicate registration and removal of an unknown node are not errors; `HashRing::add`
/// reports the former as `false` and `HashRing::remove` ignores the latter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// Lookup on a ring with no registered nodes.
    NoNodes,
    Config { message: String },
}

impl RingError {
    pub fn config<S>( message: S ) -> RingError
    where
        S: AsRef<str>
    {
        RingError::Config {
            message: message.as_ref().to_owned(),
        }
    }

    pub fn config_from_error<S, E>( message: S, error: E ) -> RingError
    where
        S: AsRef<str>,
        E: std::fmt::Display,
    {
        Self::config( format!( "{}: {}", message.as_ref(), error ) )
    }
}

impl std::fmt::Display for RingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RingError::NoNodes => write!(f, "RingError: no nodes registered"),
            RingError::Config { message } => write!(f, "RingError: configuration: {}", message),
        }
    }
}

impl std::error::Error for RingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_error_folds_source() {
        let err = RingError::config_from_error("bad file", "missing brace");
        assert_eq!(err, RingError::Config { message: "bad file: missing brace".to_owned() });
        assert_eq!(err.to_string(), "RingError: configuration: bad file: missing brace");
    }

    #[test]
    fn test_no_nodes_display() {
        assert_eq!(RingError::NoNodes.to_string(), "RingError: no nodes registered");
    }
}
