use thiserror::Error;

/// Failure taxonomy for a feed request. Adapters surface the specific cause;
/// the HTTP layer decides what the caller gets to see.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The requested platform is not one of the recognized values.
    /// No upstream call is made.
    #[error("Invalid platform specified")]
    InvalidPlatform(String),

    /// The credential for an otherwise valid platform is not configured.
    #[error("{0} is missing.")]
    CredentialMissing(&'static str),

    /// The upstream call failed: non-success status, malformed body, or
    /// network failure. Detail is logged server-side, never shown to clients.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_message_names_the_credential() {
        let err = FeedError::CredentialMissing("Twitter Bearer Token");
        assert_eq!(err.to_string(), "Twitter Bearer Token is missing.");
    }
}
