#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("Mock must have at least one response to generate an entry from")]
    MockWithoutResponses,

    #[error("Mock matcher must designate exactly one cookie, found {0}")]
    AmbiguousMatcher(usize),

    #[error("Response {index} does not match on the designated cookie `{key}`")]
    MatcherMissingKey { key: String, index: usize },

    #[error("Duplicate setting key `{0}`")]
    DuplicateKey(String),

    #[error("No callback registered for `{0}`")]
    UnknownCallback(String),

    #[error("Undecodable stored value for `{key}`")]
    ValueDecode {
        key: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Invalid settings source: {0}")]
    InvalidSource(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
