use thiserror::Error;

/// Failure modes of the final decryption step.
#[derive(Debug, Error)]
pub enum DecryptError {
    #[error("malformed base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("ciphertext length {0} is not a positive multiple of the AES block size")]
    BlockLength(usize),
    #[error("invalid PKCS#7 padding")]
    Padding,
    #[error("decrypted url is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Every way a resolve run can stop.
///
/// The pipeline halts at the first of these and hands it to the caller
/// unchanged; nothing is retried or replaced with a placeholder.
#[derive(Debug, Error)]
pub enum LixError {
    /// No video identifier could be extracted from the user input.
    #[error("no video identifier found in {0:?}")]
    InvalidInput(String),
    /// The service answered but without the data we asked for.
    #[error("not found: {0}")]
    NotFound(String),
    /// Connection failure, non-success status, or an unparsable body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decryption failed: {0}")]
    Decryption(#[from] DecryptError),
}

impl LixError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Short status line a front end can show for this outcome.
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Invalid input. Enter a video ID or a valid share URL.",
            Self::NotFound(_) => "Video not found. Check the video ID and try again.",
            Self::Transport(_) => "Could not reach the streaming service.",
            Self::Decryption(_) => "The asset URL could not be decrypted.",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::NotFound(_) => 3,
            Self::Transport(_) => 4,
            Self::Decryption(_) => 5,
        }
    }
}

pub type LixResult<T> = Result<T, LixError>;
