use async_channel::{RecvError, SendError, TrySendError};
use thiserror::Error;

pub type BoxedStdError = Box<dyn std::error::Error + Sync + std::marker::Send + 'static>;

/// Cloneable so a single fault can be delivered to any number of downstream
/// blocks and still surface on every completion future observing it.
#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("Error: {0}")]
    General(String),

    #[error("missing {0} reference")]
    MissingEndpoint(&'static str),

    #[error("handler failure: {0}")]
    Handler(String),

    #[error("channel receive error")]
    ChannelRecvError,

    #[error("channel send error")]
    ChannelSendError,
}

impl From<BoxedStdError> for Error {
    fn from(err: BoxedStdError) -> Self {
        Error::General(err.to_string())
    }
}

impl<T> From<SendError<T>> for Error {
    fn from(_: SendError<T>) -> Self {
        Error::ChannelSendError
    }
}

impl<T> From<TrySendError<T>> for Error {
    fn from(_: TrySendError<T>) -> Self {
        Error::ChannelSendError
    }
}

impl From<RecvError> for Error {
    fn from(_: RecvError) -> Self {
        Error::ChannelRecvError
    }
}

pub type Result<T> = std::result::Result<T, Error>;
