//! Error type for `dt-message`.

use dt_core::HandlerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("handler {0} is already registered")]
    AlreadyRegistered(HandlerId),
}

pub type MessageResult<T> = Result<T, MessageError>;
