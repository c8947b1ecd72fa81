use super::state::PacketState;

/// Wire-level decode/encode error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtoError {
    #[error("input ended mid-packet")]
    UnexpectedEof,
    #[error("varint did not terminate within 5 bytes")]
    VarIntTooLarge,
    #[error("packet length {len} exceeds protocol limit")]
    PacketTooLarge { len: usize },
    #[error("negative length field {0}")]
    NegativeLength(i32),
    #[error("string is not valid utf-8")]
    InvalidUtf8,
    #[error("string of {actual} chars exceeds bound of {max}")]
    StringTooLong { max: usize, actual: usize },
    #[error("length field {actual} exceeds bound of {max}")]
    LengthTooLarge { max: usize, actual: usize },
    #[error("{0} unconsumed bytes after packet body")]
    TrailingBytes(usize),
    #[error("unexpected packet id {id} in {state:?} state")]
    InvalidPacketId { state: PacketState, id: i32 },
    #[error("handshake next-state {0} is neither status nor login")]
    InvalidHandshakeState(i32),
    #[error("packet of {len} bytes is too short for a status response")]
    UndersizedPacket { len: usize },
}

pub type Result<T> = std::result::Result<T, ProtoError>;

pub(crate) fn debug_log_error(context: &str, error: &ProtoError) {
    #[cfg(debug_assertions)]
    {
        log::error!("{}: {:?}", context, error);
    }
    let _ = context;
    let _ = error;
}
