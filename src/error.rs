use crate::proto::ProtoError;

/// Failure surface of the public status and ping operations.
#[derive(Debug, thiserror::Error)]
pub enum SlpError {
    #[error("invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: &'static str },
    #[error("invalid protocol version {0} (must be >= -1)")]
    InvalidProtocolVersion(i32),
    #[error("operation timed out")]
    Timeout(#[from] tokio::time::error::Elapsed),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtoError),
    #[error("ping echo mismatch: sent {sent:#018x}, received {received:#018x}")]
    EchoMismatch { sent: i64, received: i64 },
    #[error("networking error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlpError>;
