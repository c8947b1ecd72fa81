/// Protocol state used to select packet IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketState {
    Handshaking,
    Status,
}

/// Next state value in the handshake packet. Login is encodable for
/// protocol compliance; this crate never follows it with a login sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeNextState {
    Status,
    Login,
}

impl HandshakeNextState {
    pub(crate) fn as_raw(self) -> i32 {
        match self {
            Self::Status => 1,
            Self::Login => 2,
        }
    }
}
