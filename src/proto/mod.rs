//! Server List Ping wire layer: VarInt codec, packet framing, and the
//! handshake/status/ping packet set.

mod error;
mod io;
mod packets;
mod state;
mod types;
mod varint;


pub use error::{ProtoError, Result};
pub use packets::{
    ClientboundPacket, HandshakeC2s, ServerboundPacket, StatusPingC2s, StatusPongS2c,
    StatusRequestC2s, StatusResponseS2c,
};
pub use state::{HandshakeNextState, PacketState};
pub use types::{
    MAX_PACKET_SIZE, PacketDecode, PacketDecoder, PacketEncode, PacketEncoder, PacketFrame,
    encode_packet, encode_raw_packet,
};
