use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use log::debug;

use crate::{
    connection::Connection,
    error::{Result, SlpError},
    proto::{
        ClientboundPacket, HandshakeNextState, PacketState, ProtoError, StatusPingC2s,
        StatusRequestC2s,
    },
};

/// Default per-operation timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Smallest plausible status response on the wire: packet ID, string
/// length byte, and an empty JSON object.
const MIN_STATUS_WIRE_LEN: usize = 4;

/// Immutable description of the server to probe. Invalid inputs are
/// rejected at construction; no partially-valid endpoint can exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    host: String,
    port: u16,
    protocol_version: i32,
}

impl ServerEndpoint {
    /// Protocol version defaults to -1, which asks the server to answer
    /// with whatever it considers its own version.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        let host = host.into();
        let reason = if host.is_empty() {
            Some("host may not be empty")
        } else if !host.is_ascii() {
            Some("host must be ascii")
        } else if host.len() > u8::MAX as usize {
            // The handshake carries the address length in one raw byte.
            Some("host exceeds 255 bytes")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(SlpError::InvalidHost { host, reason });
        }

        Ok(Self {
            host,
            port,
            protocol_version: -1,
        })
    }

    pub fn with_protocol_version(mut self, version: i32) -> Result<Self> {
        if version < -1 {
            return Err(SlpError::InvalidProtocolVersion(version));
        }
        self.protocol_version = version;
        Ok(self)
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn protocol_version(&self) -> i32 {
        self.protocol_version
    }
}

/// Opaque 8-byte ping payload derived from the wall clock. Returned by the
/// send step and handed explicitly to the receive step, so no measurement
/// state lives on the client between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PingToken {
    payload: i64,
}

impl PingToken {
    fn issue() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;
        Self { payload: millis }
    }
}

/// The two ping attempts, in order. Some servers refuse a ping until a
/// status request has been answered on the same connection, so a failed
/// bare ping is retried exactly once through the status-first path.
#[derive(Debug, Clone, Copy)]
enum PingStrategy {
    Bare,
    StatusFirst,
}

/// Server List Ping client. Holds no state across operations; every call
/// opens, uses, and tears down its own connection, so one client value
/// may be shared between tasks freely.
#[derive(Debug, Clone)]
pub struct SlpClient {
    endpoint: ServerEndpoint,
    timeout: Duration,
}

impl SlpClient {
    #[must_use]
    pub fn new(endpoint: ServerEndpoint) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    /// Queries the server's status document and returns it verbatim.
    /// Interpreting the JSON is the caller's business.
    pub async fn status(&self) -> Result<String> {
        let mut conn = self.connect_status().await?;
        let json = self.request_status(&mut conn).await?;
        conn.shutdown().await?;
        Ok(json)
    }

    /// Measures the round-trip time to the server in milliseconds.
    pub async fn ping(&self) -> Result<f64> {
        match self.ping_with(PingStrategy::Bare).await {
            Ok(elapsed) => Ok(elapsed),
            Err(err) => {
                debug!(
                    "bare ping of {}:{} failed ({err}), retrying with a status request first",
                    self.endpoint.host, self.endpoint.port
                );
                self.ping_with(PingStrategy::StatusFirst).await
            }
        }
    }

    async fn connect_status(&self) -> Result<Connection> {
        let mut conn = Connection::open(&self.endpoint.host, self.endpoint.port, self.timeout).await?;
        conn.handshake(&self.endpoint, HandshakeNextState::Status)
            .await?;
        Ok(conn)
    }

    async fn request_status(&self, conn: &mut Connection) -> Result<String> {
        conn.send(&StatusRequestC2s).await?;
        let frame = conn.recv_frame().await?;
        if frame.wire_len() < MIN_STATUS_WIRE_LEN {
            return Err(ProtoError::UndersizedPacket {
                len: frame.wire_len(),
            }
            .into());
        }

        match frame.decode_clientbound(PacketState::Status)? {
            ClientboundPacket::StatusResponse(response) => Ok(response.json.to_owned()),
            ClientboundPacket::StatusPong(_) => Err(ProtoError::InvalidPacketId {
                state: PacketState::Status,
                id: frame.id,
            }
            .into()),
        }
    }

    async fn ping_with(&self, strategy: PingStrategy) -> Result<f64> {
        let mut conn = self.connect_status().await?;
        if let PingStrategy::StatusFirst = strategy {
            self.request_status(&mut conn).await?;
        }

        let (token, started) = send_ping(&mut conn).await?;
        let elapsed = receive_pong(&mut conn, token, started).await?;
        conn.shutdown().await?;
        Ok(elapsed)
    }
}

async fn send_ping(conn: &mut Connection) -> Result<(PingToken, Instant)> {
    let token = PingToken::issue();
    let started = Instant::now();
    conn.send(&StatusPingC2s {
        payload: token.payload,
    })
    .await?;
    Ok((token, started))
}

async fn receive_pong(conn: &mut Connection, token: PingToken, started: Instant) -> Result<f64> {
    let frame = conn.recv_frame().await?;
    // The clock stops at the end of the read; validation cost must not
    // leak into the latency figure.
    let elapsed = started.elapsed();

    let pong = match frame.decode_clientbound(PacketState::Status)? {
        ClientboundPacket::StatusPong(pong) => pong,
        ClientboundPacket::StatusResponse(_) => {
            return Err(ProtoError::InvalidPacketId {
                state: PacketState::Status,
                id: frame.id,
            }
            .into());
        }
    };

    if pong.payload != token.payload {
        return Err(SlpError::EchoMismatch {
            sent: token.payload,
            received: pong.payload,
        });
    }

    Ok(elapsed.as_secs_f64() * 1_000.0)
}
