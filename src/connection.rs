use std::{
    io::{self, ErrorKind},
    time::Duration,
};

use bytes::BytesMut;
use log::{debug, error};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    time::timeout,
};

use crate::{
    client::ServerEndpoint,
    error::Result,
    proto::{
        HandshakeC2s, HandshakeNextState, PacketDecoder, PacketEncode, PacketEncoder, PacketFrame,
    },
};

const MAX_CHUNK_SIZE: usize = 1024;

/// A live stream bound to one server for the duration of a single
/// operation. Dropped (and thereby closed) on every exit path.
pub(crate) struct Connection {
    stream: TcpStream,
    enc: PacketEncoder,
    dec: PacketDecoder,
    io_timeout: Duration,
}

impl Connection {
    /// Opens a TCP connection, bounded by `io_timeout`. A connect attempt
    /// that outlives the deadline is discarded along with its socket.
    pub(crate) async fn open(host: &str, port: u16, io_timeout: Duration) -> Result<Self> {
        let stream = timeout(io_timeout, TcpStream::connect((host, port))).await??;
        if let Err(err) = stream.set_nodelay(true) {
            error!("Failed to set TCP_NODELAY: {err}");
        }
        debug!("connected to {host}:{port}");

        Ok(Self {
            stream,
            enc: PacketEncoder::new(),
            dec: PacketDecoder::new(),
            io_timeout,
        })
    }

    /// Sends the handshake. The server answers nothing; its connection
    /// state is fixed to `next_state` from here on.
    pub(crate) async fn handshake(
        &mut self,
        endpoint: &ServerEndpoint,
        next_state: HandshakeNextState,
    ) -> Result<()> {
        self.send(&HandshakeC2s {
            protocol_version: endpoint.protocol_version(),
            server_address: endpoint.host(),
            server_port: endpoint.port(),
            next_state,
        })
        .await
    }

    pub(crate) async fn send<P: PacketEncode>(&mut self, pkt: &P) -> Result<()> {
        self.enc.write_packet(pkt)?;
        let bytes = self.enc.take();
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Receives the next complete frame, bounded by the operation timeout.
    pub(crate) async fn recv_frame(&mut self) -> Result<PacketFrame> {
        timeout(self.io_timeout, self.read_next_frame()).await?
    }

    async fn read_next_frame(&mut self) -> Result<PacketFrame> {
        let mut buf = BytesMut::with_capacity(MAX_CHUNK_SIZE);
        loop {
            if let Some(frame) = self.dec.try_next_packet()? {
                return Ok(frame);
            }

            buf.clear();
            if self.stream.read_buf(&mut buf).await? == 0 {
                return Err(io::Error::from(ErrorKind::UnexpectedEof).into());
            }
            self.dec.queue_slice(&buf);
        }
    }

    pub(crate) async fn shutdown(mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
