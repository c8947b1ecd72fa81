use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sounder::proto::{
    HandshakeC2s, HandshakeNextState, PacketDecoder, PacketFrame, PacketState, ProtoError,
    Result as ProtoResult, StatusPingC2s, StatusPongS2c, StatusRequestC2s, StatusResponseS2c,
    encode_packet,
};

const TRUNCATE_LEN: usize = 4;

const STATUS_JSON: &str = "{\"version\":{\"name\":\"1.20.4\",\"protocol\":765},\"players\":{\"max\":10,\"online\":0},\"description\":{\"text\":\"sounder\"}}";

enum PacketRef<'a> {
    Handshake(HandshakeC2s<'a>),
    StatusRequest(StatusRequestC2s),
    StatusPing(StatusPingC2s),
    StatusResponse(StatusResponseS2c<'a>),
    StatusPong(StatusPongS2c),
}

impl<'a> PacketRef<'a> {
    fn encode_into(&self, out: &mut Vec<u8>) -> ProtoResult<()> {
        match self {
            PacketRef::Handshake(packet) => encode_packet(out, packet),
            PacketRef::StatusRequest(packet) => encode_packet(out, packet),
            PacketRef::StatusPing(packet) => encode_packet(out, packet),
            PacketRef::StatusResponse(packet) => encode_packet(out, packet),
            PacketRef::StatusPong(packet) => encode_packet(out, packet),
        }
    }
}

struct PacketEntry<'a> {
    packet: PacketRef<'a>,
    decode: fn(&PacketFrame) -> ProtoResult<()>,
}

struct EncodedPacket {
    bytes: Vec<u8>,
    decode: fn(&PacketFrame) -> ProtoResult<()>,
}

fn decode_handshake(frame: &PacketFrame) -> ProtoResult<()> {
    let decoded = frame.decode_serverbound(PacketState::Handshaking)?;
    black_box(decoded);
    Ok(())
}

fn decode_serverbound_status(frame: &PacketFrame) -> ProtoResult<()> {
    let decoded = frame.decode_serverbound(PacketState::Status)?;
    black_box(decoded);
    Ok(())
}

fn decode_clientbound_status(frame: &PacketFrame) -> ProtoResult<()> {
    let decoded = frame.decode_clientbound(PacketState::Status)?;
    black_box(decoded);
    Ok(())
}

fn packet_entries() -> Vec<PacketEntry<'static>> {
    vec![
        PacketEntry {
            packet: PacketRef::Handshake(HandshakeC2s {
                protocol_version: 765,
                server_address: "localhost",
                server_port: 25565,
                next_state: HandshakeNextState::Status,
            }),
            decode: decode_handshake,
        },
        PacketEntry {
            packet: PacketRef::StatusRequest(StatusRequestC2s),
            decode: decode_serverbound_status,
        },
        PacketEntry {
            packet: PacketRef::StatusPing(StatusPingC2s { payload: 1_234_567 }),
            decode: decode_serverbound_status,
        },
        PacketEntry {
            packet: PacketRef::StatusResponse(StatusResponseS2c { json: STATUS_JSON }),
            decode: decode_clientbound_status,
        },
        PacketEntry {
            packet: PacketRef::StatusPong(StatusPongS2c { payload: 1_234_567 }),
            decode: decode_clientbound_status,
        },
    ]
}

fn bench_encode_round_robin(c: &mut Criterion) {
    let packets = packet_entries();
    let mut idx = 0usize;
    let mut out = Vec::with_capacity(256);

    c.bench_function("encode_round_robin", |b| {
        b.iter(|| {
            let entry = &packets[idx];
            idx = (idx + 1) % packets.len();
            out.clear();
            entry.packet.encode_into(&mut out).unwrap();
            black_box(&out);
        })
    });
}

fn bench_decode_round_robin(c: &mut Criterion) {
    let packets = packet_entries();
    let encoded: Vec<EncodedPacket> = packets
        .into_iter()
        .map(|entry| {
            let mut bytes = Vec::new();
            entry.packet.encode_into(&mut bytes).unwrap();
            EncodedPacket {
                bytes,
                decode: entry.decode,
            }
        })
        .collect();

    let mut idx = 0usize;
    let mut decoder = PacketDecoder::new();

    c.bench_function("decode_round_robin", |b| {
        b.iter(|| {
            let entry = &encoded[idx];
            idx = (idx + 1) % encoded.len();
            decoder.queue_slice(&entry.bytes);
            let frame = decoder.try_next_packet().unwrap().unwrap();
            (entry.decode)(&frame).unwrap();
            black_box(frame);
        })
    });
}

fn bench_truncated_body_error(c: &mut Criterion) {
    let packet = StatusResponseS2c { json: STATUS_JSON };
    let mut bytes = Vec::new();
    encode_packet(&mut bytes, &packet).unwrap();

    let mut decoder = PacketDecoder::new();
    decoder.queue_slice(&bytes);
    let frame = decoder.try_next_packet().unwrap().unwrap();

    c.bench_function("truncated_body_error", |b| {
        b.iter(|| {
            let truncated = PacketFrame {
                id: frame.id,
                body: frame.body[..TRUNCATE_LEN].to_vec(),
            };
            let errored = matches!(
                decode_clientbound_status(&truncated),
                Err(ProtoError::UnexpectedEof)
            );
            black_box(errored);
        })
    });
}

criterion_group!(
    benches,
    bench_encode_round_robin,
    bench_decode_round_robin,
    bench_truncated_body_error
);
criterion_main!(benches);
