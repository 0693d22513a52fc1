//! Bedrock edition status via the RakNet unconnected ping.
//!
//! Request `0x01`: `i64 time | 16 byte magic | i64 client guid`.
//! Reply `0x1c`: `i64 time | i64 server guid | magic | u16 length | advertisement`,
//! where the advertisement is `edition;motd;protocol;version;online;max;server id;motd2;...`.

use bytes::{Buf, BufMut, BytesMut};
use std::time::Instant;
use tokio::net::{lookup_host, UdpSocket};

use crate::server::{
    error::probe::ProbeError,
    model::{
        probe::{ProbeResult, StatusPayload},
        server_status::{Players, Version},
    },
    util::motd,
};

const UNCONNECTED_PING: u8 = 0x01;
const UNCONNECTED_PONG: u8 = 0x1c;
const OFFLINE_MESSAGE_MAGIC: [u8; 16] = [
    0x00, 0xff, 0xff, 0x00, 0xfe, 0xfe, 0xfe, 0xfe, 0xfd, 0xfd, 0xfd, 0xfd, 0x12, 0x34, 0x56,
    0x78,
];

/// Queries a Bedrock server.
pub async fn query(host: &str, port: u16) -> ProbeResult {
    let target = lookup_host((host, port))
        .await?
        .next()
        .ok_or_else(|| ProbeError::InvalidAddress(format!("{}:{}", host, port)))?;
    let bind = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };

    let socket = UdpSocket::bind(bind).await?;
    socket.connect(target).await?;

    let started = Instant::now();
    let mut packet = BytesMut::with_capacity(33);
    packet.put_u8(UNCONNECTED_PING);
    packet.put_i64(chrono::Utc::now().timestamp_millis());
    packet.put_slice(&OFFLINE_MESSAGE_MAGIC);
    packet.put_i64(rand::random::<i64>());
    socket.send(&packet).await?;

    let mut buf = vec![0u8; 1500];
    let len = socket.recv(&mut buf).await?;
    let latency_ms = started.elapsed().as_millis() as u64;

    parse_pong(&buf[..len], Some(latency_ms))
}

/// Decodes an unconnected pong datagram.
pub fn parse_pong(datagram: &[u8], latency_ms: Option<u64>) -> ProbeResult {
    let mut buf = datagram;
    if buf.remaining() < 1 + 8 + 8 + 16 + 2 {
        return Err(ProbeError::Protocol("truncated pong".to_string()));
    }
    if buf.get_u8() != UNCONNECTED_PONG {
        return Err(ProbeError::Protocol("unexpected packet id".to_string()));
    }
    buf.advance(16); // ping time and server guid
    if buf[..16] != OFFLINE_MESSAGE_MAGIC {
        return Err(ProbeError::Protocol("bad offline message magic".to_string()));
    }
    buf.advance(16);

    let length = buf.get_u16() as usize;
    if buf.remaining() < length {
        return Err(ProbeError::Protocol("truncated advertisement".to_string()));
    }
    let advertisement = std::str::from_utf8(&buf[..length])
        .map_err(|_| ProbeError::Protocol("advertisement is not utf-8".to_string()))?;

    parse_advertisement(advertisement, latency_ms)
}

/// Decodes the `;`-separated server advertisement.
pub fn parse_advertisement(advertisement: &str, latency_ms: Option<u64>) -> ProbeResult {
    let fields: Vec<&str> = advertisement.split(';').collect();
    if fields.len() < 6 {
        return Err(ProbeError::Protocol(format!(
            "advertisement has {} fields",
            fields.len()
        )));
    }

    let number = |index: usize| -> Result<i32, ProbeError> {
        fields[index]
            .trim()
            .parse::<i32>()
            .map_err(|_| ProbeError::Protocol(format!("field {} is not a number", index)))
    };

    let mut raw_motd = fields[1].to_string();
    if let Some(second_line) = fields.get(7).filter(|line| !line.is_empty()) {
        raw_motd.push('\n');
        raw_motd.push_str(second_line);
    }

    Ok(StatusPayload {
        version: Version {
            name: fields[3].to_string(),
            protocol: number(2)?,
        },
        players: Players {
            online: number(4)?,
            max: number(5)?,
            sample: Vec::new(),
        },
        motd: motd::render(raw_motd),
        favicon: None,
        latency_ms,
        edition: Some(fields[0].to_string()),
    })
}
