//! Java edition Server List Ping.
//!
//! Exchange, all packets framed as `VarInt length | VarInt id | body`:
//! 1. handshake `0x00` with protocol `-1`, host, port and next state `1`
//! 2. status request `0x00` with empty body, answered by a JSON status string
//! 3. ping `0x01` with an `i64` token, echoed back and used for latency

use bytes::{Buf, BufMut, BytesMut};
use serde::Deserialize;
use std::time::Instant;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};

use crate::server::{
    error::probe::ProbeError,
    model::{
        probe::{ProbeResult, StatusPayload},
        server_status::{PlayerSample, Players, Version},
    },
    util::motd,
};

/// Largest packet accepted from a server (2 MiB, the protocol limit).
const MAX_PACKET_LEN: usize = 2 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct RawStatus {
    version: RawVersion,
    players: Option<RawPlayers>,
    description: Option<serde_json::Value>,
    favicon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawVersion {
    name: String,
    protocol: i32,
}

#[derive(Debug, Deserialize)]
struct RawPlayers {
    online: i32,
    max: i32,
    sample: Option<Vec<PlayerSample>>,
}

/// Queries a Java server.
pub async fn query(host: &str, port: u16) -> ProbeResult {
    let mut stream = TcpStream::connect((host, port)).await?;
    stream.set_nodelay(true)?;

    let mut handshake = BytesMut::new();
    write_varint(&mut handshake, 0x00);
    write_varint(&mut handshake, -1);
    write_string(&mut handshake, host);
    handshake.put_u16(port);
    write_varint(&mut handshake, 1);
    write_packet(&mut stream, &handshake).await?;
    write_packet(&mut stream, &[0x00]).await?;

    let response = read_packet(&mut stream).await?;
    let mut body = &response[..];
    let packet_id = read_varint(&mut body)?;
    if packet_id != 0x00 {
        return Err(ProbeError::Protocol(format!(
            "unexpected status packet id {:#04x}",
            packet_id
        )));
    }
    let json = read_string(&mut body)?;

    // Some proxies close the connection instead of answering the ping.
    let latency_ms = ping(&mut stream).await.ok();

    parse_status(&json, latency_ms)
}

async fn ping(stream: &mut TcpStream) -> Result<u64, ProbeError> {
    let token = chrono::Utc::now().timestamp_millis();
    let started = Instant::now();

    let mut packet = BytesMut::new();
    write_varint(&mut packet, 0x01);
    packet.put_i64(token);
    write_packet(stream, &packet).await?;

    let pong = read_packet(stream).await?;
    let mut body = &pong[..];
    if read_varint(&mut body)? != 0x01 || body.remaining() < 8 || body.get_i64() != token {
        return Err(ProbeError::Protocol("invalid pong".to_string()));
    }

    Ok(started.elapsed().as_millis() as u64)
}

/// Decodes the JSON document of a status response.
pub fn parse_status(json: &str, latency_ms: Option<u64>) -> ProbeResult {
    let raw: RawStatus = serde_json::from_str(json)
        .map_err(|e| ProbeError::Protocol(format!("invalid status json: {}", e)))?;

    let players = raw
        .players
        .map(|p| Players {
            online: p.online,
            max: p.max,
            sample: p.sample.unwrap_or_default(),
        })
        .unwrap_or_default();
    let description = raw
        .description
        .as_ref()
        .map(motd::flatten_component)
        .unwrap_or_default();

    Ok(StatusPayload {
        version: Version {
            name: raw.version.name,
            protocol: raw.version.protocol,
        },
        players,
        motd: motd::render(description),
        favicon: raw.favicon,
        latency_ms,
        edition: None,
    })
}

async fn write_packet(stream: &mut TcpStream, payload: &[u8]) -> Result<(), ProbeError> {
    let mut frame = BytesMut::with_capacity(payload.len() + 5);
    write_varint(&mut frame, payload.len() as i32);
    frame.put_slice(payload);
    stream.write_all(&frame).await?;
    Ok(())
}

async fn read_packet(stream: &mut TcpStream) -> Result<Vec<u8>, ProbeError> {
    let mut length: u32 = 0;
    for position in 0..5 {
        let byte = stream.read_u8().await?;
        length |= u32::from(byte & 0x7f) << (7 * position);
        if byte & 0x80 == 0 {
            let length = length as usize;
            if length == 0 || length > MAX_PACKET_LEN {
                return Err(ProbeError::Protocol(format!(
                    "packet length {} out of range",
                    length
                )));
            }
            let mut packet = vec![0u8; length];
            stream.read_exact(&mut packet).await?;
            return Ok(packet);
        }
    }

    Err(ProbeError::Protocol("packet length varint too long".to_string()))
}

pub(crate) fn write_varint(buf: &mut BytesMut, value: i32) {
    let mut value = value as u32;
    loop {
        if value & !0x7f == 0 {
            buf.put_u8(value as u8);
            return;
        }
        buf.put_u8((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
}

pub(crate) fn read_varint(buf: &mut &[u8]) -> Result<i32, ProbeError> {
    let mut value: u32 = 0;
    for position in 0..5 {
        if !buf.has_remaining() {
            return Err(ProbeError::Protocol("truncated varint".to_string()));
        }
        let byte = buf.get_u8();
        value |= u32::from(byte & 0x7f) << (7 * position);
        if byte & 0x80 == 0 {
            return Ok(value as i32);
        }
    }

    Err(ProbeError::Protocol("varint too long".to_string()))
}

fn write_string(buf: &mut BytesMut, value: &str) {
    write_varint(buf, value.len() as i32);
    buf.put_slice(value.as_bytes());
}

fn read_string(buf: &mut &[u8]) -> Result<String, ProbeError> {
    let length = read_varint(buf)?;
    let length = usize::try_from(length)
        .map_err(|_| ProbeError::Protocol("negative string length".to_string()))?;
    if buf.remaining() < length {
        return Err(ProbeError::Protocol("truncated string".to_string()));
    }
    let value = String::from_utf8(buf[..length].to_vec())
        .map_err(|_| ProbeError::Protocol("string is not utf-8".to_string()))?;
    buf.advance(length);

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_matches_protocol_examples() {
        let cases: [(i32, &[u8]); 5] = [
            (0, &[0x00]),
            (127, &[0x7f]),
            (128, &[0x80, 0x01]),
            (25565, &[0xdd, 0xc7, 0x01]),
            (-1, &[0xff, 0xff, 0xff, 0xff, 0x0f]),
        ];

        for (value, encoded) in cases {
            let mut buf = BytesMut::new();
            write_varint(&mut buf, value);
            assert_eq!(&buf[..], encoded, "encoding {}", value);

            let mut slice = encoded;
            assert_eq!(read_varint(&mut slice).unwrap(), value);
            assert!(slice.is_empty());
        }
    }

    #[test]
    fn read_varint_rejects_truncated_input() {
        let mut slice: &[u8] = &[0x80];
        assert!(read_varint(&mut slice).is_err());
    }

    #[test]
    fn read_string_rejects_overlong_length() {
        let mut slice: &[u8] = &[0x05, b'a', b'b'];
        assert!(read_string(&mut slice).is_err());
    }

    #[test]
    fn parses_status_with_chat_component_description() {
        let json = r#"{
            "version": { "name": "Paper 1.20.4", "protocol": 765 },
            "players": {
                "online": 3,
                "max": 100,
                "sample": [{ "name": "Builder", "id": "4566e69f-c907-48ee-8d71-d7ba5aa00d20" }]
            },
            "description": { "text": "", "extra": [{ "text": "NYC", "color": "gold" }] },
            "favicon": "data:image/png;base64,AAAA"
        }"#;

        let status = parse_status(json, Some(12)).unwrap();

        assert_eq!(status.version.name, "Paper 1.20.4");
        assert_eq!(status.version.protocol, 765);
        assert_eq!(status.players.online, 3);
        assert_eq!(status.players.sample.len(), 1);
        assert_eq!(status.motd.raw, "§6NYC");
        assert_eq!(status.motd.clean, "NYC");
        assert_eq!(status.favicon.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(status.latency_ms, Some(12));
    }

    #[test]
    fn parses_status_without_players() {
        let json = r#"{ "version": { "name": "1.20.4", "protocol": 765 }, "description": "Hi" }"#;

        let status = parse_status(json, None).unwrap();

        assert_eq!(status.players.online, 0);
        assert!(status.players.sample.is_empty());
        assert_eq!(status.motd.clean, "Hi");
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_status("{\"players\":{}}", None),
            Err(ProbeError::Protocol(_))
        ));
    }
}
