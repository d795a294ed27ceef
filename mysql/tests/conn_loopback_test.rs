//! Drives `Connection` against a scripted MySQL server on a loopback
//! socket: handshake, authentication, the replication setup statement, and
//! the binlog dump subprotocol with its OK/EOF packet framing.

use std::io;
use std::time::Duration;

use bytes::{Buf, BufMut, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

use mysql::binlog::BinlogEvent;
use mysql::fake::{new_mysql56_binlog_format, new_rotate_event, FakeBinlogStream};
use mysql::{Connection, ConnectionOptions};

const CLIENT_LONG_PASSWORD: u32 = 0x00000001;
const CLIENT_LONG_FLAG: u32 = 0x00000004;
const CLIENT_PROTOCOL_41: u32 = 0x00000200;
const CLIENT_RESERVED2: u32 = 0x00008000;
const CLIENT_PLUGIN_AUTH: u32 = 0x00080000;
const CLIENT_PLUGIN_AUTH_LENENC_CLIENT_DATA: u32 = 0x00200000;
const CLIENT_DEPRECATE_EOF: u32 = 0x01000000;

async fn write_packet(socket: &mut TcpStream, sequence_id: u8, payload: &[u8]) -> io::Result<()> {
  let mut b = BytesMut::with_capacity(4 + payload.len());
  b.put_uint_le(payload.len() as u64, 3);
  b.put_u8(sequence_id);
  b.put(payload);
  socket.write_all(&b).await?;
  socket.flush().await
}

async fn read_packet(socket: &mut TcpStream) -> io::Result<(u8, Vec<u8>)> {
  let mut header = [0_u8; 4];
  socket.read_exact(&mut header).await?;
  let mut header = &header[..];
  let payload_len = header.get_uint_le(3) as usize;
  let sequence_id = header.get_u8();
  let mut payload = vec![0; payload_len];
  socket.read_exact(&mut payload).await?;
  Ok((sequence_id, payload))
}

// Protocol 10 greeting advertising mysql_native_password and the 4.1
// protocol, with the scramble split across its two fields.
fn initial_handshake() -> Vec<u8> {
  let capabilities = CLIENT_LONG_PASSWORD
    | CLIENT_LONG_FLAG
    | CLIENT_PROTOCOL_41
    | CLIENT_RESERVED2
    | CLIENT_PLUGIN_AUTH
    | CLIENT_PLUGIN_AUTH_LENENC_CLIENT_DATA
    | CLIENT_DEPRECATE_EOF;

  let mut b = BytesMut::new();
  b.put_u8(0x0a);
  b.put(&b"5.6.33-log\0"[..]);
  b.put_u32_le(7); // connection id
  b.put(&b"12345678"[..]); // scramble part 1
  b.put_u8(0);
  b.put_u16_le(capabilities as u16);
  b.put_u8(0x21); // utf8
  b.put_u16_le(0x0002); // autocommit
  b.put_u16_le((capabilities >> 16) as u16);
  b.put_u8(21); // auth plugin data length
  b.put(&[0_u8; 10][..]);
  b.put(&b"901234567890"[..]); // scramble part 2
  b.put_u8(0);
  b.put(&b"mysql_native_password\0"[..]);
  b.to_vec()
}

fn ok_payload() -> Vec<u8> {
  // header, affected rows, last insert id, status flags, warnings
  vec![0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00]
}

// The server side of the scripted exchange. Returns once the whole dump has
// been streamed.
async fn serve_replication(listener: TcpListener, event: BinlogEvent) -> io::Result<()> {
  let (mut socket, _) = listener.accept().await?;

  write_packet(&mut socket, 0, &initial_handshake()).await?;
  let (sequence_id, _response) = read_packet(&mut socket).await?;
  assert_eq!(1, sequence_id);
  write_packet(&mut socket, 2, &ok_payload()).await?;

  // SET @master_binlog_checksum=@@global.binlog_checksum
  let (sequence_id, command) = read_packet(&mut socket).await?;
  assert_eq!(0, sequence_id);
  assert_eq!(0x03, command[0]);
  assert_eq!(
    b"SET @master_binlog_checksum=@@global.binlog_checksum"[..],
    command[1..]
  );
  write_packet(&mut socket, 1, &ok_payload()).await?;

  // COM_BINLOG_DUMP: offset, flags, server id, filename
  let (sequence_id, command) = read_packet(&mut socket).await?;
  assert_eq!(0, sequence_id);
  assert_eq!(0x12, command[0]);
  let mut dump = &command[1..];
  assert_eq!(4, dump.get_u32_le());
  assert_eq!(0, dump.get_u16_le());
  assert_eq!(1234, dump.get_u32_le());
  assert_eq!(b"binlog.000005"[..], dump.chunk()[..]);

  let mut packet = BytesMut::with_capacity(1 + event.bytes().len());
  packet.put_u8(0x00);
  packet.put(event.bytes());
  write_packet(&mut socket, 1, &packet).await?;
  write_packet(&mut socket, 2, &[0xFE]).await?;

  Ok(())
}

#[tokio::test]
async fn dumps_binlog_events_over_a_loopback_connection() {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();

  let f = new_mysql56_binlog_format();
  let s = FakeBinlogStream::new();
  let rotate = new_rotate_event(&f, &s, 4, "binlog.000005");

  let server = tokio::spawn(serve_replication(listener, rotate.clone()));

  let options = ConnectionOptions {
    user: "replicator".to_string(),
    password: Some("secret".to_string()),
    ..Default::default()
  };

  let run = async {
    let mut conn = Connection::connect_tcp(vec![addr], options).await.unwrap();
    conn
      .execute("SET @master_binlog_checksum=@@global.binlog_checksum")
      .await
      .unwrap();
    conn.dump_binlog(1234, 4, "binlog.000005", 0).await.unwrap();

    // First reply is an event packet behind the OK discriminator.
    let payload = conn.read_payload().await.unwrap();
    assert_eq!(Some(&0x00), payload.first());
    let ev = BinlogEvent::new(payload.slice(1..));
    assert!(ev.is_valid());
    assert!(ev.is_rotate());
    assert_eq!(rotate.bytes(), ev.bytes());

    // Then the server signals end of stream.
    let payload = conn.read_payload().await.unwrap();
    assert_eq!(Some(&0xFE), payload.first());
  };
  timeout(Duration::from_secs(5), run).await.unwrap();

  timeout(Duration::from_secs(5), server).await.unwrap().unwrap().unwrap();
}
