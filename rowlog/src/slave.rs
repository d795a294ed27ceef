use std::io;

use async_trait::async_trait;
use bytes::Bytes;
use mysql::binlog::BinlogEvent;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::Error;
use crate::position::Position;

// First byte of every dump reply packet.
const PACKET_EOF: u8 = 0xFE;
const PACKET_ERR: u8 = 0xFF;

/// The narrow interface the replication session consumes from a MySQL
/// client connection.
#[async_trait]
pub trait DumpConn: Send {
  /// Idempotent; unblocks any pending read.
  async fn close(&mut self) -> io::Result<()>;

  /// Executes a simple statement, failing if the server rejects it.
  async fn execute(&mut self, sql: &str) -> io::Result<()>;

  /// Issues the replication dump request.
  async fn notice_dump(&mut self, server_id: u32, offset: u32, filename: &str, flags: u16) -> io::Result<()>;

  /// Returns the next framed packet, length >= 1.
  async fn read_packet(&mut self) -> io::Result<Bytes>;

  /// Interprets a protocol error packet.
  fn handle_error_packet(&mut self, payload: Bytes) -> io::Error;
}

#[async_trait]
impl DumpConn for mysql::Connection {
  async fn close(&mut self) -> io::Result<()> {
    // The connection is no longer in duplex mode once the dump started, so
    // shut the stream down instead of sending COM_QUIT.
    self.shutdown().await
  }

  async fn execute(&mut self, sql: &str) -> io::Result<()> {
    mysql::Connection::execute(self, sql).await
  }

  async fn notice_dump(&mut self, server_id: u32, offset: u32, filename: &str, flags: u16) -> io::Result<()> {
    self.dump_binlog(server_id, offset, filename, flags).await
  }

  async fn read_packet(&mut self) -> io::Result<Bytes> {
    self.read_payload().await
  }

  fn handle_error_packet(&mut self, payload: Bytes) -> io::Error {
    mysql::Connection::handle_error_packet(self, payload)
  }
}

/// Pretends to be a replica: runs the one required setup statement, sends
/// the binlog dump request, then feeds decoded events to a bounded channel
/// until an error, EOF, or cancellation.
pub(crate) struct SlaveConnection<C> {
  dc: C,
}

impl<C: DumpConn + 'static> SlaveConnection<C> {
  /// Takes ownership of a fresh dump connection and prepares it for
  /// replication. The connection is closed when preparation fails.
  pub async fn new(mut dc: C) -> Result<Self, Error> {
    if let Err(err) = dc.execute("SET @master_binlog_checksum=@@global.binlog_checksum").await {
      let _ = dc.close().await;
      return Err(Error::Conn(err));
    }
    Ok(Self { dc })
  }

  /// Sends the dump request for `pos` and spawns the producer. Events arrive
  /// in server order on the first channel; the single terminal error lands
  /// on the second. Both close when the producer exits, and the producer
  /// closes the connection exactly once on every exit path.
  pub async fn start_dump(
    self,
    mut shutdown: watch::Receiver<bool>,
    server_id: u32,
    pos: Position,
  ) -> Result<(mpsc::Receiver<BinlogEvent>, mpsc::Receiver<Error>, JoinHandle<()>), Error> {
    let mut dc = self.dc;

    log::info!("sending binlog dump command: start position: {} server id: {}", pos, server_id);
    if let Err(err) = dc.notice_dump(server_id, pos.offset as u32, &pos.filename, 0).await {
      let _ = dc.close().await;
      return Err(Error::Conn(err));
    }

    let (event_tx, event_rx) = mpsc::channel(1);
    let (err_tx, err_rx) = mpsc::channel(1);

    let handle = tokio::spawn(async move {
      loop {
        let ev = tokio::select! {
          res = read_binlog_event(&mut dc) => match res {
            Ok(ev) => ev,
            Err(err) => {
              if !err.is_benign() {
                log::error!("binlog dump read failed: {}", err);
              }
              let _ = err_tx.try_send(err);
              break;
            }
          },
          _ = cancelled(&mut shutdown) => {
            log::info!("binlog dump cancelled while reading");
            let _ = err_tx.try_send(Error::Cancelled);
            break;
          }
          _ = event_tx.closed() => {
            log::debug!("event receiver dropped, stopping dump");
            let _ = err_tx.try_send(Error::Cancelled);
            break;
          }
        };

        tokio::select! {
          res = event_tx.send(ev) => {
            if res.is_err() {
              // The consumer went away; same exit as a cancellation.
              let _ = err_tx.try_send(Error::Cancelled);
              break;
            }
          }
          _ = cancelled(&mut shutdown) => {
            log::info!("binlog dump cancelled while delivering");
            let _ = err_tx.try_send(Error::Cancelled);
            break;
          }
        }
      }

      match dc.close().await {
        Ok(()) => log::info!("closed dump connection to unblock reads"),
        Err(err) => log::debug!("closing dump connection: {}", err),
      }
    });

    Ok((event_rx, err_rx, handle))
  }
}

// Resolves when the cancellation signal fires. A dropped sender can never
// signal again; park forever in that case.
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
  if shutdown.wait_for(|v| *v).await.is_err() {
    std::future::pending::<()>().await;
  }
}

async fn read_binlog_event<C: DumpConn>(dc: &mut C) -> Result<BinlogEvent, Error> {
  let buf = dc.read_packet().await.map_err(Error::ReadPacket)?;
  match buf.first() {
    Some(&PACKET_EOF) => Err(Error::StreamEof),
    Some(&PACKET_ERR) => Err(Error::Protocol(dc.handle_error_packet(buf))),
    Some(_) => Ok(BinlogEvent::new(buf.slice(1..))),
    None => Err(Error::ReadPacket(io::Error::new(
      io::ErrorKind::UnexpectedEof,
      "empty packet from dump connection",
    ))),
  }
}
