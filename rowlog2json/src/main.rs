use std::sync::Arc;

use async_trait::async_trait;
use clap::{value_parser, Arg, Command};
use tokio::sync::{watch, Mutex};
use url::Url;

use mysql::BinlogCursor;
use rowlog::{ColumnInfo, Position, Streamer, TableInfo, TableMapper, TableName};

#[tokio::main]
async fn main() {
  env_logger::init();

  let mut cmd = Command::new("rowlog2json")
    .version("1.0")
    .about("Streams MySQL row-binlog transactions as JSON lines")
    .arg(Arg::new("url").required(true).short('u').long("url").value_parser(Url::parse))
    .arg(
      Arg::new("server-id")
        .long("server-id")
        .default_value("1234")
        .value_parser(value_parser!(u32)),
    )
    .arg(
      Arg::new("binlog-cursor")
        .long("binlog-cursor")
        .value_parser(str::parse::<BinlogCursor>),
    );

  let mut matches = cmd.get_matches_mut();

  let url = matches.remove_one::<Url>("url").unwrap();
  let server_id = matches.remove_one::<u32>("server-id").unwrap();
  let binlog_cursor = matches.remove_one::<BinlogCursor>("binlog-cursor");

  let mut conn = match mysql::Connection::connect_from_url(&url).await {
    Ok(conn) => conn,
    Err(err) => {
      log::error!("failed to connect to {}: {}", url, err);
      std::process::exit(1);
    }
  };

  match binlog_format(&mut conn).await {
    Ok(format) if format == "ROW" => {}
    Ok(format) => {
      log::error!("binlog_format is {}, only ROW is supported", format);
      std::process::exit(1);
    }
    Err(err) => {
      log::error!("failed to read binlog_format: {}", err);
      std::process::exit(1);
    }
  }

  let binlog_cursor = match binlog_cursor {
    Some(binlog_cursor) => binlog_cursor,
    None => match conn.binlog_cursor().await {
      Ok(binlog_cursor) => binlog_cursor,
      Err(err) => {
        log::error!("failed to read master status: {}", err);
        std::process::exit(1);
      }
    },
  };
  log::info!("starting from {}", binlog_cursor);

  // The remaining lookups share this side connection; the dump itself runs
  // on its own.
  let mapper = DescribeMapper { conn: Mutex::new(conn) };

  let streamer = Streamer::new(url.as_str(), server_id, Arc::new(mapper));
  streamer.set_binlog_position(Position::new(
    binlog_cursor.log_file.clone(),
    i64::from(binlog_cursor.log_position),
  ));

  let (cancel, shutdown) = watch::channel(false);
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      let _ = cancel.send(true);
    }
  });

  let result = streamer
    .stream(shutdown, |tran| {
      println!("{}", serde_json::to_string(&tran)?);
      Ok(())
    })
    .await;

  if let Err(err) = result {
    log::error!("stream failed at {}: {}", streamer.binlog_position(), err);
    std::process::exit(1);
  }
  if let Some(err) = streamer.error() {
    log::error!("stream failed at {}: {}", streamer.binlog_position(), err);
    std::process::exit(1);
  }
  log::info!("stream ended at {}", streamer.binlog_position());
}

async fn binlog_format(conn: &mut mysql::Connection) -> std::io::Result<String> {
  let results = conn.query("SHOW VARIABLES LIKE 'binlog_format'").await?;
  let format = results
    .rows()
    .and_then(|mut rows| rows.next())
    .and_then(|row| row[1].clone())
    .unwrap_or_default();
  Ok(format)
}

/// Resolves tables with `DESCRIBE`, marking integer columns whose type
/// mentions `unsigned`.
struct DescribeMapper {
  conn: Mutex<mysql::Connection>,
}

#[async_trait]
impl TableMapper for DescribeMapper {
  async fn mysql_table(&self, name: &TableName) -> Result<TableInfo, Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = self.conn.lock().await;
    let results = conn.query(format!("DESC {}", name)).await?;

    let mut columns = Vec::new();
    if let Some(rows) = results.rows() {
      for row in rows {
        let field = row[0].clone().unwrap_or_default();
        let column_type = row[1].clone().unwrap_or_default();
        columns.push(ColumnInfo {
          field,
          is_unsigned: column_type.contains("unsigned"),
        });
      }
    }

    Ok(TableInfo {
      name: name.clone(),
      columns,
    })
  }
}
