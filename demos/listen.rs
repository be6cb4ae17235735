use std::net::SocketAddr;

use mdns_wire::net::Listener;
use mdns_wire::{Message, Query, RecordType};

fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mdns_wire=info".into()),
    )
    .init();

  let mut listener = Listener::v4(None)?;
  listener.register(|message: &Message, from: SocketAddr| {
    for record in message.records() {
      println!(
        "{from}: {} {} ttl={} {:?}",
        record.name(),
        record.record_type(),
        record.ttl(),
        record.rdata(),
      );
    }
  });

  listener.send_query(Query::new("_services._dns-sd._udp.local").with_query_type(RecordType::PTR))?;
  listener.run();
  Ok(())
}
