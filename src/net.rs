//! The mDNS transport surrounding the codec: multicast socket setup and a
//! callback-driven capture loop.

use std::{
  io,
  net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket as StdUdpSocket},
  sync::atomic::{AtomicBool, Ordering},
  thread,
  time::Duration,
};

use smallvec_wrapper::XXLargeVec;
use socket2::{Domain, Protocol, Socket, Type};
use triomphe::Arc;

use crate::{IPV4_MDNS, IPV6_MDNS, MAX_PAYLOAD_SIZE, MDNS_PORT, Message, Query, invalid_input_err};

/// How often the capture loop wakes up to check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn multicast_udp4_socket(ifi: Option<Ipv4Addr>, port: u16) -> io::Result<StdUdpSocket> {
  let sock = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
  sock.set_reuse_address(true)?;
  #[cfg(not(windows))]
  sock.set_reuse_port(true)?;
  let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, port).into();
  sock.bind(&addr.into())?;

  if let Some(ifi) = ifi {
    if !ifi.is_unspecified() {
      sock.set_multicast_if_v4(&ifi)?;
    }
  }

  sock.set_multicast_loop_v4(true)?;
  sock.join_multicast_v4(&IPV4_MDNS, &ifi.unwrap_or(Ipv4Addr::UNSPECIFIED))?;

  Ok(StdUdpSocket::from(sock))
}

fn multicast_udp6_socket(ifi: Option<u32>, port: u16) -> io::Result<StdUdpSocket> {
  let sock = Socket::new(Domain::IPV6, Type::DGRAM, Some(Protocol::UDP))?;
  sock.set_reuse_address(true)?;
  #[cfg(not(windows))]
  sock.set_reuse_port(true)?;
  sock.set_only_v6(true)?;
  let addr: SocketAddr = (Ipv6Addr::UNSPECIFIED, port).into();
  sock.bind(&addr.into())?;

  if let Some(ifi) = ifi {
    if ifi != 0 {
      sock.set_multicast_if_v6(ifi)?;
    }
  }

  sock.set_multicast_loop_v6(true)?;
  sock.join_multicast_v6(&IPV6_MDNS, ifi.unwrap_or(0))?;

  Ok(StdUdpSocket::from(sock))
}

/// A callback invoked for every successfully decoded datagram.
pub type Handler = Box<dyn Fn(&Message, SocketAddr) + Send + Sync + 'static>;

/// A caller-owned multicast listener.
///
/// The listener joins the mDNS group on construction, holds an explicit list
/// of registered handlers, and dispatches every decoded message to all of
/// them. A datagram which fails to decode is logged and skipped; the capture
/// loop never dies on malformed input.
///
/// ## Example
///
/// ```rust,no_run
/// use mdns_wire::net::Listener;
/// use mdns_wire::{Message, Query, RecordType};
///
/// # fn main() -> std::io::Result<()> {
/// let mut listener = Listener::v4(None)?;
/// listener.register(|message: &Message, from| {
///   println!("{from}: {} answers", message.answers().len());
/// });
/// listener.send_query(Query::new("_services._dns-sd._udp.local").with_query_type(RecordType::PTR))?;
/// listener.run();
/// # Ok(())
/// # }
/// ```
pub struct Listener {
  socket: StdUdpSocket,
  group: SocketAddr,
  handlers: Vec<Handler>,
  shutdown: Arc<AtomicBool>,
}

/// Stops a running [`Listener`].
#[derive(Debug, Clone)]
pub struct Shutdown {
  flag: Arc<AtomicBool>,
}

impl Shutdown {
  /// Asks the capture loop to exit.
  pub fn shutdown(&self) {
    self.flag.store(true, Ordering::Relaxed);
  }
}

impl Listener {
  /// Creates a listener joined to the IPv4 group `224.0.0.251:5353`,
  /// optionally bound to a specific interface.
  pub fn v4(ifi: Option<Ipv4Addr>) -> io::Result<Self> {
    let socket = multicast_udp4_socket(ifi, MDNS_PORT)?;
    Self::from_socket(socket, (IPV4_MDNS, MDNS_PORT).into())
  }

  /// Creates a listener joined to the IPv6 group `[ff02::fb]:5353`,
  /// optionally bound to a specific interface index.
  pub fn v6(ifi: Option<u32>) -> io::Result<Self> {
    let socket = multicast_udp6_socket(ifi, MDNS_PORT)?;
    Self::from_socket(socket, (IPV6_MDNS, MDNS_PORT).into())
  }

  fn from_socket(socket: StdUdpSocket, group: SocketAddr) -> io::Result<Self> {
    socket.set_read_timeout(Some(POLL_INTERVAL))?;
    Ok(Self {
      socket,
      group,
      handlers: Vec::new(),
      shutdown: Arc::new(AtomicBool::new(false)),
    })
  }

  /// Returns the local address of the underlying socket.
  pub fn local_addr(&self) -> io::Result<SocketAddr> {
    self.socket.local_addr()
  }

  /// Registers a handler called for every decoded message.
  pub fn register<F>(&mut self, handler: F)
  where
    F: Fn(&Message, SocketAddr) + Send + Sync + 'static,
  {
    self.handlers.push(Box::new(handler));
  }

  /// Encodes a one-question query message and multicasts it to the group.
  pub fn send_query(&self, query: Query) -> io::Result<()> {
    let buf = Message::query(0, 0, vec![query])
      .encode()
      .map_err(invalid_input_err)?;
    self.socket.send_to(&buf, self.group).map(|_| ())
  }

  /// Returns a handle which stops [`run`](Listener::run) from another
  /// thread.
  pub fn shutdown_handle(&self) -> Shutdown {
    Shutdown {
      flag: self.shutdown.clone(),
    }
  }

  /// Runs the capture loop on the calling thread until shut down.
  pub fn run(self) {
    let mut buf = XXLargeVec::with_capacity(MAX_PAYLOAD_SIZE);
    buf.resize(MAX_PAYLOAD_SIZE, 0);

    loop {
      if self.shutdown.load(Ordering::Relaxed) {
        tracing::info!("mdns listener: shutting down");
        return;
      }

      let (len, addr) = match self.socket.recv_from(&mut buf[..]) {
        Ok(received) => received,
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
          continue;
        }
        Err(e) => {
          tracing::error!(err=%e, "mdns listener: failed to receive from UDP socket");
          continue;
        }
      };

      if len == 0 {
        continue;
      }

      let data = &buf[..len];
      tracing::trace!(from=%addr, data=?data, "mdns listener: received packet");

      // One malformed datagram never stops the capture.
      match Message::decode(data) {
        Ok(message) => {
          for handler in &self.handlers {
            handler(&message, addr);
          }
        }
        Err(e) => {
          tracing::warn!(from=%addr, err=%e, "mdns listener: failed to decode packet");
        }
      }
    }
  }

  /// Spawns the capture loop on a new thread.
  pub fn spawn(self) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
      .name("mdns-listener".into())
      .spawn(move || self.run())
  }
}
