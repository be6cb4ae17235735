#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::{
  io,
  net::{Ipv4Addr, Ipv6Addr},
};

/// The standard mDNS IPv4 multicast group.
pub const IPV4_MDNS: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);
/// The standard mDNS IPv6 multicast group.
pub const IPV6_MDNS: Ipv6Addr = Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 0xfb);
/// The standard mDNS port.
pub const MDNS_PORT: u16 = 5353;
// See RFC 6762, https://datatracker.ietf.org/doc/rfc6762/
/// The largest payload an mDNS datagram may carry.
pub const MAX_PAYLOAD_SIZE: usize = 9000;

mod error;
mod types;

pub mod net;

#[cfg(test)]
mod tests;

pub use smol_str::SmolStr;

pub use error::{DecodeError, DecoderTableInUse, EncodeError};
pub use types::{
  DNSClass, DecoderTable, EdnsOption, Exchange, Message, MessageHeader, Name, Nsec, Query, RData,
  RdataDecoder, RecordType, ResourceRecord, Soa, Srv, UnknownRecordTypeStr, flags,
  install_decoder_table,
};

/// Decodes a DNS message from the raw bytes of a datagram.
///
/// Decoding is strict: any malformed field aborts the whole decode with a
/// typed error and no partial message is returned.
///
/// ## Example
///
/// ```rust
/// use mdns_wire::decode_message;
///
/// let err = decode_message(&[0u8; 4]).unwrap_err();
/// assert_eq!(err.to_string(), "message header requires 12 bytes, only 4 available");
/// ```
#[inline]
pub fn decode_message(src: &[u8]) -> Result<Message, DecodeError> {
  Message::decode(src)
}

/// Encodes a DNS message to its wire form.
///
/// The header counts are derived from the actual section lengths, so the
/// produced bytes are always self-consistent.
#[inline]
pub fn encode_message(message: &Message) -> Result<Vec<u8>, EncodeError> {
  message.encode()
}

pub(crate) fn invalid_input_err<E>(e: E) -> io::Error
where
  E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
  io::Error::new(io::ErrorKind::InvalidInput, e)
}
