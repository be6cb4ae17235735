use crate::error::DecodeError;

mod header;
mod message;
mod name;
mod question;
mod record;
mod record_data;
mod record_type;

pub use header::{MessageHeader, flags};
pub use message::Message;
pub use name::Name;
pub use question::Query;
pub use record::ResourceRecord;
pub use record_data::{
  DecoderTable, EdnsOption, Exchange, Nsec, RData, RdataDecoder, Soa, Srv, install_decoder_table,
};
pub use record_type::{RecordType, UnknownRecordTypeStr};

pub(crate) const MESSAGE_HEADER_SIZE: usize = 12;

/// Top two bits of a label control byte select the label type.
pub(crate) const LABEL_TYPE_MASK: u8 = 0xC0;
pub(crate) const MAX_LABEL_SIZE: usize = 63;
pub(crate) const COMPRESSION_POINTER_MASK: u16 = 0xC000;

/// RFC 6762, sections 10.2 and 18.12: the top bit of a record class is the
/// cache-flush flag, and the top bit of a question class requests a unicast
/// response.
pub(crate) const CLASS_TOP_BIT: u16 = 0x8000;
pub(crate) const CLASS_MASK: u16 = 0x7FFF;

/// The low byte of a question class carries the class value; a question
/// whose class bits are all zero is not a valid query.
pub(crate) const QCLASS_ANY: u16 = 0x00FF;

#[inline]
pub(crate) fn read_u8(src: &[u8], offset: usize) -> Result<u8, DecodeError> {
  src
    .get(offset)
    .copied()
    .ok_or(DecodeError::TruncatedMessage {
      offset,
      need: 1,
      len: src.len(),
    })
}

#[inline]
pub(crate) fn read_u16(src: &[u8], offset: usize) -> Result<u16, DecodeError> {
  if offset + 2 > src.len() {
    return Err(DecodeError::TruncatedMessage {
      offset,
      need: 2,
      len: src.len(),
    });
  }

  Ok(u16::from_be_bytes([src[offset], src[offset + 1]]))
}

#[inline]
pub(crate) fn read_u32(src: &[u8], offset: usize) -> Result<u32, DecodeError> {
  if offset + 4 > src.len() {
    return Err(DecodeError::TruncatedMessage {
      offset,
      need: 4,
      len: src.len(),
    });
  }

  Ok(u32::from_be_bytes([
    src[offset],
    src[offset + 1],
    src[offset + 2],
    src[offset + 3],
  ]))
}

/// A subset of the DNS classes, plus the query-only "any class" value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum DNSClass {
  /// Internet
  IN,
  /// CSNET (obsolete)
  CS,
  /// CHAOS
  CH,
  /// Hesiod
  HS,
  /// None, per [RFC 2136](https://tools.ietf.org/html/rfc2136)
  NONE,
  /// Not a class but a query class, meaning "all classes"
  ANY,
  /// Any class value outside the recognized set
  UNKNOWN(u16),
}

impl DNSClass {
  /// Returns the numeric class value.
  #[inline]
  pub const fn value(&self) -> u16 {
    match self {
      Self::IN => 1,
      Self::CS => 2,
      Self::CH => 3,
      Self::HS => 4,
      Self::NONE => 254,
      Self::ANY => 255,
      Self::UNKNOWN(v) => *v,
    }
  }

  /// Returns the string representation of the class.
  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::IN => "IN",
      Self::CS => "CS",
      Self::CH => "CH",
      Self::HS => "HS",
      Self::NONE => "NONE",
      Self::ANY => "ANY",
      Self::UNKNOWN(_) => "UNKNOWN",
    }
  }
}

impl From<u16> for DNSClass {
  #[inline]
  fn from(value: u16) -> Self {
    match value {
      1 => Self::IN,
      2 => Self::CS,
      3 => Self::CH,
      4 => Self::HS,
      254 => Self::NONE,
      255 => Self::ANY,
      _ => Self::UNKNOWN(value),
    }
  }
}

impl From<DNSClass> for u16 {
  #[inline]
  fn from(value: DNSClass) -> u16 {
    value.value()
  }
}

impl core::fmt::Display for DNSClass {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::UNKNOWN(v) => write!(f, "CLASS{v}"),
      _ => f.write_str(self.as_str()),
    }
  }
}
