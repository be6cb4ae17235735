use crate::error::{DecodeError, EncodeError};
use crate::types::{Name, read_u16};

/// ```text
/// RFC 2782                       DNS SRV RR                  February 2000
///
/// The format of the SRV RR
///
///  _Service._Proto.Name TTL Class SRV Priority Weight Port Target
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Srv {
  priority: u16,
  weight: u16,
  port: u16,
  target: Name,
}

impl Srv {
  /// Creates a new SRV record data.
  #[inline]
  pub const fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
    Self {
      priority,
      weight,
      port,
      target,
    }
  }

  /// Returns the priority of the target host; lower values are contacted
  /// first.
  #[inline]
  pub const fn priority(&self) -> u16 {
    self.priority
  }

  /// Returns the relative weight for entries with the same priority.
  #[inline]
  pub const fn weight(&self) -> u16 {
    self.weight
  }

  /// Returns the port of the service on the target host.
  #[inline]
  pub const fn port(&self) -> u16 {
    self.port
  }

  /// Returns the domain name of the target host.
  #[inline]
  pub const fn target(&self) -> &Name {
    &self.target
  }

  pub(super) fn decode(src: &[u8], offset: usize, rdlength: usize) -> Result<Self, DecodeError> {
    if rdlength < 7 {
      return Err(DecodeError::RdataLengthMismatch {
        need: 7,
        len: rdlength,
      });
    }

    let priority = read_u16(src, offset)?;
    let weight = read_u16(src, offset + 2)?;
    let port = read_u16(src, offset + 4)?;
    let (target, end) = Name::decode(src, offset + 6)?;
    if end > offset + rdlength {
      return Err(DecodeError::RdataLengthMismatch {
        need: end - offset,
        len: rdlength,
      });
    }

    Ok(Self {
      priority,
      weight,
      port,
      target,
    })
  }

  pub(super) fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    buf.extend_from_slice(&self.priority.to_be_bytes());
    buf.extend_from_slice(&self.weight.to_be_bytes());
    buf.extend_from_slice(&self.port.to_be_bytes());
    self.target.encode_into(buf)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trip() {
    let srv = Srv::new(10, 1, 80, Name::from("testhost"));
    let mut buf = Vec::new();
    srv.encode_into(&mut buf).unwrap();
    assert_eq!(buf, b"\x00\x0A\x00\x01\x00\x50\x08testhost\x00");
    assert_eq!(Srv::decode(&buf, 0, buf.len()).unwrap(), srv);
  }

  #[test]
  fn short_rdata_is_rejected() {
    let buf = [0u8; 6];
    assert_eq!(
      Srv::decode(&buf, 0, 6).unwrap_err(),
      DecodeError::RdataLengthMismatch { need: 7, len: 6 }
    );
  }
}
