use crate::error::{DecodeError, EncodeError};
use crate::types::{Name, read_u32};

/// The start-of-authority record data: the primary server, the responsible
/// mailbox, and the zone timers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Soa {
  mname: Name,
  rname: Name,
  serial: u32,
  refresh: u32,
  retry: u32,
  expire: u32,
  minimum: u32,
}

impl Soa {
  /// Creates a new SOA record data.
  #[inline]
  pub const fn new(
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
  ) -> Self {
    Self {
      mname,
      rname,
      serial,
      refresh,
      retry,
      expire,
      minimum,
    }
  }

  /// Returns the name of the primary server for the zone.
  #[inline]
  pub const fn mname(&self) -> &Name {
    &self.mname
  }

  /// Returns the mailbox of the person responsible for the zone.
  #[inline]
  pub const fn rname(&self) -> &Name {
    &self.rname
  }

  /// Returns the zone serial number.
  #[inline]
  pub const fn serial(&self) -> u32 {
    self.serial
  }

  /// Returns the refresh interval in seconds.
  #[inline]
  pub const fn refresh(&self) -> u32 {
    self.refresh
  }

  /// Returns the retry interval in seconds.
  #[inline]
  pub const fn retry(&self) -> u32 {
    self.retry
  }

  /// Returns the expire limit in seconds.
  #[inline]
  pub const fn expire(&self) -> u32 {
    self.expire
  }

  /// Returns the minimum ttl for records in the zone.
  #[inline]
  pub const fn minimum(&self) -> u32 {
    self.minimum
  }

  pub(super) fn decode(src: &[u8], offset: usize, rdlength: usize) -> Result<Self, DecodeError> {
    let region = offset + rdlength;
    let (mname, index) = Name::decode(src, offset)?;
    if index > region {
      return Err(DecodeError::RdataLengthMismatch {
        need: index - offset,
        len: rdlength,
      });
    }

    let (rname, index) = Name::decode(src, index)?;
    if index + 20 > region {
      return Err(DecodeError::RdataLengthMismatch {
        need: index + 20 - offset,
        len: rdlength,
      });
    }

    Ok(Self {
      mname,
      rname,
      serial: read_u32(src, index)?,
      refresh: read_u32(src, index + 4)?,
      retry: read_u32(src, index + 8)?,
      expire: read_u32(src, index + 12)?,
      minimum: read_u32(src, index + 16)?,
    })
  }

  pub(super) fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    self.mname.encode_into(buf)?;
    self.rname.encode_into(buf)?;
    buf.extend_from_slice(&self.serial.to_be_bytes());
    buf.extend_from_slice(&self.refresh.to_be_bytes());
    buf.extend_from_slice(&self.retry.to_be_bytes());
    buf.extend_from_slice(&self.expire.to_be_bytes());
    buf.extend_from_slice(&self.minimum.to_be_bytes());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trip() {
    let soa = Soa::new(
      Name::from("ns1.local"),
      Name::from("hostmaster.local"),
      2024010101,
      7200,
      900,
      1209600,
      120,
    );
    let mut buf = Vec::new();
    soa.encode_into(&mut buf).unwrap();
    assert_eq!(Soa::decode(&buf, 0, buf.len()).unwrap(), soa);
  }

  #[test]
  fn timers_must_fit_rdlength() {
    let soa = Soa::new(Name::from("a"), Name::from("b"), 1, 2, 3, 4, 5);
    let mut buf = Vec::new();
    soa.encode_into(&mut buf).unwrap();

    assert!(matches!(
      Soa::decode(&buf, 0, buf.len() - 1),
      Err(DecodeError::RdataLengthMismatch { .. })
    ));
  }
}
