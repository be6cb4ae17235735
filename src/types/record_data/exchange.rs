use crate::error::{DecodeError, EncodeError};
use crate::types::{Name, read_u16};

/// The preference-plus-target record data shared by MX, AFSDB, RT and KX.
///
/// ```text
/// 3.3.9. MX RDATA format
///
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                  PREFERENCE                   |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     /                   EXCHANGE                    /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Exchange {
  preference: u16,
  target: Name,
}

impl Exchange {
  /// Creates a new preference-plus-target record data.
  #[inline]
  pub const fn new(preference: u16, target: Name) -> Self {
    Self { preference, target }
  }

  /// Returns the preference of the target; lower values are preferred.
  #[inline]
  pub const fn preference(&self) -> u16 {
    self.preference
  }

  /// Returns the target name.
  #[inline]
  pub const fn target(&self) -> &Name {
    &self.target
  }

  pub(super) fn decode(src: &[u8], offset: usize, rdlength: usize) -> Result<Self, DecodeError> {
    if rdlength < 3 {
      return Err(DecodeError::RdataLengthMismatch {
        need: 3,
        len: rdlength,
      });
    }

    let preference = read_u16(src, offset)?;
    let (target, end) = Name::decode(src, offset + 2)?;
    if end > offset + rdlength {
      return Err(DecodeError::RdataLengthMismatch {
        need: end - offset,
        len: rdlength,
      });
    }

    Ok(Self { preference, target })
  }

  pub(super) fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    buf.extend_from_slice(&self.preference.to_be_bytes());
    self.target.encode_into(buf)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trip() {
    let mx = Exchange::new(10, Name::from("mail.local"));
    let mut buf = Vec::new();
    mx.encode_into(&mut buf).unwrap();
    assert_eq!(Exchange::decode(&buf, 0, buf.len()).unwrap(), mx);
  }

  #[test]
  fn preference_alone_is_too_short() {
    let buf = [0u8, 10];
    assert_eq!(
      Exchange::decode(&buf, 0, 2).unwrap_err(),
      DecodeError::RdataLengthMismatch { need: 3, len: 2 }
    );
  }
}
