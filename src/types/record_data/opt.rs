use triomphe::Arc;

use crate::error::{DecodeError, EncodeError};
use crate::types::read_u16;

/// One EDNS0 option of an OPT pseudo-record: an option code and its opaque
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdnsOption {
  code: u16,
  data: Arc<[u8]>,
}

impl EdnsOption {
  /// Creates a new EDNS0 option.
  #[inline]
  pub fn new(code: u16, data: Vec<u8>) -> Self {
    Self {
      code,
      data: Arc::from(data),
    }
  }

  /// Returns the option code.
  #[inline]
  pub const fn code(&self) -> u16 {
    self.code
  }

  /// Returns the option payload.
  #[inline]
  pub fn data(&self) -> &[u8] {
    &self.data
  }
}

/// Decodes `{code, length, data}` triples until `rdlength` bytes are
/// exhausted.
pub(crate) fn decode_options(
  src: &[u8],
  offset: usize,
  rdlength: usize,
) -> Result<Arc<[EdnsOption]>, DecodeError> {
  let mut options = Vec::new();
  let mut consumed = 0;

  while consumed < rdlength {
    let remaining = rdlength - consumed;
    if remaining < 4 {
      return Err(DecodeError::MalformedOption { need: 4, remaining });
    }

    let code = read_u16(src, offset + consumed)?;
    let length = read_u16(src, offset + consumed + 2)? as usize;
    if 4 + length > remaining {
      return Err(DecodeError::MalformedOption {
        need: 4 + length,
        remaining,
      });
    }

    let start = offset + consumed + 4;
    let data = src
      .get(start..start + length)
      .ok_or(DecodeError::TruncatedMessage {
        offset: start,
        need: length,
        len: src.len(),
      })?;
    options.push(EdnsOption {
      code,
      data: Arc::from(data.to_vec()),
    });
    consumed += 4 + length;
  }

  Ok(Arc::from_iter(options))
}

pub(super) fn encode_options(
  options: &[EdnsOption],
  buf: &mut Vec<u8>,
) -> Result<(), EncodeError> {
  for option in options {
    let len = option.data.len();
    if len > usize::from(u16::MAX) {
      return Err(EncodeError::RdataTooLong(len));
    }

    buf.extend_from_slice(&option.code.to_be_bytes());
    buf.extend_from_slice(&(len as u16).to_be_bytes());
    buf.extend_from_slice(&option.data);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_option() {
    // One option {code: 4, length: 0} in four bytes of rdata.
    let buf = [0x00, 0x04, 0x00, 0x00];
    let options = decode_options(&buf, 0, 4).unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].code(), 4);
    assert!(options[0].data().is_empty());
  }

  #[test]
  fn round_trip() {
    let options = [
      EdnsOption::new(4, vec![0xDE, 0xAD]),
      EdnsOption::new(10, vec![1, 2, 3, 4, 5, 6, 7, 8]),
    ];
    let mut buf = Vec::new();
    encode_options(&options, &mut buf).unwrap();

    let decoded = decode_options(&buf, 0, buf.len()).unwrap();
    assert_eq!(&decoded[..], &options[..]);
  }

  #[test]
  fn overrunning_length_is_malformed() {
    let buf = [0x00, 0x04, 0x00, 0x02];
    assert_eq!(
      decode_options(&buf, 0, 4).unwrap_err(),
      DecodeError::MalformedOption {
        need: 6,
        remaining: 4
      }
    );
  }

  #[test]
  fn trailing_garbage_is_malformed() {
    let buf = [0x00, 0x04, 0x00, 0x00, 0xFF];
    assert_eq!(
      decode_options(&buf, 0, 5).unwrap_err(),
      DecodeError::MalformedOption {
        need: 4,
        remaining: 1
      }
    );
  }
}
