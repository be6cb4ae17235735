use smallvec_wrapper::OneOrMore;
use smol_str::SmolStr;

use super::{COMPRESSION_POINTER_MASK, LABEL_TYPE_MASK, MAX_LABEL_SIZE, read_u8};
use crate::error::{DecodeError, EncodeError};

/// A domain name in its wire representation: a sequence of length-prefixed
/// labels terminated by the root, or a sequence whose tail was given as a
/// compression pointer into the enclosing message.
///
/// Pointers are resolved while decoding, so the labels of a
/// [`Compressed`](Name::Compressed) name are always fully materialized; the
/// pointer target is kept so the name can be re-encoded in its original
/// two-byte form. Encoding never invents a pointer on its own.
#[derive(Debug, Clone)]
pub enum Name {
  /// An explicit label sequence. Empty means the root name.
  Labels(OneOrMore<SmolStr>),
  /// A name which ended in a compression pointer.
  Compressed {
    /// Message offset the first followed pointer referred to.
    target: u16,
    /// The labels, materialized by following the pointer at decode time.
    labels: OneOrMore<SmolStr>,
  },
}

impl Default for Name {
  #[inline]
  fn default() -> Self {
    Self::Labels(OneOrMore::new())
  }
}

impl PartialEq for Name {
  fn eq(&self, other: &Self) -> bool {
    self.labels() == other.labels()
  }
}

impl Eq for Name {}

impl core::hash::Hash for Name {
  fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
    self.labels().hash(state);
  }
}

impl From<&str> for Name {
  fn from(name: &str) -> Self {
    Self::Labels(
      name
        .split('.')
        .filter(|label| !label.is_empty())
        .map(SmolStr::new)
        .collect(),
    )
  }
}

impl core::fmt::Display for Name {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let labels = self.labels();
    if labels.is_empty() {
      return f.write_str(".");
    }

    for (i, label) in labels.iter().enumerate() {
      if i > 0 {
        f.write_str(".")?;
      }
      f.write_str(label)?;
    }
    Ok(())
  }
}

impl Name {
  /// Creates a name from an explicit label sequence.
  pub fn from_labels<I>(labels: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<SmolStr>,
  {
    Self::Labels(labels.into_iter().map(Into::into).collect())
  }

  /// Returns the labels of the name, pointer already resolved.
  #[inline]
  pub fn labels(&self) -> &[SmolStr] {
    match self {
      Self::Labels(labels) | Self::Compressed { labels, .. } => &labels[..],
    }
  }

  /// Returns the message offset of the compression pointer the name was
  /// decoded from, if any.
  #[inline]
  pub const fn pointer(&self) -> Option<u16> {
    match self {
      Self::Labels(_) => None,
      Self::Compressed { target, .. } => Some(*target),
    }
  }

  /// Returns `true` if the name is the root (no labels).
  #[inline]
  pub fn is_root(&self) -> bool {
    self.labels().is_empty()
  }

  /// Decodes a name from `src` starting at `offset`, returning the name and
  /// the offset of the first byte after it.
  ///
  /// Compression pointers are followed iteratively: every followed target
  /// must lie before the offset the pointer was read from *and* before every
  /// previously followed target, so resolution always terminates, even on
  /// adversarial input. The target byte must begin a plain label; a pointer
  /// chained to another pointer is rejected.
  pub fn decode(src: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
    let mut labels = OneOrMore::new();
    let mut pos = offset;
    let mut end = None;
    let mut pointer = None;
    let mut floor = usize::MAX;
    let mut last_pointer_at = offset;
    // Accumulated label bytes are capped by the message length, which keeps
    // memory bounded when pointers re-walk overlapping label runs.
    let mut budget = src.len();

    loop {
      let control = read_u8(src, pos)?;
      match control & LABEL_TYPE_MASK {
        0x00 => {
          if control == 0 {
            pos += 1;
            break;
          }

          let len = control as usize;
          if pos + 1 + len > src.len() {
            return Err(DecodeError::TruncatedMessage {
              offset: pos + 1,
              need: len,
              len: src.len(),
            });
          }

          budget =
            budget
              .checked_sub(len)
              .ok_or(DecodeError::InvalidCompressionPointer {
                target: pos,
                offset: last_pointer_at,
              })?;

          labels.push(SmolStr::new(String::from_utf8_lossy(
            &src[pos + 1..pos + 1 + len],
          )));
          pos += 1 + len;
        }
        0xC0 => {
          let low = read_u8(src, pos + 1)?;
          let target = usize::from(control & 0x3F) << 8 | usize::from(low);
          if end.is_none() {
            end = Some(pos + 2);
          }

          if target >= pos || target >= floor {
            return Err(DecodeError::InvalidCompressionPointer {
              target,
              offset: pos,
            });
          }

          if read_u8(src, target)? & LABEL_TYPE_MASK != 0 {
            return Err(DecodeError::InvalidCompressionPointer {
              target,
              offset: pos,
            });
          }

          if pointer.is_none() {
            pointer = Some(target as u16);
          }

          last_pointer_at = pos;
          floor = target;
          pos = target;
        }
        _ => return Err(DecodeError::InvalidLabelType(control)),
      }
    }

    let end = end.unwrap_or(pos);
    Ok(match pointer {
      None => (Self::Labels(labels), end),
      Some(target) => (Self::Compressed { target, labels }, end),
    })
  }

  /// Appends the wire form of the name to `buf`.
  ///
  /// A [`Compressed`](Name::Compressed) name is written as its two-byte
  /// pointer form; a plain label sequence is written label by label followed
  /// by the root terminator.
  pub fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    match self {
      Self::Labels(labels) => {
        for label in labels.iter() {
          let len = label.len();
          if len > MAX_LABEL_SIZE {
            return Err(EncodeError::LabelTooLong(len));
          }
          if len == 0 {
            continue;
          }

          buf.push(len as u8);
          buf.extend_from_slice(label.as_str().as_bytes());
        }
        buf.push(0);
        Ok(())
      }
      Self::Compressed { target, .. } => {
        if *target & COMPRESSION_POINTER_MASK != 0 {
          return Err(EncodeError::PointerOutOfRange(*target));
        }

        buf.extend_from_slice(&(COMPRESSION_POINTER_MASK | *target).to_be_bytes());
        Ok(())
      }
    }
  }
}
