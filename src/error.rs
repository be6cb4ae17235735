/// The errors which can occur when decoding a DNS message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
  /// The buffer is shorter than the fixed 12-byte message header.
  #[error("message header requires 12 bytes, only {0} available")]
  TruncatedHeader(usize),
  /// A field read would run past the end of the message.
  #[error("message truncated: {need} bytes at offset {offset} exceed message length {len}")]
  TruncatedMessage {
    /// Offset the read started at.
    offset: usize,
    /// Bytes the read required.
    need: usize,
    /// Total message length.
    len: usize,
  },
  /// A label control byte uses one of the reserved label types (`01`/`10`
  /// in the top two bits).
  #[error("unsupported label type {0:#04x}")]
  InvalidLabelType(u8),
  /// A compression pointer is forward, self-referential, or targets
  /// another pointer.
  #[error("invalid compression pointer to offset {target} read at offset {offset}")]
  InvalidCompressionPointer {
    /// Offset the pointer refers to.
    target: usize,
    /// Offset the pointer was read from.
    offset: usize,
  },
  /// A question carries a type value outside the recognized set.
  #[error("unknown query type {0}")]
  UnknownQueryType(u16),
  /// A question carries a class value whose class bits are empty.
  #[error("unknown query class {0:#06x}")]
  UnknownQueryClass(u16),
  /// A record's rdata does not satisfy the length requirement of its
  /// type-specific shape.
  #[error("rdata length mismatch: got {len} bytes, shape requires {need}")]
  RdataLengthMismatch {
    /// Bytes the shape requires.
    need: usize,
    /// Bytes the record declared.
    len: usize,
  },
  /// An EDNS0 sub-option declares a length which overruns the remaining
  /// rdata of its OPT record.
  #[error("EDNS0 option of {need} bytes overruns remaining rdata ({remaining} bytes)")]
  MalformedOption {
    /// Bytes the option requires.
    need: usize,
    /// Bytes left in the record's rdata.
    remaining: usize,
  },
}

/// The errors which can occur when encoding a DNS message.
///
/// These indicate a message value which violates a wire-format invariant;
/// well-formed values always encode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EncodeError {
  /// A label exceeds the 63-byte wire limit.
  #[error("label of {0} bytes exceeds the 63 byte limit")]
  LabelTooLong(usize),
  /// A character-string exceeds its one-byte length prefix.
  #[error("character-string of {0} bytes exceeds the 255 byte limit")]
  CharacterStringTooLong(usize),
  /// A record's encoded rdata exceeds the 16-bit length field.
  #[error("rdata of {0} bytes exceeds the u16 length field")]
  RdataTooLong(usize),
  /// A compression pointer offset does not fit in 14 bits.
  #[error("compression pointer offset {0:#06x} exceeds 14 bits")]
  PointerOutOfRange(u16),
}

/// Returned by [`install_decoder_table`](crate::install_decoder_table) when
/// the rdata decoder table has already been initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("the rdata decoder table is already in use")]
pub struct DecoderTableInUse;
