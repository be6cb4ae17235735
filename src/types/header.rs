use super::MESSAGE_HEADER_SIZE;
use crate::error::DecodeError;

/// Bit masks for the header `flags` word.
pub mod flags {
  /// Query/response bit: set in responses.
  pub const QR: u16 = 0b1000_0000_0000_0000;
  /// 4-bit operation code field.
  pub const OPCODE: u16 = 0b0111_1000_0000_0000;
  /// Authoritative answer.
  pub const AA: u16 = 0b0000_0100_0000_0000;
  /// Truncation: the message was cut to fit the transport.
  pub const TC: u16 = 0b0000_0010_0000_0000;
  /// Recursion desired.
  pub const RD: u16 = 0b0000_0001_0000_0000;
  /// Recursion available.
  pub const RA: u16 = 0b0000_0000_1000_0000;
  /// Reserved zero bit.
  pub const Z: u16 = 0b0000_0000_0100_0000;
  /// Authentic data (DNSSEC).
  pub const AD: u16 = 0b0000_0000_0010_0000;
  /// Checking disabled (DNSSEC).
  pub const CD: u16 = 0b0000_0000_0001_0000;
  /// 4-bit response code field.
  pub const RCODE: u16 = 0b0000_0000_0000_1111;
}

/// The fixed 12-byte header every DNS message starts with: id, flags, and
/// the four section counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHeader {
  id: u16,
  flags: u16,
  question_count: u16,
  answer_count: u16,
  authority_count: u16,
  additional_count: u16,
}

impl MessageHeader {
  /// Creates a header with the given id and flags and all counts zero.
  #[inline]
  pub const fn new(id: u16, flags: u16) -> Self {
    Self {
      id,
      flags,
      question_count: 0,
      answer_count: 0,
      authority_count: 0,
      additional_count: 0,
    }
  }

  /// Returns the transaction id.
  #[inline]
  pub const fn id(&self) -> u16 {
    self.id
  }

  /// Returns the raw flags word.
  #[inline]
  pub const fn flags(&self) -> u16 {
    self.flags
  }

  /// Returns `true` if the message is a response.
  #[inline]
  pub const fn is_response(&self) -> bool {
    self.flags & flags::QR != 0
  }

  /// Returns the operation code.
  #[inline]
  pub const fn opcode(&self) -> u16 {
    (self.flags & flags::OPCODE) >> 11
  }

  /// Returns `true` if the answer is authoritative.
  #[inline]
  pub const fn authoritative(&self) -> bool {
    self.flags & flags::AA != 0
  }

  /// Returns `true` if the message was truncated.
  #[inline]
  pub const fn truncated(&self) -> bool {
    self.flags & flags::TC != 0
  }

  /// Returns `true` if recursion is desired.
  #[inline]
  pub const fn recursion_desired(&self) -> bool {
    self.flags & flags::RD != 0
  }

  /// Returns `true` if recursion is available.
  #[inline]
  pub const fn recursion_available(&self) -> bool {
    self.flags & flags::RA != 0
  }

  /// Returns `true` if the authentic-data bit is set.
  #[inline]
  pub const fn authentic_data(&self) -> bool {
    self.flags & flags::AD != 0
  }

  /// Returns `true` if the checking-disabled bit is set.
  #[inline]
  pub const fn checking_disabled(&self) -> bool {
    self.flags & flags::CD != 0
  }

  /// Returns the response code.
  #[inline]
  pub const fn response_code(&self) -> u16 {
    self.flags & flags::RCODE
  }

  /// Returns the number of question records.
  #[inline]
  pub const fn question_count(&self) -> u16 {
    self.question_count
  }

  /// Returns the number of answer records.
  #[inline]
  pub const fn answer_count(&self) -> u16 {
    self.answer_count
  }

  /// Returns the number of authority records.
  #[inline]
  pub const fn authority_count(&self) -> u16 {
    self.authority_count
  }

  /// Returns the number of additional records.
  #[inline]
  pub const fn additional_count(&self) -> u16 {
    self.additional_count
  }

  #[inline]
  pub(crate) const fn with_counts(
    mut self,
    questions: u16,
    answers: u16,
    authorities: u16,
    additionals: u16,
  ) -> Self {
    self.question_count = questions;
    self.answer_count = answers;
    self.authority_count = authorities;
    self.additional_count = additionals;
    self
  }

  /// Decodes the header from the first 12 bytes of `src`.
  pub fn decode(src: &[u8]) -> Result<Self, DecodeError> {
    if src.len() < MESSAGE_HEADER_SIZE {
      return Err(DecodeError::TruncatedHeader(src.len()));
    }

    Ok(Self {
      id: u16::from_be_bytes([src[0], src[1]]),
      flags: u16::from_be_bytes([src[2], src[3]]),
      question_count: u16::from_be_bytes([src[4], src[5]]),
      answer_count: u16::from_be_bytes([src[6], src[7]]),
      authority_count: u16::from_be_bytes([src[8], src[9]]),
      additional_count: u16::from_be_bytes([src[10], src[11]]),
    })
  }

  /// Appends the 12-byte wire form of the header to `buf`.
  pub fn encode_into(&self, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&self.id.to_be_bytes());
    buf.extend_from_slice(&self.flags.to_be_bytes());
    buf.extend_from_slice(&self.question_count.to_be_bytes());
    buf.extend_from_slice(&self.answer_count.to_be_bytes());
    buf.extend_from_slice(&self.authority_count.to_be_bytes());
    buf.extend_from_slice(&self.additional_count.to_be_bytes());
  }
}
