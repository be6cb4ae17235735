use super::{CLASS_MASK, CLASS_TOP_BIT, DNSClass, Name, QCLASS_ANY, RecordType, read_u16};
use crate::error::{DecodeError, EncodeError};

/// A question record: a name, a query type and a query class.
///
/// The top bit of the class word is the mDNS QU flag (RFC 6762, section
/// 18.12): it requests a unicast response for this particular question.
#[derive(Debug, Clone)]
pub struct Query {
  name: Name,
  ty: RecordType,
  class: u16,
  consumed: usize,
}

impl PartialEq for Query {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name && self.ty == other.ty && self.class == other.class
  }
}

impl Eq for Query {}

impl core::hash::Hash for Query {
  fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
    self.name.hash(state);
    self.ty.hash(state);
    self.class.hash(state);
  }
}

impl Query {
  /// Creates a query for a name, asking for all record types in the
  /// Internet class.
  ///
  /// A `&str` name is split on `.` into labels.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use mdns_wire::{Query, RecordType};
  ///
  /// let query = Query::new("_http._tcp.local").with_query_type(RecordType::PTR);
  /// assert_eq!(query.name().to_string(), "_http._tcp.local");
  /// ```
  #[inline]
  pub fn new(name: impl Into<Name>) -> Self {
    Self {
      name: name.into(),
      ty: RecordType::ANY,
      class: DNSClass::IN.value(),
      consumed: 0,
    }
  }

  /// Sets the query type.
  #[inline]
  pub fn with_query_type(mut self, ty: RecordType) -> Self {
    self.ty = ty;
    self
  }

  /// Sets the query class, keeping the QU flag.
  #[inline]
  pub fn with_query_class(mut self, class: DNSClass) -> Self {
    self.class = (self.class & CLASS_TOP_BIT) | (class.value() & CLASS_MASK);
    self
  }

  /// Sets or clears the QU flag.
  #[inline]
  pub fn with_unicast_response(mut self, unicast: bool) -> Self {
    if unicast {
      self.class |= CLASS_TOP_BIT;
    } else {
      self.class &= CLASS_MASK;
    }
    self
  }

  /// Returns the name the question asks about.
  #[inline]
  pub const fn name(&self) -> &Name {
    &self.name
  }

  /// Returns the query type.
  #[inline]
  pub const fn query_type(&self) -> RecordType {
    self.ty
  }

  /// Returns the query class, without the QU flag.
  #[inline]
  pub fn query_class(&self) -> DNSClass {
    DNSClass::from(self.class & CLASS_MASK)
  }

  /// Returns the raw class word, QU flag included.
  #[inline]
  pub const fn class_bits(&self) -> u16 {
    self.class
  }

  /// Returns `true` if the question requests a unicast response.
  #[inline]
  pub const fn wants_unicast_response(&self) -> bool {
    self.class & CLASS_TOP_BIT != 0
  }

  /// Returns the number of wire bytes the question was decoded from, or 0
  /// for a built question.
  #[inline]
  pub const fn consumed_bytes(&self) -> usize {
    self.consumed
  }

  /// Decodes a question from `src` starting at `offset`, returning the
  /// question and the offset of the first byte after it.
  pub fn decode(src: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
    let (name, mut index) = Name::decode(src, offset)?;

    let ty_value = read_u16(src, index)?;
    index += 2;
    let ty = RecordType::from(ty_value);
    if !ty.is_recognized() {
      return Err(DecodeError::UnknownQueryType(ty_value));
    }

    let class = read_u16(src, index)?;
    index += 2;
    if class & QCLASS_ANY == 0 {
      return Err(DecodeError::UnknownQueryClass(class));
    }

    Ok((
      Self {
        name,
        ty,
        class,
        consumed: index - offset,
      },
      index,
    ))
  }

  /// Appends the wire form of the question to `buf`.
  pub fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    self.name.encode_into(buf)?;
    buf.extend_from_slice(&self.ty.value().to_be_bytes());
    buf.extend_from_slice(&self.class.to_be_bytes());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trip() {
    let query = Query::new("_http._tcp.local")
      .with_query_type(RecordType::PTR)
      .with_query_class(DNSClass::ANY);
    let mut buf = Vec::new();
    query.encode_into(&mut buf).unwrap();

    let (decoded, end) = Query::decode(&buf, 0).unwrap();
    assert_eq!(decoded, query);
    assert_eq!(end, buf.len());
    assert_eq!(decoded.consumed_bytes(), buf.len());
    assert_eq!(decoded.query_type(), RecordType::PTR);
    assert_eq!(decoded.query_class(), DNSClass::ANY);
  }

  #[test]
  fn qu_flag() {
    let query = Query::new("printer.local").with_unicast_response(true);
    assert!(query.wants_unicast_response());
    assert_eq!(query.query_class(), DNSClass::IN);
    assert_eq!(query.class_bits(), 0x8001);

    let mut buf = Vec::new();
    query.encode_into(&mut buf).unwrap();
    let (decoded, _) = Query::decode(&buf, 0).unwrap();
    assert!(decoded.wants_unicast_response());

    let cleared = decoded.with_unicast_response(false);
    assert_eq!(cleared.class_bits(), 0x0001);
  }

  #[test]
  fn unrecognized_query_type_is_rejected() {
    let mut buf = Vec::new();
    Name::from("host.local").encode_into(&mut buf).unwrap();
    buf.extend_from_slice(&[0x00, 0x0B, 0x00, 0x01]); // WKS (11)

    assert_eq!(
      Query::decode(&buf, 0).unwrap_err(),
      DecodeError::UnknownQueryType(11)
    );
  }

  #[test]
  fn empty_class_bits_are_rejected() {
    let mut buf = Vec::new();
    Name::from("host.local").encode_into(&mut buf).unwrap();
    buf.extend_from_slice(&[0x00, 0x0C, 0x01, 0x00]);

    assert_eq!(
      Query::decode(&buf, 0).unwrap_err(),
      DecodeError::UnknownQueryClass(0x0100)
    );
  }
}
