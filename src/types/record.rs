use super::record_data::{decode_options, decode_rdata};
use super::{
  CLASS_MASK, CLASS_TOP_BIT, DNSClass, Name, RData, RecordType, read_u16, read_u32,
};
use crate::error::{DecodeError, EncodeError};

/// A resource record from the answer, authority or additional section: the
/// common envelope (name, type, class, ttl, rdlength) plus the type-specific
/// [`RData`].
///
/// The top bit of the class word is the mDNS cache-flush flag (RFC 6762,
/// section 10.2). For the EDNS0 OPT pseudo-record the class and ttl fields
/// are repurposed; see [`udp_payload_size`](ResourceRecord::udp_payload_size)
/// and friends.
#[derive(Debug, Clone)]
pub struct ResourceRecord {
  name: Name,
  ty: RecordType,
  class: u16,
  ttl: u32,
  rdlength: u16,
  rdata: RData,
  consumed: usize,
}

impl PartialEq for ResourceRecord {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
      && self.ty == other.ty
      && self.class == other.class
      && self.ttl == other.ttl
      && self.rdata == other.rdata
  }
}

impl Eq for ResourceRecord {}

impl ResourceRecord {
  /// Creates a resource record from its parts.
  #[inline]
  pub fn new(name: Name, ty: RecordType, class: DNSClass, ttl: u32, rdata: RData) -> Self {
    Self {
      name,
      ty,
      class: class.value(),
      ttl,
      rdlength: 0,
      rdata,
      consumed: 0,
    }
  }

  /// Creates an EDNS0 OPT pseudo-record advertising the given UDP payload
  /// size.
  #[inline]
  pub fn opt(udp_payload_size: u16, options: Vec<super::EdnsOption>) -> Self {
    Self {
      name: Name::default(),
      ty: RecordType::OPT,
      class: udp_payload_size,
      ttl: 0,
      rdlength: 0,
      rdata: RData::OPT(triomphe::Arc::from(options)),
      consumed: 0,
    }
  }

  /// Sets or clears the mDNS cache-flush flag.
  #[inline]
  pub fn with_cache_flush(mut self, cache_flush: bool) -> Self {
    if cache_flush {
      self.class |= CLASS_TOP_BIT;
    } else {
      self.class &= CLASS_MASK;
    }
    self
  }

  /// Returns the name the record belongs to.
  #[inline]
  pub const fn name(&self) -> &Name {
    &self.name
  }

  /// Returns the type of the record.
  #[inline]
  pub const fn record_type(&self) -> RecordType {
    self.ty
  }

  /// Returns the class of the record, without the cache-flush flag.
  #[inline]
  pub fn class(&self) -> DNSClass {
    DNSClass::from(self.class & CLASS_MASK)
  }

  /// Returns the raw class word, cache-flush flag included.
  #[inline]
  pub const fn class_bits(&self) -> u16 {
    self.class
  }

  /// Returns `true` if the record carries the mDNS cache-flush flag.
  #[inline]
  pub const fn cache_flush(&self) -> bool {
    self.class & CLASS_TOP_BIT != 0
  }

  /// Returns the time-to-live of the record.
  #[inline]
  pub const fn ttl(&self) -> u32 {
    self.ttl
  }

  /// Returns the rdata length the record was decoded with, or 0 for a built
  /// record.
  #[inline]
  pub const fn rdlength(&self) -> u16 {
    self.rdlength
  }

  /// Returns the type-specific record data.
  #[inline]
  pub const fn rdata(&self) -> &RData {
    &self.rdata
  }

  /// Returns the number of wire bytes the record was decoded from, or 0 for
  /// a built record.
  #[inline]
  pub const fn consumed_bytes(&self) -> usize {
    self.consumed
  }

  /// Returns the requestor's UDP payload size of an OPT pseudo-record,
  /// which repurposes the class field.
  #[inline]
  pub const fn udp_payload_size(&self) -> u16 {
    self.class
  }

  /// Returns the extended response code bits of an OPT pseudo-record.
  #[inline]
  pub const fn extended_rcode(&self) -> u8 {
    (self.ttl >> 24) as u8
  }

  /// Returns the EDNS version of an OPT pseudo-record.
  #[inline]
  pub const fn edns_version(&self) -> u8 {
    (self.ttl >> 16) as u8
  }

  /// Returns the EDNS flags word of an OPT pseudo-record.
  #[inline]
  pub const fn edns_flags(&self) -> u16 {
    self.ttl as u16
  }

  /// Decodes a resource record from `src` starting at `offset`, returning
  /// the record and the offset of the first byte after it.
  ///
  /// A record whose name is empty and whose type is OPT(41) is the EDNS0
  /// pseudo-record; its rdata is decoded as a sequence of options.
  pub fn decode(src: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
    if src.get(offset) == Some(&0)
      && offset + 3 <= src.len()
      && read_u16(src, offset + 1)? == RecordType::OPT.value()
    {
      return Self::decode_opt(src, offset);
    }

    let (name, mut index) = Name::decode(src, offset)?;
    let ty = RecordType::from(read_u16(src, index)?);
    index += 2;
    let class = read_u16(src, index)?;
    index += 2;
    let ttl = read_u32(src, index)?;
    index += 4;
    let rdlength = read_u16(src, index)?;
    index += 2;

    let rdl = usize::from(rdlength);
    if index + rdl > src.len() {
      return Err(DecodeError::TruncatedMessage {
        offset: index,
        need: rdl,
        len: src.len(),
      });
    }

    let rdata = decode_rdata(ty.value(), src, index, rdl)?;
    index += rdl;

    Ok((
      Self {
        name,
        ty,
        class,
        ttl,
        rdlength,
        rdata,
        consumed: index - offset,
      },
      index,
    ))
  }

  fn decode_opt(src: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
    let mut index = offset + 1;
    let ty = RecordType::from(read_u16(src, index)?);
    index += 2;
    let class = read_u16(src, index)?;
    index += 2;
    let ttl = read_u32(src, index)?;
    index += 4;
    let rdlength = read_u16(src, index)?;
    index += 2;

    let rdl = usize::from(rdlength);
    if index + rdl > src.len() {
      return Err(DecodeError::TruncatedMessage {
        offset: index,
        need: rdl,
        len: src.len(),
      });
    }

    let options = decode_options(src, index, rdl)?;
    index += rdl;

    Ok((
      Self {
        name: Name::default(),
        ty,
        class,
        ttl,
        rdlength,
        rdata: RData::OPT(options),
        consumed: index - offset,
      },
      index,
    ))
  }

  /// Appends the wire form of the record to `buf`.
  ///
  /// The rdata is encoded to a scratch buffer first so the rdlength field
  /// can be written from its actual size.
  pub fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    self.name.encode_into(buf)?;
    buf.extend_from_slice(&self.ty.value().to_be_bytes());
    buf.extend_from_slice(&self.class.to_be_bytes());
    buf.extend_from_slice(&self.ttl.to_be_bytes());

    let mut rdata = Vec::new();
    self.rdata.encode_into(&mut rdata)?;
    if rdata.len() > usize::from(u16::MAX) {
      return Err(EncodeError::RdataTooLong(rdata.len()));
    }

    buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    buf.extend_from_slice(&rdata);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::net::Ipv4Addr;

  use super::super::EdnsOption;
  use super::*;

  #[test]
  fn a_record_round_trip() {
    let record = ResourceRecord::new(
      Name::from("host.local"),
      RecordType::A,
      DNSClass::IN,
      120,
      RData::A(Ipv4Addr::new(192, 168, 0, 42)),
    )
    .with_cache_flush(true);

    let mut buf = Vec::new();
    record.encode_into(&mut buf).unwrap();

    let (decoded, end) = ResourceRecord::decode(&buf, 0).unwrap();
    assert_eq!(decoded, record);
    assert_eq!(end, buf.len());
    assert_eq!(decoded.consumed_bytes(), buf.len());
    assert_eq!(decoded.rdlength(), 4);
    assert!(decoded.cache_flush());
    assert_eq!(decoded.class(), DNSClass::IN);
  }

  #[test]
  fn unknown_type_keeps_raw_rdata() {
    let mut buf = Vec::new();
    Name::from("host.local").encode_into(&mut buf).unwrap();
    buf.extend_from_slice(&[0x00, 0x63]); // TYPE99
    buf.extend_from_slice(&[0x00, 0x01]);
    buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x78]);
    buf.extend_from_slice(&[0x00, 0x03, 0xAA, 0xBB, 0xCC]);

    let (decoded, _) = ResourceRecord::decode(&buf, 0).unwrap();
    assert_eq!(decoded.record_type(), RecordType::UNKNOWN(99));
    assert_eq!(
      decoded.rdata(),
      &RData::Raw(triomphe::Arc::from(vec![0xAA, 0xBB, 0xCC]))
    );
  }

  #[test]
  fn opt_pseudo_record() {
    let record = ResourceRecord::opt(1440, vec![EdnsOption::new(4, vec![])]);
    let mut buf = Vec::new();
    record.encode_into(&mut buf).unwrap();

    let (decoded, _) = ResourceRecord::decode(&buf, 0).unwrap();
    assert_eq!(decoded, record);
    assert_eq!(decoded.record_type(), RecordType::OPT);
    assert_eq!(decoded.udp_payload_size(), 1440);
    assert_eq!(decoded.extended_rcode(), 0);
    assert_eq!(decoded.edns_version(), 0);

    let RData::OPT(options) = decoded.rdata() else {
      panic!("expected OPT rdata");
    };
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].code(), 4);
    assert!(options[0].data().is_empty());
  }

  #[test]
  fn rdata_must_fit_message() {
    let mut buf = Vec::new();
    Name::from("host.local").encode_into(&mut buf).unwrap();
    buf.extend_from_slice(&[0x00, 0x01]);
    buf.extend_from_slice(&[0x00, 0x01]);
    buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x78]);
    buf.extend_from_slice(&[0x00, 0x04, 127, 0]); // rdlength 4, two bytes left

    assert!(matches!(
      ResourceRecord::decode(&buf, 0),
      Err(DecodeError::TruncatedMessage { need: 4, .. })
    ));
  }

  #[test]
  fn srv_record_round_trip() {
    let record = ResourceRecord::new(
      Name::from("_http._tcp.local"),
      RecordType::SRV,
      DNSClass::IN,
      120,
      RData::SRV(super::super::Srv::new(0, 0, 8080, Name::from("host.local"))),
    );

    let mut buf = Vec::new();
    record.encode_into(&mut buf).unwrap();
    let (decoded, _) = ResourceRecord::decode(&buf, 0).unwrap();
    assert_eq!(decoded, record);
  }
}
