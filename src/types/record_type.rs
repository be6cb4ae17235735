use std::str::FromStr;

use smol_str::SmolStr;

/// The error returned when parsing a [`RecordType`] from an unrecognized
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("unknown record type string: {0}")]
pub struct UnknownRecordTypeStr(pub SmolStr);

/// The DNS record types this codec recognizes.
///
/// Types with a structured rdata shape decode into the matching
/// [`RData`](crate::RData) variant; every other value is carried as
/// [`UNKNOWN`](RecordType::UNKNOWN) and its rdata as raw bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) IPv4 host address
  A,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) authoritative name server
  NS,
  /// Mail destination (obsolete)
  MD,
  /// Mail forwarder (obsolete)
  MF,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) canonical name
  CNAME,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) start of authority
  SOA,
  /// Mailbox domain name
  MB,
  /// Mail group member
  MG,
  /// Mail rename domain name
  MR,
  /// Null record
  NULL,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) domain name pointer
  PTR,
  /// Host information
  HINFO,
  /// Mailbox information
  MINFO,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) mail exchanger
  MX,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) text strings
  TXT,
  /// [RFC 1183](https://tools.ietf.org/html/rfc1183) responsible person
  RP,
  /// [RFC 1183](https://tools.ietf.org/html/rfc1183) AFS cell database
  AFSDB,
  /// [RFC 1183](https://tools.ietf.org/html/rfc1183) route through
  RT,
  /// Reverse NSAP lookup (deprecated)
  NSAPPTR,
  /// [RFC 2163](https://tools.ietf.org/html/rfc2163) X.400 mail mapping
  PX,
  /// [RFC 3596](https://tools.ietf.org/html/rfc3596) IPv6 address
  AAAA,
  /// [RFC 2782](https://tools.ietf.org/html/rfc2782) service locator
  SRV,
  /// [RFC 2230](https://tools.ietf.org/html/rfc2230) key exchanger
  KX,
  /// [RFC 6672](https://tools.ietf.org/html/rfc6672) non-terminal name redirection
  DNAME,
  /// [RFC 6891](https://tools.ietf.org/html/rfc6891) EDNS0 option pseudo-record
  OPT,
  /// [RFC 4034](https://tools.ietf.org/html/rfc4034) denial of existence
  NSEC,
  /// [RFC 1035](https://tools.ietf.org/html/rfc1035) all records, aka `*`
  ANY,
  /// Any type value outside the recognized set
  UNKNOWN(u16),
}

impl RecordType {
  /// Returns the numeric type value.
  #[inline]
  pub const fn value(&self) -> u16 {
    match self {
      Self::A => 1,
      Self::NS => 2,
      Self::MD => 3,
      Self::MF => 4,
      Self::CNAME => 5,
      Self::SOA => 6,
      Self::MB => 7,
      Self::MG => 8,
      Self::MR => 9,
      Self::NULL => 10,
      Self::PTR => 12,
      Self::HINFO => 13,
      Self::MINFO => 14,
      Self::MX => 15,
      Self::TXT => 16,
      Self::RP => 17,
      Self::AFSDB => 18,
      Self::RT => 21,
      Self::NSAPPTR => 23,
      Self::PX => 26,
      Self::AAAA => 28,
      Self::SRV => 33,
      Self::KX => 36,
      Self::DNAME => 39,
      Self::OPT => 41,
      Self::NSEC => 47,
      Self::ANY => 255,
      Self::UNKNOWN(v) => *v,
    }
  }

  /// Returns `true` if the value belongs to the recognized set.
  #[inline]
  pub const fn is_recognized(&self) -> bool {
    !matches!(self, Self::UNKNOWN(_))
  }

  /// Returns the string representation of the record type.
  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::A => "A",
      Self::NS => "NS",
      Self::MD => "MD",
      Self::MF => "MF",
      Self::CNAME => "CNAME",
      Self::SOA => "SOA",
      Self::MB => "MB",
      Self::MG => "MG",
      Self::MR => "MR",
      Self::NULL => "NULL",
      Self::PTR => "PTR",
      Self::HINFO => "HINFO",
      Self::MINFO => "MINFO",
      Self::MX => "MX",
      Self::TXT => "TXT",
      Self::RP => "RP",
      Self::AFSDB => "AFSDB",
      Self::RT => "RT",
      Self::NSAPPTR => "NSAP-PTR",
      Self::PX => "PX",
      Self::AAAA => "AAAA",
      Self::SRV => "SRV",
      Self::KX => "KX",
      Self::DNAME => "DNAME",
      Self::OPT => "OPT",
      Self::NSEC => "NSEC",
      Self::ANY => "ANY",
      Self::UNKNOWN(_) => "UNKNOWN",
    }
  }

  /// Returns a short description of the record type.
  #[inline]
  pub const fn description(&self) -> &'static str {
    match self {
      Self::A => "host address",
      Self::NS => "authoritative name server",
      Self::MD => "mail destination",
      Self::MF => "mail forwarder",
      Self::CNAME => "canonical name",
      Self::SOA => "start of authority",
      Self::MB => "mailbox",
      Self::MG => "mail group",
      Self::MR => "mail rename",
      Self::NULL => "null record",
      Self::PTR => "domain name pointer",
      Self::HINFO => "host information",
      Self::MINFO => "mailbox information",
      Self::MX => "mail exchanger",
      Self::TXT => "arbitrary text string",
      Self::RP => "responsible person",
      Self::AFSDB => "AFS cell database",
      Self::RT => "router",
      Self::NSAPPTR => "reverse NSAP lookup",
      Self::PX => "X.400 mail mapping",
      Self::AAAA => "IPv6 address",
      Self::SRV => "service record",
      Self::KX => "key exchange",
      Self::DNAME => "non-terminal name redirection",
      Self::OPT => "EDNS0 option",
      Self::NSEC => "denial of existence",
      Self::ANY => "all records",
      Self::UNKNOWN(_) => "unrecognized record type",
    }
  }
}

impl From<u16> for RecordType {
  #[inline]
  fn from(value: u16) -> Self {
    match value {
      1 => Self::A,
      2 => Self::NS,
      3 => Self::MD,
      4 => Self::MF,
      5 => Self::CNAME,
      6 => Self::SOA,
      7 => Self::MB,
      8 => Self::MG,
      9 => Self::MR,
      10 => Self::NULL,
      12 => Self::PTR,
      13 => Self::HINFO,
      14 => Self::MINFO,
      15 => Self::MX,
      16 => Self::TXT,
      17 => Self::RP,
      18 => Self::AFSDB,
      21 => Self::RT,
      23 => Self::NSAPPTR,
      26 => Self::PX,
      28 => Self::AAAA,
      33 => Self::SRV,
      36 => Self::KX,
      39 => Self::DNAME,
      41 => Self::OPT,
      47 => Self::NSEC,
      255 => Self::ANY,
      _ => Self::UNKNOWN(value),
    }
  }
}

impl From<RecordType> for u16 {
  #[inline]
  fn from(value: RecordType) -> u16 {
    value.value()
  }
}

impl core::fmt::Display for RecordType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::UNKNOWN(v) => write!(f, "TYPE{v}"),
      _ => f.write_str(self.as_str()),
    }
  }
}

impl TryFrom<&str> for RecordType {
  type Error = UnknownRecordTypeStr;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    Ok(match value.trim().to_ascii_uppercase().as_str() {
      "A" => Self::A,
      "NS" => Self::NS,
      "MD" => Self::MD,
      "MF" => Self::MF,
      "CNAME" => Self::CNAME,
      "SOA" => Self::SOA,
      "MB" => Self::MB,
      "MG" => Self::MG,
      "MR" => Self::MR,
      "NULL" => Self::NULL,
      "PTR" => Self::PTR,
      "HINFO" => Self::HINFO,
      "MINFO" => Self::MINFO,
      "MX" => Self::MX,
      "TXT" => Self::TXT,
      "RP" => Self::RP,
      "AFSDB" => Self::AFSDB,
      "RT" => Self::RT,
      "NSAP-PTR" => Self::NSAPPTR,
      "PX" => Self::PX,
      "AAAA" => Self::AAAA,
      "SRV" => Self::SRV,
      "KX" => Self::KX,
      "DNAME" => Self::DNAME,
      "OPT" => Self::OPT,
      "NSEC" => Self::NSEC,
      "ANY" | "*" => Self::ANY,
      _ => return Err(UnknownRecordTypeStr(value.into())),
    })
  }
}

impl FromStr for RecordType {
  type Err = UnknownRecordTypeStr;

  #[inline]
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    RecordType::try_from(s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn value_mapping_round_trips() {
    for value in 0..=u16::MAX {
      let ty = RecordType::from(value);
      assert_eq!(ty.value(), value);
    }
  }

  #[test]
  fn recognized_set() {
    assert!(RecordType::from(33).is_recognized());
    assert!(RecordType::from(255).is_recognized());
    assert!(!RecordType::from(11).is_recognized());
    assert!(!RecordType::from(0).is_recognized());
  }

  #[test]
  fn parse_from_str() {
    assert_eq!("ptr".parse::<RecordType>().unwrap(), RecordType::PTR);
    assert_eq!("NSAP-PTR".parse::<RecordType>().unwrap(), RecordType::NSAPPTR);
    assert_eq!("*".parse::<RecordType>().unwrap(), RecordType::ANY);
    assert!("BOGUS".parse::<RecordType>().is_err());
  }

  #[test]
  fn display() {
    assert_eq!(RecordType::AAAA.to_string(), "AAAA");
    assert_eq!(RecordType::UNKNOWN(64).to_string(), "TYPE64");
  }
}
