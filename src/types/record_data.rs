use std::{
  collections::HashMap,
  net::{Ipv4Addr, Ipv6Addr},
  sync::OnceLock,
};

use smol_str::SmolStr;
use triomphe::Arc;

mod exchange;
mod nsec;
mod opt;
mod soa;
mod srv;

pub use exchange::Exchange;
pub use nsec::Nsec;
pub use opt::EdnsOption;
pub use soa::Soa;
pub use srv::Srv;

pub(crate) use opt::decode_options;

use super::{Name, RecordType, read_u8, read_u16, read_u32};
use crate::error::{DecodeError, DecoderTableInUse, EncodeError};

/// The type-specific data of a resource record.
///
/// One variant per structured shape; several record types share a shape
/// (the single-name family, the preference-plus-target family). Types
/// without a structured shape are carried as [`Raw`](RData::Raw) bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
#[non_exhaustive]
pub enum RData {
  /// ```text
  /// 3.4.1. A RDATA format
  ///
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///     |                    ADDRESS                    |
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///
  /// where:
  ///
  /// ADDRESS         A 32 bit Internet address.
  /// ```
  A(Ipv4Addr),
  /// A 128-bit IPv6 address in network byte order
  /// ([RFC 3596](https://tools.ietf.org/html/rfc3596)).
  AAAA(Ipv6Addr),
  /// The single target name shared by NS, MD, MF, CNAME, MB, MG, MR, PTR,
  /// NSAP-PTR and DNAME.
  DomainName(Name),
  /// Start of authority.
  SOA(Soa),
  /// Host information: two character-strings.
  HINFO {
    /// CPU type.
    cpu: SmolStr,
    /// Operating system.
    os: SmolStr,
  },
  /// Mailbox information.
  MINFO {
    /// Mailbox responsible for mailing lists.
    rmailbx: Name,
    /// Mailbox for error messages.
    emailbx: Name,
  },
  /// The preference-plus-target shape shared by MX, AFSDB, RT and KX.
  Exchange(Exchange),
  /// Responsible person.
  RP {
    /// Mailbox of the responsible person.
    mbox: Name,
    /// Name of TXT records with further details.
    txt_dname: Name,
  },
  /// X.400 mail mapping.
  PX {
    /// Preference; lower values are preferred.
    preference: u16,
    /// RFC 822 domain.
    map822: Name,
    /// X.400 domain.
    mapx400: Name,
  },
  /// Service locator.
  SRV(Srv),
  /// Denial of existence.
  NSEC(Nsec),
  /// The EDNS0 options of an OPT pseudo-record.
  OPT(Arc<[EdnsOption]>),
  /// ```text
  /// 3.3.14. TXT RDATA format
  ///
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///     /                   TXT-DATA                    /
  ///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
  ///
  /// where:
  ///
  /// TXT-DATA        One or more <character-string>s.
  /// ```
  TXT(Arc<[SmolStr]>),
  /// The raw rdata bytes of a record without a structured shape.
  Raw(Arc<[u8]>),
}

impl From<Ipv4Addr> for RData {
  #[inline]
  fn from(value: Ipv4Addr) -> Self {
    Self::A(value)
  }
}

impl From<Ipv6Addr> for RData {
  #[inline]
  fn from(value: Ipv6Addr) -> Self {
    Self::AAAA(value)
  }
}

impl From<Srv> for RData {
  #[inline]
  fn from(value: Srv) -> Self {
    Self::SRV(value)
  }
}

impl From<Soa> for RData {
  #[inline]
  fn from(value: Soa) -> Self {
    Self::SOA(value)
  }
}

impl From<Exchange> for RData {
  #[inline]
  fn from(value: Exchange) -> Self {
    Self::Exchange(value)
  }
}

impl From<Nsec> for RData {
  #[inline]
  fn from(value: Nsec) -> Self {
    Self::NSEC(value)
  }
}

impl RData {
  /// Appends the wire form of the record data to `buf`.
  pub fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    match self {
      Self::A(addr) => {
        buf.extend_from_slice(&addr.octets());
        Ok(())
      }
      Self::AAAA(addr) => {
        buf.extend_from_slice(&addr.octets());
        Ok(())
      }
      Self::DomainName(name) => name.encode_into(buf),
      Self::SOA(soa) => soa.encode_into(buf),
      Self::HINFO { cpu, os } => {
        encode_character_string(cpu, buf)?;
        encode_character_string(os, buf)
      }
      Self::MINFO { rmailbx, emailbx } => {
        rmailbx.encode_into(buf)?;
        emailbx.encode_into(buf)
      }
      Self::Exchange(exchange) => exchange.encode_into(buf),
      Self::RP { mbox, txt_dname } => {
        mbox.encode_into(buf)?;
        txt_dname.encode_into(buf)
      }
      Self::PX {
        preference,
        map822,
        mapx400,
      } => {
        buf.extend_from_slice(&preference.to_be_bytes());
        map822.encode_into(buf)?;
        mapx400.encode_into(buf)
      }
      Self::SRV(srv) => srv.encode_into(buf),
      Self::NSEC(nsec) => nsec.encode_into(buf),
      Self::OPT(options) => opt::encode_options(options, buf),
      Self::TXT(strings) => {
        for s in strings.iter() {
          encode_character_string(s, buf)?;
        }
        Ok(())
      }
      Self::Raw(bytes) => {
        buf.extend_from_slice(bytes);
        Ok(())
      }
    }
  }
}

/// The signature of an rdata decoder: message bytes, rdata offset, and the
/// declared rdata length.
pub type RdataDecoder = fn(&[u8], usize, usize) -> Result<RData, DecodeError>;

/// The type-indexed table of rdata decoders.
///
/// The table in use is built once and read-only afterwards, so concurrent
/// decodes read it without locking. To extend the recognized set, build a
/// table, [`register`](DecoderTable::register) additional rows, and
/// [`install_decoder_table`] it before the first decode.
#[derive(Debug, Clone)]
pub struct DecoderTable {
  entries: HashMap<u16, RdataDecoder>,
}

impl Default for DecoderTable {
  #[inline]
  fn default() -> Self {
    Self::builtin()
  }
}

impl DecoderTable {
  /// Returns the table of built-in decoders.
  pub fn builtin() -> Self {
    let mut table = Self {
      entries: HashMap::new(),
    };

    table.register(RecordType::A.value(), decode_a);
    for ty in [
      RecordType::NS,
      RecordType::MD,
      RecordType::MF,
      RecordType::CNAME,
      RecordType::MB,
      RecordType::MG,
      RecordType::MR,
      RecordType::PTR,
      RecordType::NSAPPTR,
      RecordType::DNAME,
    ] {
      table.register(ty.value(), decode_domain_name);
    }
    table.register(RecordType::SOA.value(), decode_soa);
    table.register(RecordType::HINFO.value(), decode_hinfo);
    table.register(RecordType::MINFO.value(), decode_minfo);
    for ty in [
      RecordType::MX,
      RecordType::AFSDB,
      RecordType::RT,
      RecordType::KX,
    ] {
      table.register(ty.value(), decode_exchange);
    }
    table.register(RecordType::TXT.value(), decode_txt);
    table.register(RecordType::RP.value(), decode_rp);
    table.register(RecordType::PX.value(), decode_px);
    table.register(RecordType::AAAA.value(), decode_aaaa);
    table.register(RecordType::SRV.value(), decode_srv);
    table.register(RecordType::NSEC.value(), decode_nsec);
    table
  }

  /// Registers a decoder for a record type, returning the decoder it
  /// replaces, if any.
  pub fn register(&mut self, ty: u16, decoder: RdataDecoder) -> Option<RdataDecoder> {
    self.entries.insert(ty, decoder)
  }

  /// Returns the decoder registered for a record type.
  #[inline]
  pub fn get(&self, ty: u16) -> Option<RdataDecoder> {
    self.entries.get(&ty).copied()
  }
}

static DECODERS: OnceLock<DecoderTable> = OnceLock::new();

/// Installs the rdata decoder table used by every subsequent decode.
///
/// Must be called before the first decode; once any decode has run (or a
/// table was installed), the table is frozen and this returns
/// [`DecoderTableInUse`].
pub fn install_decoder_table(table: DecoderTable) -> Result<(), DecoderTableInUse> {
  DECODERS.set(table).map_err(|_| DecoderTableInUse)
}

#[inline]
fn decoder_table() -> &'static DecoderTable {
  DECODERS.get_or_init(DecoderTable::builtin)
}

/// Decodes `rdlength` bytes of rdata for the given record type, falling back
/// to [`RData::Raw`] when no decoder is registered.
pub(crate) fn decode_rdata(
  ty: u16,
  src: &[u8],
  offset: usize,
  rdlength: usize,
) -> Result<RData, DecodeError> {
  match decoder_table().get(ty) {
    Some(decoder) => decoder(src, offset, rdlength),
    None => {
      let bytes = src
        .get(offset..offset + rdlength)
        .ok_or(DecodeError::TruncatedMessage {
          offset,
          need: rdlength,
          len: src.len(),
        })?;
      Ok(RData::Raw(Arc::from(bytes.to_vec())))
    }
  }
}

fn decode_character_string(
  src: &[u8],
  rdata: usize,
  rdlength: usize,
  index: usize,
) -> Result<(SmolStr, usize), DecodeError> {
  let len = read_u8(src, index)? as usize;
  if index + 1 + len > rdata + rdlength {
    return Err(DecodeError::RdataLengthMismatch {
      need: index + 1 + len - rdata,
      len: rdlength,
    });
  }

  let bytes = src
    .get(index + 1..index + 1 + len)
    .ok_or(DecodeError::TruncatedMessage {
      offset: index + 1,
      need: len,
      len: src.len(),
    })?;
  Ok((
    SmolStr::new(String::from_utf8_lossy(bytes)),
    index + 1 + len,
  ))
}

pub(crate) fn encode_character_string(s: &str, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
  if s.len() > 255 {
    return Err(EncodeError::CharacterStringTooLong(s.len()));
  }

  buf.push(s.len() as u8);
  buf.extend_from_slice(s.as_bytes());
  Ok(())
}

fn decode_a(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  if rdlength != 4 {
    return Err(DecodeError::RdataLengthMismatch {
      need: 4,
      len: rdlength,
    });
  }

  Ok(RData::A(Ipv4Addr::from(read_u32(src, offset)?)))
}

fn decode_aaaa(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  if rdlength != 16 {
    return Err(DecodeError::RdataLengthMismatch {
      need: 16,
      len: rdlength,
    });
  }

  let bytes = src
    .get(offset..offset + 16)
    .ok_or(DecodeError::TruncatedMessage {
      offset,
      need: 16,
      len: src.len(),
    })?;
  let mut octets = [0u8; 16];
  octets.copy_from_slice(bytes);
  Ok(RData::AAAA(Ipv6Addr::from(octets)))
}

fn decode_domain_name(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  let (name, end) = Name::decode(src, offset)?;
  if end > offset + rdlength {
    return Err(DecodeError::RdataLengthMismatch {
      need: end - offset,
      len: rdlength,
    });
  }

  Ok(RData::DomainName(name))
}

fn decode_soa(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  Soa::decode(src, offset, rdlength).map(RData::SOA)
}

fn decode_hinfo(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  let (cpu, index) = decode_character_string(src, offset, rdlength, offset)?;
  let (os, _) = decode_character_string(src, offset, rdlength, index)?;
  Ok(RData::HINFO { cpu, os })
}

fn decode_minfo(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  let region = offset + rdlength;
  let (rmailbx, index) = Name::decode(src, offset)?;
  if index > region {
    return Err(DecodeError::RdataLengthMismatch {
      need: index - offset,
      len: rdlength,
    });
  }

  let (emailbx, end) = Name::decode(src, index)?;
  if end > region {
    return Err(DecodeError::RdataLengthMismatch {
      need: end - offset,
      len: rdlength,
    });
  }

  Ok(RData::MINFO { rmailbx, emailbx })
}

fn decode_exchange(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  Exchange::decode(src, offset, rdlength).map(RData::Exchange)
}

fn decode_txt(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  let region = offset + rdlength;
  let mut strings = Vec::new();
  let mut index = offset;
  while index < region {
    let (s, next) = decode_character_string(src, offset, rdlength, index)?;
    strings.push(s);
    index = next;
  }

  Ok(RData::TXT(Arc::from_iter(strings)))
}

fn decode_rp(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  let region = offset + rdlength;
  let (mbox, index) = Name::decode(src, offset)?;
  if index > region {
    return Err(DecodeError::RdataLengthMismatch {
      need: index - offset,
      len: rdlength,
    });
  }

  let (txt_dname, end) = Name::decode(src, index)?;
  if end > region {
    return Err(DecodeError::RdataLengthMismatch {
      need: end - offset,
      len: rdlength,
    });
  }

  Ok(RData::RP { mbox, txt_dname })
}

fn decode_px(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  // Preference plus at least two root names.
  if rdlength < 4 {
    return Err(DecodeError::RdataLengthMismatch {
      need: 4,
      len: rdlength,
    });
  }

  let region = offset + rdlength;
  let preference = read_u16(src, offset)?;
  let (map822, index) = Name::decode(src, offset + 2)?;
  if index > region {
    return Err(DecodeError::RdataLengthMismatch {
      need: index - offset,
      len: rdlength,
    });
  }

  let (mapx400, end) = Name::decode(src, index)?;
  if end > region {
    return Err(DecodeError::RdataLengthMismatch {
      need: end - offset,
      len: rdlength,
    });
  }

  Ok(RData::PX {
    preference,
    map822,
    mapx400,
  })
}

fn decode_srv(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  Srv::decode(src, offset, rdlength).map(RData::SRV)
}

fn decode_nsec(src: &[u8], offset: usize, rdlength: usize) -> Result<RData, DecodeError> {
  Nsec::decode(src, offset, rdlength).map(RData::NSEC)
}
