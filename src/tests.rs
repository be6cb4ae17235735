use std::net::{Ipv4Addr, Ipv6Addr};

use triomphe::Arc;

use crate::*;

fn sample_message() -> Message {
  let mut message = Message::query(
    0x2B91,
    0,
    vec![
      Query::new("_http._tcp.local").with_query_type(RecordType::PTR),
      Query::new("printer.local").with_unicast_response(true),
    ],
  );

  message.push_answer(ResourceRecord::new(
    Name::from("host.local"),
    RecordType::A,
    DNSClass::IN,
    120,
    RData::A(Ipv4Addr::new(192, 168, 0, 42)),
  ));
  message.push_answer(
    ResourceRecord::new(
      Name::from("host.local"),
      RecordType::AAAA,
      DNSClass::IN,
      120,
      RData::AAAA(Ipv6Addr::LOCALHOST),
    )
    .with_cache_flush(true),
  );
  message.push_answer(ResourceRecord::new(
    Name::from("_http._tcp.local"),
    RecordType::PTR,
    DNSClass::IN,
    4500,
    RData::DomainName(Name::from("web._http._tcp.local")),
  ));
  message.push_answer(ResourceRecord::new(
    Name::from("local"),
    RecordType::SOA,
    DNSClass::IN,
    3600,
    RData::SOA(Soa::new(
      Name::from("ns.local"),
      Name::from("hostmaster.local"),
      2024010101,
      7200,
      900,
      1209600,
      120,
    )),
  ));
  message.push_answer(ResourceRecord::new(
    Name::from("host.local"),
    RecordType::HINFO,
    DNSClass::IN,
    120,
    RData::HINFO {
      cpu: "ARM64".into(),
      os: "linux".into(),
    },
  ));
  message.push_answer(ResourceRecord::new(
    Name::from("list.local"),
    RecordType::MINFO,
    DNSClass::IN,
    120,
    RData::MINFO {
      rmailbx: Name::from("requests.local"),
      emailbx: Name::from("errors.local"),
    },
  ));
  message.push_answer(ResourceRecord::new(
    Name::from("local"),
    RecordType::MX,
    DNSClass::IN,
    120,
    RData::Exchange(Exchange::new(10, Name::from("mail.local"))),
  ));
  message.push_answer(ResourceRecord::new(
    Name::from("host.local"),
    RecordType::RP,
    DNSClass::IN,
    120,
    RData::RP {
      mbox: Name::from("admin.local"),
      txt_dname: Name::from("admin-info.local"),
    },
  ));
  message.push_answer(ResourceRecord::new(
    Name::from("local"),
    RecordType::PX,
    DNSClass::IN,
    120,
    RData::PX {
      preference: 10,
      map822: Name::from("mail.local"),
      mapx400: Name::from("x400.local"),
    },
  ));
  message.push_answer(ResourceRecord::new(
    Name::from("web._http._tcp.local"),
    RecordType::SRV,
    DNSClass::IN,
    120,
    RData::SRV(Srv::new(0, 0, 8080, Name::from("host.local"))),
  ));
  message.push_answer(ResourceRecord::new(
    Name::from("host.local"),
    RecordType::TXT,
    DNSClass::IN,
    4500,
    RData::TXT(Arc::from_iter(["path=/".into(), "version=1".into()])),
  ));
  message.push_authority(ResourceRecord::new(
    Name::from("host.local"),
    RecordType::NSEC,
    DNSClass::IN,
    120,
    RData::NSEC(Nsec::new(
      Name::from("host.local"),
      [RecordType::A, RecordType::AAAA],
    )),
  ));
  message.push_additional(ResourceRecord::new(
    Name::from("host.local"),
    RecordType::UNKNOWN(200),
    DNSClass::IN,
    120,
    RData::Raw(Arc::from(vec![0xDE, 0xAD, 0xBE, 0xEF])),
  ));
  message.push_additional(ResourceRecord::opt(
    1440,
    vec![EdnsOption::new(4, vec![1, 2, 3, 4])],
  ));
  message
}

#[test]
fn message_round_trip() {
  let message = sample_message();
  let bytes = encode_message(&message).unwrap();
  let decoded = decode_message(&bytes).unwrap();
  assert_eq!(decoded, message);

  // A second pass over re-encoded bytes must be byte-identical.
  assert_eq!(encode_message(&decoded).unwrap(), bytes);
}

#[test]
fn name_codec_round_trip() {
  for name in ["", "local", "a.b.c", "_services._dns-sd._udp.local"] {
    let name = Name::from(name);
    let mut buf = Vec::new();
    name.encode_into(&mut buf).unwrap();
    assert_eq!(Name::decode(&buf, 0).unwrap(), (name, buf.len()));
  }
}

#[test]
fn short_buffers_are_truncated_headers() {
  for len in 0..12 {
    assert_eq!(
      decode_message(&vec![0u8; len]).unwrap_err(),
      DecodeError::TruncatedHeader(len)
    );
  }
}

#[test]
fn question_for_http_tcp_local() {
  let mut bytes = vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
  bytes.extend_from_slice(b"\x05_http\x04_tcp\x05local\x00");
  bytes.extend_from_slice(&[0x00, 0x0C]); // PTR
  bytes.extend_from_slice(&[0x00, 0xFF]); // ANY class

  let message = decode_message(&bytes).unwrap();
  assert_eq!(message.header().id(), 1);

  let question = &message.questions()[0];
  assert_eq!(question.name().labels(), Name::from("_http._tcp.local").labels());
  assert_eq!(question.query_type(), RecordType::PTR);
  assert_eq!(question.query_class(), DNSClass::ANY);
  assert!(!question.wants_unicast_response());
  assert_eq!(question.consumed_bytes(), bytes.len() - 12);
}

#[test]
fn shared_suffix_names_decode_identically() {
  // Two A records; the second name is a pointer to the first one at
  // offset 12.
  let mut bytes = vec![0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0];
  bytes.extend_from_slice(b"\x04disk\x05local\x00");
  bytes.extend_from_slice(&[0, 1, 0, 1, 0, 0, 0, 120, 0, 4, 127, 0, 0, 1]);
  bytes.extend_from_slice(&[0xC0, 12]);
  bytes.extend_from_slice(&[0, 1, 0, 1, 0, 0, 0, 120, 0, 4, 127, 0, 0, 2]);

  let message = decode_message(&bytes).unwrap();
  let answers = message.answers();
  assert_eq!(answers[0].name(), answers[1].name());
  assert_eq!(answers[1].name().pointer(), Some(12));
  assert_eq!(answers[1].name().labels(), Name::from("disk.local").labels());
}

#[test]
fn a_record_with_wrong_rdlength_is_rejected() {
  let mut bytes = vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0];
  bytes.extend_from_slice(b"\x04host\x00");
  bytes.extend_from_slice(&[0, 1, 0, 1, 0, 0, 0, 120, 0, 3, 127, 0, 0]);

  assert_eq!(
    decode_message(&bytes).unwrap_err(),
    DecodeError::RdataLengthMismatch { need: 4, len: 3 }
  );
}

#[test]
fn malformed_opt_option_is_rejected() {
  let mut bytes = vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
  bytes.push(0x00); // root name
  bytes.extend_from_slice(&[0, 41]); // OPT
  bytes.extend_from_slice(&[0x05, 0xA0]); // payload size 1440
  bytes.extend_from_slice(&[0, 0, 0, 0]);
  bytes.extend_from_slice(&[0, 4]); // rdlength 4
  bytes.extend_from_slice(&[0, 4, 0, 2]); // option wants 2 more bytes

  assert_eq!(
    decode_message(&bytes).unwrap_err(),
    DecodeError::MalformedOption {
      need: 6,
      remaining: 4
    }
  );
}

#[test]
fn built_query_survives_the_wire() {
  let query = Query::new("some.domain.name");
  let bytes = encode_message(&Message::query(0, 0, vec![query])).unwrap();

  let decoded = decode_message(&bytes).unwrap();
  let question = &decoded.questions()[0];
  assert_eq!(question.name().labels(), ["some", "domain", "name"]);
  assert_eq!(question.query_type(), RecordType::ANY);
  assert_eq!(question.query_class(), DNSClass::IN);
}

#[test]
fn concurrent_decodes_share_nothing() {
  let bytes = encode_message(&sample_message()).unwrap();

  std::thread::scope(|scope| {
    for _ in 0..4 {
      scope.spawn(|| {
        for _ in 0..100 {
          decode_message(&bytes).unwrap();
        }
      });
    }
  });
}
