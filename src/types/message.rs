use super::{MESSAGE_HEADER_SIZE, MessageHeader, Query, ResourceRecord};
use crate::error::{DecodeError, EncodeError};

/// A complete DNS message: the header plus the question, answer, authority
/// and additional sections.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Message {
  header: MessageHeader,
  questions: Vec<Query>,
  answers: Vec<ResourceRecord>,
  authorities: Vec<ResourceRecord>,
  additionals: Vec<ResourceRecord>,
}

impl Message {
  /// Creates a query message with the given id, flags and questions.
  pub fn query(id: u16, flags: u16, questions: Vec<Query>) -> Self {
    Self {
      header: MessageHeader::new(id, flags).with_counts(questions.len() as u16, 0, 0, 0),
      questions,
      answers: Vec::new(),
      authorities: Vec::new(),
      additionals: Vec::new(),
    }
  }

  /// Returns the message header.
  #[inline]
  pub const fn header(&self) -> &MessageHeader {
    &self.header
  }

  /// Returns the question section.
  #[inline]
  pub fn questions(&self) -> &[Query] {
    &self.questions
  }

  /// Returns the answer section.
  #[inline]
  pub fn answers(&self) -> &[ResourceRecord] {
    &self.answers
  }

  /// Returns the authority section.
  #[inline]
  pub fn authorities(&self) -> &[ResourceRecord] {
    &self.authorities
  }

  /// Returns the additional section.
  #[inline]
  pub fn additionals(&self) -> &[ResourceRecord] {
    &self.additionals
  }

  /// Returns an iterator over the records of the answer, authority and
  /// additional sections.
  pub fn records(&self) -> impl Iterator<Item = &ResourceRecord> {
    self
      .answers
      .iter()
      .chain(self.authorities.iter())
      .chain(self.additionals.iter())
  }

  /// Appends a question and bumps the header count.
  pub fn push_question(&mut self, question: Query) {
    self.questions.push(question);
    self.sync_counts();
  }

  /// Appends an answer record and bumps the header count.
  pub fn push_answer(&mut self, record: ResourceRecord) {
    self.answers.push(record);
    self.sync_counts();
  }

  /// Appends an authority record and bumps the header count.
  pub fn push_authority(&mut self, record: ResourceRecord) {
    self.authorities.push(record);
    self.sync_counts();
  }

  /// Appends an additional record and bumps the header count.
  pub fn push_additional(&mut self, record: ResourceRecord) {
    self.additionals.push(record);
    self.sync_counts();
  }

  fn sync_counts(&mut self) {
    self.header = self.header.with_counts(
      self.questions.len() as u16,
      self.answers.len() as u16,
      self.authorities.len() as u16,
      self.additionals.len() as u16,
    );
  }

  /// Decodes a complete message.
  ///
  /// Decoding is strict: the four header counts must be backed by as many
  /// well-formed records, and the first failing sub-decode aborts the whole
  /// message. A partially filled message is never returned.
  pub fn decode(src: &[u8]) -> Result<Self, DecodeError> {
    let header = MessageHeader::decode(src)?;
    let mut offset = MESSAGE_HEADER_SIZE;

    let mut questions = Vec::new();
    for _ in 0..header.question_count() {
      let (question, next) = Query::decode(src, offset)?;
      offset = next;
      questions.push(question);
    }

    let mut sections = [Vec::new(), Vec::new(), Vec::new()];
    for (count, section) in [
      header.answer_count(),
      header.authority_count(),
      header.additional_count(),
    ]
    .into_iter()
    .zip(sections.iter_mut())
    {
      // Never pre-allocate from the count, it is attacker controlled.
      for _ in 0..count {
        let (record, next) = ResourceRecord::decode(src, offset)?;
        offset = next;
        section.push(record);
      }
    }

    let [answers, authorities, additionals] = sections;
    Ok(Self {
      header,
      questions,
      answers,
      authorities,
      additionals,
    })
  }

  /// Appends the wire form of the message to `buf`.
  ///
  /// The header counts are taken from the actual section lengths, not from
  /// the stored header, so the encoded message is always self-consistent.
  pub fn encode_into(&self, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    self
      .header
      .with_counts(
        self.questions.len() as u16,
        self.answers.len() as u16,
        self.authorities.len() as u16,
        self.additionals.len() as u16,
      )
      .encode_into(buf);

    for question in &self.questions {
      question.encode_into(buf)?;
    }
    for record in self.records() {
      record.encode_into(buf)?;
    }
    Ok(())
  }

  /// Returns the wire form of the message.
  pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(MESSAGE_HEADER_SIZE);
    self.encode_into(&mut buf)?;
    Ok(buf)
  }
}

#[cfg(test)]
mod tests {
  use super::super::{DNSClass, Name, RData, RecordType};
  use super::*;

  #[test]
  fn decode_captured_packet() {
    let src = [
      0, 0, 132, 0, 0, 0, 0, 5, 0, 0, 0, 0, 7, 95, 102, 111, 111, 98, 97, 114, 4, 95, 116, 99,
      112, 5, 108, 111, 99, 97, 108, 0, 0, 12, 0, 1, 0, 0, 0, 120, 0, 11, 8, 104, 111, 115, 116,
      110, 97, 109, 101, 192, 12, 192, 42, 0, 33, 0, 1, 0, 0, 0, 120, 0, 16, 0, 10, 0, 1, 0, 80,
      8, 116, 101, 115, 116, 104, 111, 115, 116, 0, 192, 42, 0, 1, 0, 1, 0, 0, 0, 120, 0, 4, 192,
      168, 0, 42, 192, 42, 0, 28, 0, 1, 0, 0, 0, 120, 0, 16, 38, 32, 0, 0, 16, 0, 25, 0, 176, 194,
      208, 178, 196, 17, 24, 188, 192, 42, 0, 16, 0, 1, 0, 0, 0, 120, 0, 17, 16, 76, 111, 99, 97,
      108, 32, 119, 101, 98, 32, 115, 101, 114, 118, 101, 114,
    ];

    let message = Message::decode(&src).unwrap();
    let header = message.header();
    assert!(header.is_response());
    assert!(header.authoritative());
    assert_eq!(header.question_count(), 0);
    assert_eq!(header.answer_count(), 5);
    assert_eq!(message.answers().len(), 5);

    let ptr = &message.answers()[0];
    assert_eq!(ptr.record_type(), RecordType::PTR);
    assert_eq!(ptr.name(), &Name::from("_foobar._tcp.local"));
    let RData::DomainName(target) = ptr.rdata() else {
      panic!("expected a name");
    };
    assert_eq!(target, &Name::from("hostname._foobar._tcp.local"));
    assert_eq!(target.pointer(), Some(12));

    let srv = &message.answers()[1];
    assert_eq!(srv.name(), &Name::from("hostname._foobar._tcp.local"));
    let RData::SRV(srv) = srv.rdata() else {
      panic!("expected SRV");
    };
    assert_eq!(
      (srv.priority(), srv.weight(), srv.port()),
      (10, 1, 80)
    );
    assert_eq!(srv.target(), &Name::from("testhost"));

    assert_eq!(
      message.answers()[2].rdata(),
      &RData::A("192.168.0.42".parse().unwrap())
    );
    assert_eq!(
      message.answers()[3].rdata(),
      &RData::AAAA("2620:0:1000:1900:b0c2:d0b2:c411:18bc".parse().unwrap())
    );

    let RData::TXT(strings) = message.answers()[4].rdata() else {
      panic!("expected TXT");
    };
    assert_eq!(&strings[..], ["Local web server"]);
  }

  #[test]
  fn strict_decode_rejects_truncated_records() {
    // Header claims one answer, buffer ends three bytes into the record.
    let mut buf = Vec::new();
    MessageHeader::new(0, 0)
      .with_counts(0, 1, 0, 0)
      .encode_into(&mut buf);
    buf.extend_from_slice(&[0x04, b'h', b'o', b's']);

    assert!(matches!(
      Message::decode(&buf),
      Err(DecodeError::TruncatedMessage { .. })
    ));
  }

  #[test]
  fn counts_follow_sections() {
    let mut message = Message::query(1, 0, vec![Query::new("host.local")]);
    message.push_answer(ResourceRecord::new(
      Name::from("host.local"),
      RecordType::A,
      DNSClass::IN,
      120,
      RData::A("127.0.0.1".parse().unwrap()),
    ));

    assert_eq!(message.header().question_count(), 1);
    assert_eq!(message.header().answer_count(), 1);

    let decoded = Message::decode(&message.encode().unwrap()).unwrap();
    assert_eq!(decoded, message);
  }
}
