use std::net::Ipv4Addr;

use crate::{
    errors::DNSError,
    labelstring::LabelString,
    reader::Reader,
    structs::{Class, Header, Message, Question, RData, RRClass, RRType, Resource, Type, RR},
};

type Result<T> = std::result::Result<T, DNSError>;

pub const HEADER_SIZE: usize = 12;
pub const MAX_DATAGRAM_SIZE: usize = 512;

const MAX_LABEL_LENGTH: usize = 63;
// A 255 byte name holds at most 127 one byte labels
const MAX_LABELS: usize = 127;
const MAX_POINTER_HOPS: usize = 16;
const POINTER_MASK: u8 = 0b1100_0000;

impl From<Type> for u16 {
    fn from(value: Type) -> Self {
        match value {
            Type::Type(t) => t as u16,
            Type::Other(x) => x,
        }
    }
}

impl From<Class> for u16 {
    fn from(value: Class) -> Self {
        match value {
            Class::Class(t) => t as u16,
            Class::Other(x) => x,
        }
    }
}

impl From<u16> for Type {
    fn from(value: u16) -> Self {
        match RRType::try_from(value) {
            Ok(rrtype) => Type::Type(rrtype),
            Err(x) => Type::Other(x),
        }
    }
}

impl From<u16> for Class {
    fn from(value: u16) -> Self {
        match RRClass::try_from(value) {
            Ok(rrclass) => Class::Class(rrclass),
            Err(x) => Class::Other(x),
        }
    }
}

impl RData {
    pub fn len(&self) -> usize {
        match self {
            RData::A(_) => 4,
            RData::Raw(bytes) => bytes.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_vec(&self) -> Vec<u8> {
        match self {
            RData::A(address) => address.octets().to_vec(),
            RData::Raw(bytes) => bytes.clone(),
        }
    }
}

pub trait FromBytes {
    fn from_bytes(reader: &mut Reader) -> Result<Self>
    where
        Self: Sized;
}

pub trait ToBytes {
    fn to_bytes(&self) -> Result<Vec<u8>>;
}

/// Decodes a `T` starting at `offset` of `buffer`, returning it together
/// with the offset of the first byte after it.
pub fn decode_at<T: FromBytes>(buffer: &[u8], offset: usize) -> Result<(T, usize)> {
    let mut reader = Reader::new(buffer);
    reader.skip(offset)?;
    let value = T::from_bytes(&mut reader)?;
    Ok((value, reader.position()))
}

pub fn encode_name(name: &str) -> Result<Vec<u8>> {
    LabelString::from(name).to_bytes()
}

pub fn decode_name(buffer: &[u8], offset: usize) -> Result<(LabelString, usize)> {
    if offset > buffer.len() {
        return Err(DNSError::MalformedName {
            offset,
            message: format!("name starts past the end of a {} byte message", buffer.len()),
        });
    }
    decode_at(buffer, offset)
}

/// Decodes the header and the question section. Answers are left empty,
/// whatever ANCOUNT says.
pub fn decode_message(buffer: &[u8]) -> Result<Message> {
    read_message(&mut Reader::new(buffer), false)
}

pub fn decode_message_with_answers(buffer: &[u8]) -> Result<Message> {
    read_message(&mut Reader::new(buffer), true)
}

pub fn encode_message(message: &Message) -> Result<Vec<u8>> {
    message.to_bytes()
}

impl FromBytes for Header {
    fn from_bytes(reader: &mut Reader) -> Result<Self> {
        if reader.unread_bytes() < HEADER_SIZE {
            return Err(DNSError::TruncatedHeader {
                available: reader.unread_bytes(),
            });
        }

        let id = reader.read_u16()?;
        let flags = reader.read_u16()?;
        Ok(Header {
            id,
            qr: flags & (1 << 15) != 0,
            opcode: ((flags >> 11) & 0b1111) as u8,
            aa: flags & (1 << 10) != 0,
            tc: flags & (1 << 9) != 0,
            rd: flags & (1 << 8) != 0,
            ra: flags & (1 << 7) != 0,
            rcode: (flags & 0b1111) as u8,
            qdcount: reader.read_u16()?,
            ancount: reader.read_u16()?,
            nscount: reader.read_u16()?,
            arcount: reader.read_u16()?,
        })
    }
}

impl ToBytes for Header {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        for (field, value) in [("opcode", self.opcode), ("rcode", self.rcode)] {
            if value > 0b1111 {
                return Err(DNSError::FieldOutOfRange { field, value });
            }
        }

        let mut flags = (u16::from(self.opcode) << 11) | u16::from(self.rcode);
        for (bit, set) in [
            (15, self.qr),
            (10, self.aa),
            (9, self.tc),
            (8, self.rd),
            (7, self.ra),
        ] {
            if set {
                flags |= 1 << bit;
            }
        }

        let mut result = [0u8; HEADER_SIZE];
        result[0..2].copy_from_slice(&u16::to_be_bytes(self.id));
        result[2..4].copy_from_slice(&u16::to_be_bytes(flags));
        result[4..6].copy_from_slice(&u16::to_be_bytes(self.qdcount));
        result[6..8].copy_from_slice(&u16::to_be_bytes(self.ancount));
        result[8..10].copy_from_slice(&u16::to_be_bytes(self.nscount));
        result[10..12].copy_from_slice(&u16::to_be_bytes(self.arcount));

        Ok(result.to_vec())
    }
}

/// Why `label` cannot be a label of a dotted ASCII name, if it cannot.
fn label_problem(label: &[u8]) -> Option<&'static str> {
    if !label.is_ascii() {
        Some("label is not ASCII")
    } else if label.contains(&b'.') {
        Some("label contains a dot")
    } else {
        None
    }
}

fn read_labels(reader: &mut Reader, labels: &mut Vec<String>, hops: usize) -> Result<()> {
    // Behind a pointer the visible buffer ends where that pointer starts, so
    // running off its end means the name leads back into its own pointer.
    let overrun = |offset: usize, message: String| {
        if hops > 0 {
            DNSError::PointerLoop { offset }
        } else {
            DNSError::MalformedName { offset, message }
        }
    };

    loop {
        let offset = reader.position();
        let code = reader
            .read_u8()
            .map_err(|_| overrun(offset, String::from("name is not terminated")))?;

        if code == 0 {
            return Ok(());
        }

        match code & POINTER_MASK {
            0 => {
                let length = code as usize;
                if reader.unread_bytes() < length {
                    return Err(overrun(
                        offset,
                        format!("label of {} bytes runs past the end of the message", length),
                    ));
                }
                if labels.len() == MAX_LABELS {
                    return Err(DNSError::TooManyLabels { max: MAX_LABELS });
                }
                let bytes = reader.read(length)?;
                if let Some(problem) = label_problem(&bytes) {
                    return Err(DNSError::MalformedName {
                        offset,
                        message: String::from(problem),
                    });
                }
                let label = String::from_utf8(bytes).map_err(|e| DNSError::MalformedName {
                    offset,
                    message: e.to_string(),
                })?;
                labels.push(label);
            }
            POINTER_MASK => {
                if hops == MAX_POINTER_HOPS {
                    return Err(DNSError::PointerLoop { offset });
                }
                let low = reader
                    .read_u8()
                    .map_err(|_| overrun(offset, String::from("compression pointer is cut off")))?;
                let target = (((code & !POINTER_MASK) as usize) << 8) | low as usize;

                // The caller's reader now sits right after the pointer; the
                // rest of the name is read through a separate cursor.
                let mut reader_past = reader.seek(target, offset)?;
                return read_labels(&mut reader_past, labels, hops + 1);
            }
            _ => {
                return Err(DNSError::MalformedName {
                    offset,
                    message: format!("unsupported label type {:#04x}", code & POINTER_MASK),
                })
            }
        }
    }
}

impl FromBytes for LabelString {
    fn from_bytes(reader: &mut Reader) -> Result<Self> {
        let mut labels = vec![];
        read_labels(reader, &mut labels, 0)?;
        Ok(labels.into())
    }
}

impl ToBytes for LabelString {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.len() > MAX_LABELS {
            return Err(DNSError::TooManyLabels { max: MAX_LABELS });
        }

        let mut result: Vec<u8> = vec![];
        for label in self.as_slice() {
            if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
                return Err(DNSError::LabelTooLong {
                    label: label.to_owned(),
                    length: label.len(),
                });
            }
            if let Some(problem) = label_problem(label.as_bytes()) {
                return Err(DNSError::InvalidLabel {
                    label: label.to_owned(),
                    message: String::from(problem),
                });
            }
            result.push(label.len() as u8);
            result.extend(label.as_bytes());
        }
        result.push(0);
        Ok(result)
    }
}

fn resource_to_bytes(resource: &impl Resource) -> Result<Vec<u8>> {
    let mut result = resource.name().to_bytes()?;
    result.extend(u16::to_be_bytes(resource.rtype().clone().into()));
    result.extend(u16::to_be_bytes(resource.class().clone().into()));
    Ok(result)
}

impl FromBytes for Question {
    fn from_bytes(reader: &mut Reader) -> Result<Self> {
        let qname = LabelString::from_bytes(reader)?;

        if reader.unread_bytes() < 4 {
            Err(DNSError::TruncatedQuestion {
                offset: reader.position(),
                available: reader.unread_bytes(),
            })
        } else {
            let qtype = Type::from(reader.read_u16()?);
            let qclass = Class::from(reader.read_u16()?);

            Ok(Question {
                qname,
                qtype,
                qclass,
            })
        }
    }
}

impl ToBytes for Question {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        resource_to_bytes(self)
    }
}

impl FromBytes for RR {
    fn from_bytes(reader: &mut Reader) -> Result<Self> {
        let name = LabelString::from_bytes(reader)?;

        // TYPE, CLASS, TTL and RDLENGTH
        if reader.unread_bytes() < 10 {
            return Err(DNSError::TruncatedAnswer {
                offset: reader.position(),
                message: format!(
                    "{} bytes left for 10 bytes of fixed fields",
                    reader.unread_bytes()
                ),
            });
        }
        let _type = Type::from(reader.read_u16()?);
        let class = Class::from(reader.read_u16()?);
        let ttl = reader.read_u32()?;
        let rdlength = reader.read_u16()?;

        if reader.unread_bytes() < rdlength as usize {
            return Err(DNSError::TruncatedAnswer {
                offset: reader.position(),
                message: format!(
                    "RDLENGTH is {} but only {} bytes left",
                    rdlength,
                    reader.unread_bytes()
                ),
            });
        }
        let data = reader.read(rdlength as usize)?;
        let rdata = match (&_type, <[u8; 4]>::try_from(data.as_slice())) {
            (Type::Type(RRType::A), Ok(octets)) => RData::A(Ipv4Addr::from(octets)),
            _ => RData::Raw(data),
        };

        Ok(RR {
            name,
            _type,
            class,
            ttl,
            rdlength,
            rdata,
        })
    }
}

impl ToBytes for RR {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.rdata.len() != self.rdlength as usize {
            return Err(DNSError::RDataLengthMismatch {
                declared: self.rdlength,
                actual: self.rdata.len(),
            });
        }

        let mut result = resource_to_bytes(self)?;
        result.extend(u32::to_be_bytes(self.ttl));
        result.extend(u16::to_be_bytes(self.rdlength));
        result.extend(self.rdata.to_vec());
        Ok(result)
    }
}

fn section_count(section: &'static str, count: usize) -> Result<u16> {
    u16::try_from(count).map_err(|_| DNSError::TooManyRecords { section, count })
}

fn read_message(reader: &mut Reader, with_answers: bool) -> Result<Message> {
    if reader.unread_bytes() < HEADER_SIZE {
        return Err(DNSError::ShortMessage {
            length: reader.unread_bytes(),
        });
    }
    let header = Header::from_bytes(reader)?;

    let mut question = vec![];
    for _ in 0..header.qdcount {
        question.push(Question::from_bytes(reader)?);
    }

    let mut answer = vec![];
    if with_answers {
        for _ in 0..header.ancount {
            answer.push(RR::from_bytes(reader)?);
        }
    }

    Ok(Message {
        header,
        question,
        answer,
    })
}

impl FromBytes for Message {
    fn from_bytes(reader: &mut Reader) -> Result<Self> {
        read_message(reader, true)
    }
}

impl ToBytes for Message {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        // Counts always describe the sections actually written
        let header = Header {
            qdcount: section_count("question", self.question.len())?,
            ancount: section_count("answer", self.answer.len())?,
            nscount: 0,
            arcount: 0,
            ..self.header.clone()
        };

        let mut result = header.to_bytes()?;
        for question in &self.question {
            result.extend(question.to_bytes()?);
        }
        for answer in &self.answer {
            result.extend(answer.to_bytes()?);
        }
        Ok(result)
    }
}
