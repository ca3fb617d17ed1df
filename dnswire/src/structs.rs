use std::net::Ipv4Addr;

use int_enum::IntEnum;

use crate::labelstring::LabelString;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Type {
    Type(RRType),
    Other(u16),
}

#[repr(u16)]
#[derive(Debug, Clone, PartialEq, IntEnum)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum RRType {
    A = 1,
    NS = 2,
    CNAME = 5,
    SOA = 6,
    PTR = 12,
    MX = 15,
    TXT = 16,
    AAAA = 28,
    ANY = 255,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Class {
    Class(RRClass),
    Other(u16),
}

#[repr(u16)]
#[derive(Debug, Clone, PartialEq, IntEnum)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum RRClass {
    IN = 1,
    CH = 3,
    HS = 4,
    NONE = 254,
    ANY = 255,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, IntEnum, PartialEq)]
pub enum RCODE {
    NOERROR = 0,
    FORMERR = 1,
    SERVFAIL = 2,
    NXDOMAIN = 3,
    NOTIMP = 4,
    REFUSED = 5,
    YXDOMAIN = 6,
    YXRRSET = 7,
    NXRRSET = 8,
    NOTAUTH = 9,
    NOTZONE = 10,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, IntEnum, PartialEq)]
pub enum Opcode {
    QUERY = 0,
    IQUERY = 1,
    STATUS = 2,
    NOTIFY = 4,
    UPDATE = 5,
}

/// Type specific payload of a resource record.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq)]
pub enum RData {
    A(Ipv4Addr),
    Raw(Vec<u8>),
}

/// The (name, type, class) triple shared by questions and resource records.
pub trait Resource {
    fn name(&self) -> &LabelString;
    fn rtype(&self) -> &Type;
    fn class(&self) -> &Class;
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Question {
    pub qname: LabelString,
    pub qtype: Type,
    pub qclass: Class,
}

// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   | ; 1 | 4 | 1 | 1 | 1 | 1 | 3 | 4
//
// Z is reserved: never stored, always written as zero.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    /// 4 bits on the wire; larger values fail to encode.
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    /// 4 bits on the wire; larger values fail to encode.
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Message {
    pub header: Header,
    pub question: Vec<Question>,
    pub answer: Vec<RR>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct RR {
    pub name: LabelString,
    pub _type: Type,
    pub class: Class,
    pub ttl: u32,
    pub rdlength: u16,
    pub rdata: RData,
}

impl Resource for Question {
    fn name(&self) -> &LabelString {
        &self.qname
    }

    fn rtype(&self) -> &Type {
        &self.qtype
    }

    fn class(&self) -> &Class {
        &self.qclass
    }
}

impl Resource for RR {
    fn name(&self) -> &LabelString {
        &self.name
    }

    fn rtype(&self) -> &Type {
        &self._type
    }

    fn class(&self) -> &Class {
        &self.class
    }
}
