use std::net::Ipv4Addr;

use crate::labelstring::LabelString;
use crate::structs::*;

pub fn get_rr(name: Option<LabelString>) -> RR {
    RR {
        name: name.unwrap_or(LabelString::from("example.org")),
        _type: Type::Type(RRType::A),
        class: Class::Class(RRClass::IN),
        ttl: 10,
        rdlength: 4,
        rdata: RData::A(Ipv4Addr::new(1, 2, 3, 4)),
    }
}

pub fn get_question(name: Option<LabelString>, qtype: RRType) -> Question {
    Question {
        qname: name.unwrap_or(LabelString::from("example.org")),
        qtype: Type::Type(qtype),
        qclass: Class::Class(RRClass::IN),
    }
}

pub fn get_message(name: Option<LabelString>) -> Message {
    Message {
        header: Header {
            id: 1,
            rd: true,
            qdcount: 2,
            ancount: 1,
            ..Header::default()
        },
        question: vec![
            get_question(name.clone(), RRType::A),
            get_question(name.clone(), RRType::A),
        ],
        answer: vec![get_rr(name)],
    }
}
