#![no_main]

use dnswire::{
    parser::{decode_message_with_answers, ToBytes},
    structs::{Class, Message, RData, RRType, Type},
};
use libfuzzer_sys::fuzz_target;

/// What the message looks like after a trip over the wire: counts follow
/// the sections, known type and class numbers come back as their named
/// variants, and only A records carry addresses.
fn normalize(mut message: Message) -> Message {
    message.header.qdcount = message.question.len() as u16;
    message.header.ancount = message.answer.len() as u16;
    message.header.nscount = 0;
    message.header.arcount = 0;

    for question in &mut message.question {
        question.qtype = Type::from(u16::from(question.qtype.clone()));
        question.qclass = Class::from(u16::from(question.qclass.clone()));
    }
    for rr in &mut message.answer {
        rr._type = Type::from(u16::from(rr._type.clone()));
        rr.class = Class::from(u16::from(rr.class.clone()));
        rr.rdata = match (&rr._type, &rr.rdata) {
            (Type::Type(RRType::A), RData::Raw(bytes)) => {
                match <[u8; 4]>::try_from(bytes.as_slice()) {
                    Ok(octets) => RData::A(octets.into()),
                    Err(_) => rr.rdata.clone(),
                }
            }
            (Type::Type(RRType::A), RData::A(_)) => rr.rdata.clone(),
            (_, RData::A(address)) => RData::Raw(address.octets().to_vec()),
            (_, RData::Raw(_)) => rr.rdata.clone(),
        };
    }
    message
}

fuzz_target!(|message: Message| {
    // Whatever encodes must decode to the same message
    if let Ok(bytes) = message.to_bytes() {
        let parsed = decode_message_with_answers(&bytes).expect("encoded message decodes");
        assert_eq!(parsed, normalize(message));
    }
});
