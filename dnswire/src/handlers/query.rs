use tracing::debug;

use crate::{
    config::ResponseConfig,
    structs::{Class, Message, RData, RRClass, RRType, Type, RCODE, RR},
};

use super::ResponseHandler;

pub struct QueryHandler {}

impl ResponseHandler for QueryHandler {
    fn handle(message: &Message, config: &ResponseConfig) -> Message {
        let mut response = message.response();

        let answers = message
            .question
            .iter()
            .filter(|question| {
                let supported = question.qtype == Type::Type(RRType::A)
                    && question.qclass == Class::Class(RRClass::IN);
                if !supported {
                    debug!(
                        qname = %question.qname,
                        qtype = ?question.qtype,
                        qclass = ?question.qclass,
                        "no record for question"
                    );
                }
                supported
            })
            .map(|question| RR {
                name: question.qname.clone(),
                _type: Type::Type(RRType::A),
                class: Class::Class(RRClass::IN),
                ttl: config.ttl,
                rdlength: 4,
                rdata: RData::A(config.address),
            })
            .collect();

        response.extend_answer(answers);
        response.set_response(RCODE::NOERROR);
        response
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use crate::{
        labelstring::LabelString,
        structs::{Header, Question},
        test_utils::get_question,
    };

    use super::*;

    #[test]
    fn test_answers_only_a_in() {
        let message = Message {
            header: Header {
                id: 9,
                qdcount: 4,
                ..Header::default()
            },
            question: vec![
                get_question(Some(LabelString::from("google.com")), RRType::A),
                get_question(Some(LabelString::from("example.com")), RRType::MX),
                Question {
                    qname: LabelString::from("example.net"),
                    qtype: Type::Type(RRType::A),
                    qclass: Class::Class(RRClass::CH),
                },
                get_question(Some(LabelString::from("example.net")), RRType::A),
            ],
            answer: vec![],
        };
        let config = ResponseConfig {
            address: Ipv4Addr::new(10, 0, 0, 1),
            ttl: 300,
        };

        let response = QueryHandler::handle(&message, &config);

        assert_eq!(response.question, message.question);
        assert_eq!(response.header.ancount, 2);
        let names: Vec<String> = response.answer.iter().map(|rr| rr.name.to_string()).collect();
        assert_eq!(names, vec!["google.com", "example.net"]);
        for answer in &response.answer {
            assert_eq!(answer.ttl, 300);
            assert_eq!(answer.rdata, RData::A(Ipv4Addr::new(10, 0, 0, 1)));
        }
    }
}
