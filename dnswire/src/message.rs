use crate::{
    errors::DNSError,
    parser::{ToBytes, MAX_DATAGRAM_SIZE},
    structs::{Header, Message, Opcode, RCODE, RR},
};

// Encoding rewrites the counts and rejects sections that do not fit in one
fn saturating_count(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

impl Message {
    /// A response to `self` without answers: same ID, OPCODE, RD and
    /// questions, QR set.
    pub fn response(&self) -> Message {
        Message {
            header: Header {
                id: self.header.id,
                qr: true,
                opcode: self.header.opcode,
                rd: self.header.rd,
                qdcount: saturating_count(self.question.len()),
                ..Header::default()
            },
            question: self.question.clone(),
            answer: vec![],
        }
    }

    pub fn set_response(&mut self, rcode: RCODE) {
        self.header.qr = true;
        self.header.rcode = rcode as u8;
    }

    pub fn get_opcode(&self) -> Result<Opcode, u8> {
        Opcode::try_from(self.header.opcode)
    }

    pub fn get_rcode(&self) -> Result<RCODE, u8> {
        RCODE::try_from(self.header.rcode)
    }

    pub fn extend_answer(&mut self, rrs: Vec<RR>) {
        self.answer.extend(rrs);
        self.header.ancount = saturating_count(self.answer.len());
    }

    /// Encodes the message for a single UDP datagram. If it does not fit,
    /// the answers are dropped and TC is set.
    pub fn to_datagram(&self) -> Result<Vec<u8>, DNSError> {
        let bytes = self.to_bytes()?;
        if bytes.len() <= MAX_DATAGRAM_SIZE {
            return Ok(bytes);
        }

        let mut truncated = self.clone();
        truncated.answer.clear();
        truncated.header.ancount = 0;
        truncated.header.tc = true;
        truncated.to_bytes()
    }
}

#[cfg(test)]
mod tests {

    use crate::{
        labelstring::LabelString,
        parser::decode_message_with_answers,
        test_utils::{get_message, get_rr},
    };

    use super::*;

    #[test]
    fn test() {
        let mut message = Message {
            header: Header {
                id: 1,
                rd: true,
                ..Header::default()
            },
            question: vec![],
            answer: vec![],
        };

        assert_eq!(message.get_opcode(), Ok(Opcode::QUERY));

        message.set_response(RCODE::NOTIMP);

        assert!(message.header.qr);

        assert_eq!(message.get_rcode(), Ok(RCODE::NOTIMP));

        message.header.opcode = 3;
        assert_eq!(message.get_opcode(), Err(3));
    }

    #[test]
    fn test_response() {
        let mut query = get_message(None);
        query.header.opcode = Opcode::STATUS as u8;
        query.header.aa = true;
        query.header.rcode = 5;

        let response = query.response();
        assert_eq!(response.header.id, 1);
        assert!(response.header.qr);
        assert!(response.header.rd);
        assert!(!response.header.aa);
        assert_eq!(response.header.opcode, 2);
        assert_eq!(response.header.rcode, 0);
        assert_eq!(response.header.qdcount, 2);
        assert_eq!(response.header.ancount, 0);
        assert_eq!(response.question, query.question);
        assert!(response.answer.is_empty());
    }

    #[test]
    fn test_extend_answer() {
        let mut message = get_message(None);
        message.extend_answer(vec![get_rr(None), get_rr(None)]);

        assert_eq!(message.answer.len(), 3);
        assert_eq!(message.header.ancount, 3);
    }

    #[test]
    fn test_to_datagram_fits() {
        let message = get_message(None);
        assert_eq!(message.to_datagram(), message.to_bytes());
    }

    #[test]
    fn test_to_datagram_truncates() {
        let mut message = get_message(Some(LabelString::from(&format!(
            "{}.com",
            "a".repeat(63)
        ))));
        message.extend_answer(vec![message.answer[0].clone(); 8]);
        assert!(message.to_bytes().unwrap().len() > MAX_DATAGRAM_SIZE);

        let bytes = message.to_datagram().unwrap();
        assert!(bytes.len() <= MAX_DATAGRAM_SIZE);

        let parsed = decode_message_with_answers(&bytes).unwrap();
        assert!(parsed.header.tc);
        assert_eq!(parsed.header.ancount, 0);
        assert_eq!(parsed.question.len(), 2);
    }
}
