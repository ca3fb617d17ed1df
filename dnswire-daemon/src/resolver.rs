use std::sync::Arc;

use dnswire::config::ResponseConfig;
use dnswire::errors::DNSError;
use dnswire::handlers::{Handler, ResponseHandler};
use dnswire::parser::{decode_message, MAX_DATAGRAM_SIZE};
use tokio::net::UdpSocket;
use tracing::{debug, error, warn};

pub fn get_response(bytes: &[u8], config: &ResponseConfig) -> Result<Vec<u8>, DNSError> {
    let message = decode_message(bytes)?;
    debug!(
        id = message.header.id,
        questions = message.question.len(),
        "received query"
    );
    Handler::handle(&message, config).to_datagram()
}

/// Serves one datagram per spawned task. Malformed datagrams are logged and
/// dropped, as are receive errors; the loop itself never returns.
pub async fn udp_listener_loop(socket: UdpSocket, config: Arc<ResponseConfig>) {
    let socket_shared = Arc::new(socket);
    loop {
        let mut data = vec![0u8; MAX_DATAGRAM_SIZE];
        let (len, addr) = match socket_shared.recv_from(&mut data).await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "failed to receive datagram");
                continue;
            }
        };
        let socket = socket_shared.clone();
        let config = config.clone();
        tokio::spawn(async move {
            match get_response(&data[..len], &config) {
                Ok(response) => {
                    if let Err(e) = socket.send_to(&response, addr).await {
                        error!(%addr, error = %e, "failed to send response");
                    }
                }
                Err(e) => warn!(%addr, error = %e, rcode = ?e.rcode(), "dropping datagram"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use dnswire::labelstring::LabelString;
    use dnswire::parser::{decode_message_with_answers, ToBytes};
    use dnswire::structs::{Header, Message, RData, RRType, RCODE};
    use dnswire::test_utils::get_question;

    use super::*;

    fn get_query(opcode: u8) -> Message {
        Message {
            header: Header {
                id: 0x1234,
                opcode,
                rd: true,
                qdcount: 3,
                ..Header::default()
            },
            question: vec![
                get_question(Some(LabelString::from("google.com")), RRType::A),
                get_question(Some(LabelString::from("example.com")), RRType::AAAA),
                get_question(Some(LabelString::from("example.net")), RRType::A),
            ],
            answer: vec![],
        }
    }

    #[test]
    fn test_get_response() {
        let bytes = get_query(0).to_bytes().unwrap();

        let response =
            decode_message_with_answers(&get_response(&bytes, &ResponseConfig::default()).unwrap())
                .unwrap();

        assert_eq!(response.header.id, 0x1234);
        assert_eq!(response.get_rcode(), Ok(RCODE::NOERROR));
        assert_eq!(response.header.qdcount, 3);
        assert_eq!(response.header.ancount, 2);
        assert_eq!(response.answer[1].name, LabelString::from("example.net"));
    }

    #[test]
    fn test_get_response_malformed() {
        let bytes = get_query(0).to_bytes().unwrap();

        assert_eq!(
            get_response(&bytes[..10], &ResponseConfig::default()),
            Err(DNSError::ShortMessage { length: 10 })
        );
        assert!(get_response(&bytes[..bytes.len() - 2], &ResponseConfig::default()).is_err());
    }

    #[tokio::test]
    async fn test_udp_listener_loop() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();
        let config = Arc::new(ResponseConfig {
            address: "192.0.2.1".parse().unwrap(),
            ttl: 120,
        });
        tokio::spawn(udp_listener_loop(server, config));

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.connect(server_addr).await.unwrap();

        // Garbage is dropped without killing the loop
        client.send(&[0xff; 5]).await.unwrap();
        client.send(&get_query(1).to_bytes().unwrap()).await.unwrap();
        client.send(&get_query(0).to_bytes().unwrap()).await.unwrap();

        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let mut responses = vec![];
        for _ in 0..2 {
            let len = client.recv(&mut buf).await.unwrap();
            responses.push(decode_message_with_answers(&buf[..len]).unwrap());
        }
        responses.sort_by_key(|response| response.header.opcode);

        assert_eq!(responses[0].get_rcode(), Ok(RCODE::NOERROR));
        assert_eq!(responses[0].answer.len(), 2);
        assert_eq!(
            responses[0].answer[0].rdata,
            RData::A("192.0.2.1".parse().unwrap())
        );
        assert_eq!(responses[0].answer[0].ttl, 120);

        assert_eq!(responses[1].get_rcode(), Ok(RCODE::NOTIMP));
        assert!(responses[1].answer.is_empty());
    }
}
