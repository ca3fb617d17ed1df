use std::error::Error;
use std::net::SocketAddr;

use clap::Parser;
use dnswire::{
    labelstring::LabelString,
    parser::{decode_message_with_answers, ToBytes, MAX_DATAGRAM_SIZE},
    structs::{Class, Header, Message, Question, RData, RRClass, Type, RR},
};
use tokio::net::UdpSocket;

/// Sends one query with a question per name and prints the answers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Address of the DNS server
    #[arg(short, long, default_value = "127.0.0.1:2053")]
    server: SocketAddr,

    /// Transaction ID of the query
    #[arg(short, long, default_value_t = 0x1234)]
    id: u16,

    /// QTYPE of every question
    #[arg(short = 't', long, default_value_t = 1)]
    qtype: u16,

    /// Names to ask for
    #[arg(default_values_t = [
        String::from("google.com"),
        String::from("example.com"),
        String::from("example.net"),
    ])]
    names: Vec<String>,
}

fn build_query(args: &Args) -> Message {
    let question: Vec<Question> = args
        .names
        .iter()
        .map(|name| Question {
            qname: LabelString::from(name),
            qtype: Type::from(args.qtype),
            qclass: Class::Class(RRClass::IN),
        })
        .collect();

    Message {
        header: Header {
            id: args.id,
            rd: true,
            qdcount: question.len() as u16,
            ..Header::default()
        },
        question,
        answer: vec![],
    }
}

fn format_answer(index: usize, rr: &RR) -> String {
    let rdata = match &rr.rdata {
        RData::A(address) => address.to_string(),
        RData::Raw(bytes) => format!("{:?}", bytes),
    };
    format!(
        "Answer {}: NAME={}, TYPE={}, CLASS={}, TTL={}, RDLENGTH={}, RDATA={}",
        index + 1,
        rr.name,
        u16::from(rr._type.clone()),
        u16::from(rr.class.clone()),
        rr.ttl,
        rr.rdlength,
        rdata
    )
}

async fn query(args: &Args) -> Result<Message, Box<dyn Error>> {
    let bind: SocketAddr = if args.server.is_ipv4() {
        "0.0.0.0:0".parse()?
    } else {
        "[::]:0".parse()?
    };
    let socket = UdpSocket::bind(bind).await?;
    socket.connect(args.server).await?;

    eprintln!("Sending query to {}", args.server);
    socket.send(&build_query(args).to_bytes()?).await?;

    let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
    let len = socket.recv(&mut buf).await?;
    Ok(decode_message_with_answers(&buf[..len])?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let response = query(&args).await?;
    println!(
        "ID: {}, RCODE: {}, QDCOUNT: {}, ANCOUNT: {}",
        response.header.id, response.header.rcode, response.header.qdcount, response.header.ancount
    );
    for (index, rr) in response.answer.iter().enumerate() {
        println!("{}", format_answer(index, rr));
    }
    Ok(())
}
