#![no_main]

use dnswire::{
    handlers::{Handler, ResponseHandler},
    config::ResponseConfig,
    parser::{decode_message, FromBytes},
    reader::Reader,
    structs::Message,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = Reader::new(data);
    let _ = Message::from_bytes(&mut reader);

    if let Ok(query) = decode_message(data) {
        let _ = Handler::handle(&query, &ResponseConfig::default()).to_datagram();
    }
});
