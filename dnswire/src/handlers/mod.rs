use tracing::debug;

use crate::{
    config::ResponseConfig,
    structs::{Message, Opcode, RCODE},
};

use self::query::QueryHandler;

mod query;

pub trait ResponseHandler {
    fn handle(message: &Message, config: &ResponseConfig) -> Message;
}

pub struct Handler {}

impl ResponseHandler for Handler {
    fn handle(message: &Message, config: &ResponseConfig) -> Message {
        match message.get_opcode() {
            Ok(Opcode::QUERY) => QueryHandler::handle(message, config),
            opcode => {
                debug!(?opcode, id = message.header.id, "opcode not implemented");
                let mut response = message.response();
                response.set_response(RCODE::NOTIMP);
                response
            }
        }
    }
}
