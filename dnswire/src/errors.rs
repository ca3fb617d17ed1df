use thiserror::Error;

use crate::structs::RCODE;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DNSError {
    #[error("Header needs 12 bytes, only {available} available")]
    TruncatedHeader { available: usize },
    #[error("Message of {length} bytes is shorter than a header")]
    ShortMessage { length: usize },
    #[error("Malformed domain name at offset {offset}: {message}")]
    MalformedName { offset: usize, message: String },
    #[error("Compression pointer at offset {offset} loops or nests too deep")]
    PointerLoop { offset: usize },
    #[error("Domain name has more than {max} labels")]
    TooManyLabels { max: usize },
    #[error("Label {label:?} is {length} bytes, must be between 1 and 63")]
    LabelTooLong { label: String, length: usize },
    #[error("Label {label:?} is not a plain ASCII label: {message}")]
    InvalidLabel { label: String, message: String },
    #[error("Header field {field} is {value}, it only has 4 bits")]
    FieldOutOfRange { field: &'static str, value: u8 },
    #[error("{section} section has {count} records, a count holds at most 65535")]
    TooManyRecords { section: &'static str, count: usize },
    #[error("Question at offset {offset} needs 4 more bytes, only {available} available")]
    TruncatedQuestion { offset: usize, available: usize },
    #[error("Answer at offset {offset} is truncated: {message}")]
    TruncatedAnswer { offset: usize, message: String },
    #[error("RDLENGTH is {declared} but resource data is {actual} bytes")]
    RDataLengthMismatch { declared: u16, actual: usize },
    #[error("Reader Error: {message:?}")]
    Reader { message: String },
}

impl DNSError {
    pub fn rcode(&self) -> RCODE {
        match self {
            DNSError::LabelTooLong { .. }
            | DNSError::InvalidLabel { .. }
            | DNSError::FieldOutOfRange { .. }
            | DNSError::TooManyRecords { .. }
            | DNSError::RDataLengthMismatch { .. } => RCODE::SERVFAIL,
            _ => RCODE::FORMERR,
        }
    }
}
