use std::array::TryFromSliceError;

use crate::errors::DNSError;

/// Big-endian cursor over a borrowed datagram.
///
/// Offsets are always absolute within the original buffer, including for
/// readers produced by [`Reader::seek`], so compression pointers resolve
/// against the same coordinates the sender used.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buffer: &'a [u8],
    position: usize,
}

type Result<T> = std::result::Result<T, DNSError>;

impl<'a> Reader<'a> {
    pub fn new(buffer: &'a [u8]) -> Reader<'a> {
        Reader {
            buffer,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn unread_bytes(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn read(&mut self, size: usize) -> Result<Vec<u8>> {
        Ok(self.read_slice(size)?.to_vec())
    }

    fn read_slice(&mut self, size: usize) -> Result<&'a [u8]> {
        if size > self.unread_bytes() {
            Err(DNSError::Reader {
                message: format!(
                    "cannot read {} bytes at offset {}, {} left",
                    size,
                    self.position,
                    self.unread_bytes()
                ),
            })
        } else {
            let buffer: &'a [u8] = self.buffer;
            self.position += size;
            Ok(&buffer[self.position - size..self.position])
        }
    }

    pub fn skip(&mut self, size: usize) -> Result<()> {
        self.read_slice(size).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_slice(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_slice(2)?.try_into().map_err(
            |e: TryFromSliceError| DNSError::Reader {
                message: e.to_string(),
            },
        )?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_slice(4)?.try_into().map_err(
            |e: TryFromSliceError| DNSError::Reader {
                message: e.to_string(),
            },
        )?))
    }

    /// Returns a reader positioned at `position` that cannot see `end` or
    /// anything after it.
    ///
    /// `end` is where the compression pointer being followed starts, so the
    /// target must lie strictly before the pointer and each hop of a chain
    /// shrinks the visible buffer.
    pub fn seek(&self, position: usize, end: usize) -> Result<Self> {
        if position >= end || end > self.position {
            Err(DNSError::PointerLoop { offset: end })
        } else {
            let buffer: &'a [u8] = self.buffer;
            Ok(Reader {
                buffer: &buffer[..end],
                position,
            })
        }
    }
}
