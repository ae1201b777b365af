use crate::error::NTriplesError;
use std::io::{ErrorKind, Read};
use std::str;

/// Reads the input chunk by chunk and hands out one line at a time.
///
/// Lines end in either CRLF, CR or LF. The final line may omit its terminator.
pub(crate) struct LineBuffer<R: Read> {
    source: R,
    buffer: Vec<u8>,
    exhausted: bool,
    chunk_size: usize,
}

impl<R: Read> LineBuffer<R> {
    pub fn new(source: R, chunk_size: usize) -> Self {
        Self {
            source,
            buffer: Vec::default(),
            exhausted: false,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Puts the next line, without its terminator, into `line`.
    ///
    /// Returns `false` once the input is over. A last line without a
    /// terminator is still delivered, unless it contains only whitespace.
    pub fn read_line(&mut self, line: &mut String) -> Result<bool, NTriplesError> {
        line.clear();
        let mut scanned = 0;
        loop {
            let mut found = None;
            let mut i = scanned;
            while i < self.buffer.len() {
                match self.buffer[i] {
                    b'\n' => {
                        found = Some((i, i + 1));
                        break;
                    }
                    b'\r' => {
                        if let Some(&next) = self.buffer.get(i + 1) {
                            found = Some((i, if next == b'\n' { i + 2 } else { i + 1 }));
                        } else if self.exhausted {
                            found = Some((i, i + 1));
                        } else {
                            // the CR might be the first half of a CRLF split
                            // across two chunks
                        }
                        break;
                    }
                    _ => i += 1,
                }
            }

            if let Some((end, next_line)) = found {
                line.push_str(str::from_utf8(&self.buffer[..end])?);
                self.buffer.drain(..next_line);
                return Ok(true);
            }
            if self.exhausted {
                if self.is_rest_blank() {
                    self.buffer.clear();
                    return Ok(false);
                }
                line.push_str(str::from_utf8(&self.buffer)?);
                self.buffer.clear();
                return Ok(true);
            }
            scanned = i;
            self.fill()?;
        }
    }

    fn is_rest_blank(&self) -> bool {
        match str::from_utf8(&self.buffer) {
            Ok(rest) => rest.chars().all(char::is_whitespace),
            Err(_) => false,
        }
    }

    fn fill(&mut self) -> Result<(), NTriplesError> {
        let len = self.buffer.len();
        self.buffer.resize(len + self.chunk_size, 0);
        loop {
            match self.source.read(&mut self.buffer[len..]) {
                Ok(0) => {
                    self.buffer.truncate(len);
                    self.exhausted = true;
                    return Ok(());
                }
                Ok(read) => {
                    self.buffer.truncate(len + read);
                    return Ok(());
                }
                Err(error) => {
                    if error.kind() != ErrorKind::Interrupted {
                        self.buffer.truncate(len);
                        return Err(error.into());
                    }
                }
            }
        }
    }
}
