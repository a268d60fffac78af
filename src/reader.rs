use std::io::Read;

use crate::SourceError;

/// Where a parser pulls its bytes from.
#[derive(Default)]
pub(crate) enum Source<'r> {
    /// No input was set; reads as an empty stream.
    #[default]
    Empty,
    /// The unread remainder of an in-memory buffer.
    Bytes(&'r [u8]),
    /// A caller-supplied streaming reader.
    Reader(&'r mut dyn Read),
}

impl<'r> Source<'r> {
    pub(crate) fn is_set(&self) -> bool {
        !matches!(self, Source::Empty)
    }

    /// Top up `buf` after its first `skip` bytes, which are still unconsumed.
    ///
    /// Returns the number of valid bytes in `buf`, including the `skip` bytes
    /// already there. Returning `skip` means nothing more is available right
    /// now. A streaming reader is called once per fill.
    pub(crate) fn fill(&mut self, buf: &mut [u8], skip: usize) -> Result<usize, SourceError> {
        if skip > buf.len() {
            return Err(SourceError::InvalidSkip {
                skip,
                max: buf.len(),
            });
        }
        let requested = buf.len() - skip;
        match self {
            Source::Empty => Ok(skip),
            Source::Bytes(input) => {
                let data: &'r [u8] = *input;
                let n = requested.min(data.len());
                buf[skip..skip + n].copy_from_slice(&data[..n]);
                *input = &data[n..];
                Ok(skip + n)
            }
            Source::Reader(reader) => {
                let returned = loop {
                    match reader.read(&mut buf[skip..]) {
                        Ok(n) => break n,
                        Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(err) => return Err(err.into()),
                    }
                };
                if returned > requested {
                    return Err(SourceError::Overlong {
                        requested,
                        returned,
                    });
                }
                Ok(skip + returned)
            }
        }
    }
}
