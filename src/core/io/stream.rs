use std::fs::File;
use std::io;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// A byte sink/source with a position, a length and three capability flags.
///
/// The flags describe what the stream is willing to do; the raw `Read`, `Write` and `Seek`
/// implementations are expected to fail with [`io::ErrorKind::Unsupported`] when asked to do
/// something the flags deny.
pub trait Stream: Read + Write + Seek {
    fn can_read(&self) -> bool { true }

    fn can_write(&self) -> bool { true }

    fn can_seek(&self) -> bool { true }

    #[inline]
    fn position(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    #[inline]
    fn set_position(&mut self, position: u64) -> io::Result<u64> {
        self.seek(SeekFrom::Start(position))
    }

    /// Total length of the stream. The position is left where it was.
    fn length(&mut self) -> io::Result<u64> {
        let current = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        if current != end {
            self.seek(SeekFrom::Start(current))?;
        }

        Ok(end)
    }
}

impl<S: Stream + ?Sized> Stream for &mut S {
    fn can_read(&self) -> bool { (**self).can_read() }

    fn can_write(&self) -> bool { (**self).can_write() }

    fn can_seek(&self) -> bool { (**self).can_seek() }

    fn position(&mut self) -> io::Result<u64> { (**self).position() }

    fn set_position(&mut self, position: u64) -> io::Result<u64> { (**self).set_position(position) }

    fn length(&mut self) -> io::Result<u64> { (**self).length() }
}

impl Stream for Cursor<Vec<u8>> {}

impl Stream for Cursor<&mut Vec<u8>> {}

impl Stream for File {}

/// Growable in-memory stream. Readable, writable and seekable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryBuffer {
    inner: Cursor<Vec<u8>>
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { inner: Cursor::new(Vec::with_capacity(capacity)) }
    }

    /// Wraps existing bytes, positioned at the start.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { inner: Cursor::new(bytes.into()) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.inner.get_ref()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }
}

impl Read for MemoryBuffer {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for MemoryBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemoryBuffer {
    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl Stream for MemoryBuffer {
    fn length(&mut self) -> io::Result<u64> {
        Ok(self.len() as u64)
    }
}

fn unsupported(operation: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, format!("stream does not support {operation}"))
}

macro_rules! restricted_stream {
    ($(#[$meta: meta])* $name: ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        pub struct $name<S> {
            inner: S
        }

        impl<S> $name<S> {
            pub fn new(inner: S) -> Self {
                Self { inner }
            }

            pub fn get_ref(&self) -> &S {
                &self.inner
            }

            pub fn get_mut(&mut self) -> &mut S {
                &mut self.inner
            }

            pub fn into_inner(self) -> S {
                self.inner
            }
        }
    };
}

restricted_stream! {
    /// Wraps a stream and refuses to read from it.
    NonReadable
}

restricted_stream! {
    /// Wraps a stream and refuses to write to it.
    NonWritable
}

restricted_stream! {
    /// Wraps a stream and refuses to seek it or report its position.
    NonSeekable
}

impl<S> Read for NonReadable<S> {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(unsupported("reading"))
    }
}

impl<S: Write> Write for NonReadable<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.inner.write(buf) }

    fn flush(&mut self) -> io::Result<()> { self.inner.flush() }
}

impl<S: Seek> Seek for NonReadable<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> { self.inner.seek(pos) }
}

impl<S: Stream> Stream for NonReadable<S> {
    fn can_read(&self) -> bool { false }

    fn can_write(&self) -> bool { self.inner.can_write() }

    fn can_seek(&self) -> bool { self.inner.can_seek() }

    fn length(&mut self) -> io::Result<u64> { self.inner.length() }
}

impl<S: Read> Read for NonWritable<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> { self.inner.read(buf) }
}

impl<S> Write for NonWritable<S> {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(unsupported("writing"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Seek> Seek for NonWritable<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> { self.inner.seek(pos) }
}

impl<S: Stream> Stream for NonWritable<S> {
    fn can_read(&self) -> bool { self.inner.can_read() }

    fn can_write(&self) -> bool { false }

    fn can_seek(&self) -> bool { self.inner.can_seek() }

    fn length(&mut self) -> io::Result<u64> { self.inner.length() }
}

impl<S: Read> Read for NonSeekable<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> { self.inner.read(buf) }
}

impl<S: Write> Write for NonSeekable<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.inner.write(buf) }

    fn flush(&mut self) -> io::Result<()> { self.inner.flush() }
}

impl<S> Seek for NonSeekable<S> {
    fn seek(&mut self, _: SeekFrom) -> io::Result<u64> {
        Err(unsupported("seeking"))
    }
}

impl<S: Stream> Stream for NonSeekable<S> {
    fn can_read(&self) -> bool { self.inner.can_read() }

    fn can_write(&self) -> bool { self.inner.can_write() }

    fn can_seek(&self) -> bool { false }

    fn position(&mut self) -> io::Result<u64> {
        Err(unsupported("reporting its position"))
    }

    fn set_position(&mut self, _: u64) -> io::Result<u64> {
        Err(unsupported("seeking"))
    }

    fn length(&mut self) -> io::Result<u64> {
        Err(unsupported("reporting its length"))
    }
}
