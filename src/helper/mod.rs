mod error;          pub use error::*;

use std::any::type_name;
use log::{debug, trace, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::{BinaryFormatter, FormatError, Formatter, MemoryBuffer, Stream};

/// A freshly allocated buffer is handed back rewound, ready to be read.
pub const DEFAULT_SEEK_TO_FIRST_POSITION_AFTER_WRITE: bool = true;
/// Writes into a caller's stream leave it positioned after the written data.
pub const DEFAULT_SEEK_TO_PRE_WRITE: bool = false;
/// Reads start wherever the caller's stream is positioned.
pub const DEFAULT_SEEK_TO_FIRST_POSITION_BEFORE_READ: bool = false;

/// Serializes `value` into a new [`MemoryBuffer`] with the [`BinaryFormatter`].
/// Pass [`DEFAULT_SEEK_TO_FIRST_POSITION_AFTER_WRITE`] for the usual behaviour.
///
/// See [`SerializationHelper::serialize_to_memory_buffer`].
pub fn serialize_to_memory_buffer<T>(
    value: Option<&T>,
    seek_to_first_position: bool
) -> Result<MemoryBuffer, SerializationError>
where
    T: Serialize + ?Sized
{
    SerializationHelper::binary().serialize_to_memory_buffer(value, seek_to_first_position)
}

/// Serializes `value` into `stream` with the [`BinaryFormatter`].
/// Pass [`DEFAULT_SEEK_TO_PRE_WRITE`] for the usual behaviour.
///
/// See [`SerializationHelper::serialize_to_stream`].
pub fn serialize_to_stream<T, S>(
    value: Option<&T>,
    stream: Option<&mut S>,
    seek_to_pre_write: bool
) -> Result<(), SerializationError>
where
    T: Serialize + ?Sized,
    S: Stream
{
    SerializationHelper::binary().serialize_to_stream(value, stream, seek_to_pre_write)
}

/// Deserializes a `T` from `stream` with the [`BinaryFormatter`].
/// Pass [`DEFAULT_SEEK_TO_FIRST_POSITION_BEFORE_READ`] for the usual behaviour.
///
/// See [`SerializationHelper::deserialize_from_stream`].
pub fn deserialize_from_stream<T, S>(
    stream: Option<&mut S>,
    seek_to_first_position: bool
) -> Result<T, SerializationError>
where
    T: DeserializeOwned,
    S: Stream
{
    SerializationHelper::binary().deserialize_from_stream(stream, seek_to_first_position)
}

/// Runs serialization against streams with argument checks, position handling and error
/// translation around the formatter.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerializationHelper<F = BinaryFormatter> {
    formatter: F
}

impl SerializationHelper<BinaryFormatter> {
    pub fn binary() -> Self {
        Self::new(BinaryFormatter::default())
    }
}

impl<F: Formatter> SerializationHelper<F> {
    pub fn new(formatter: F) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Serializes `value` into a newly allocated buffer and hands the buffer to the caller.
    ///
    /// The buffer is written from position 0 and, when `seek_to_first_position` is set, rewound
    /// to 0 afterwards; otherwise it is left at the end of the written data. On failure the
    /// buffer is dropped before the error is returned.
    ///
    /// # Errors
    /// * [`InvalidArgument::NullValue`] when `value` is `None`.
    /// * [`SerializationError::SerializationFailure`] when the formatter rejects the value.
    pub fn serialize_to_memory_buffer<T>(
        &self,
        value: Option<&T>,
        seek_to_first_position: bool
    ) -> Result<MemoryBuffer, SerializationError>
    where
        T: Serialize + ?Sized
    {
        let mut buffer = MemoryBuffer::new();
        // a new buffer's pre-write position is always 0, nothing to restore
        serialize_with(value, Some(&mut buffer), Some(&self.formatter), false)?;

        if seek_to_first_position {
            buffer.set_position(0).map_err(SerializationError::Stream)?;
            debug!("rewound {} byte buffer to its first position", buffer.len());
        }

        Ok(buffer)
    }

    /// Serializes `value` at the current position of `stream`.
    ///
    /// With `seek_to_pre_write` the stream is moved back to where the write started, otherwise
    /// it stays at the end of the written data. The stream is never closed.
    ///
    /// # Errors
    /// Argument checks run in this order, before anything is written:
    /// * [`InvalidArgument::NullValue`] when `value` is `None`.
    /// * [`InvalidArgument::NullStream`] when `stream` is `None`.
    /// * [`InvalidArgument::StreamNotWritable`] when the stream cannot be written.
    /// * [`InvalidArgument::SeekNotSupported`] when `seek_to_pre_write` is set on a stream that
    ///   cannot seek.
    ///
    /// A value the formatter rejects is a [`SerializationError::SerializationFailure`].
    pub fn serialize_to_stream<T, S>(
        &self,
        value: Option<&T>,
        stream: Option<&mut S>,
        seek_to_pre_write: bool
    ) -> Result<(), SerializationError>
    where
        T: Serialize + ?Sized,
        S: Stream
    {
        serialize_with(value, stream, Some(&self.formatter), seek_to_pre_write)
    }

    /// Deserializes a `T` from `stream`.
    ///
    /// With `seek_to_first_position` the stream is rewound to 0 before reading, otherwise the
    /// read starts at its current position.
    ///
    /// # Errors
    /// Argument checks run in this order, before anything is read:
    /// * [`InvalidArgument::NullStream`] when `stream` is `None`.
    /// * [`InvalidArgument::StreamNotReadable`] when the stream cannot be read.
    /// * [`InvalidArgument::EmptySeekableStream`] when the stream can seek and is empty.
    /// * [`InvalidArgument::SeekNotSupported`] when `seek_to_first_position` is set on a stream
    ///   that cannot seek.
    ///
    /// A graph of some other type than `T` is a [`SerializationError::TypeMismatch`]; any other
    /// decoding problem is a [`SerializationError::DeserializationFailure`].
    pub fn deserialize_from_stream<T, S>(
        &self,
        stream: Option<&mut S>,
        seek_to_first_position: bool
    ) -> Result<T, SerializationError>
    where
        T: DeserializeOwned,
        S: Stream
    {
        deserialize_with(stream, Some(&self.formatter), seek_to_first_position)
    }
}

fn serialize_with<F, T, S>(
    value: Option<&T>,
    stream: Option<&mut S>,
    formatter: Option<&F>,
    seek_to_pre_write: bool
) -> Result<(), SerializationError>
where
    F: Formatter,
    T: Serialize + ?Sized,
    S: Stream
{
    let value = value.ok_or(InvalidArgument::NullValue)?;
    let stream = stream.ok_or(InvalidArgument::NullStream)?;
    if !stream.can_write() {
        return Err(InvalidArgument::StreamNotWritable.into())
    }
    let formatter = formatter.ok_or(InvalidArgument::NullFormatter)?;
    if seek_to_pre_write && !stream.can_seek() {
        return Err(InvalidArgument::SeekNotSupported { parameter: "seek_to_pre_write" }.into())
    }

    trace!("serializing `{}` (seek_to_pre_write: {})", type_name::<T>(), seek_to_pre_write);

    // streams that cannot seek are never asked for their position
    let start_position = if seek_to_pre_write {
        stream.position().map_err(SerializationError::Stream)?
    } else {
        0
    };

    let written = formatter.serialize(stream, value).map_err(|error| {
        warn!("failed to serialize `{}`: {}", type_name::<T>(), error);
        SerializationError::SerializationFailure(error)
    })?;

    if seek_to_pre_write {
        stream.set_position(start_position).map_err(SerializationError::Stream)?;
        debug!("wrote {} bytes, returned stream to position {}", written, start_position);
    } else {
        debug!("wrote {} bytes", written);
    }

    Ok(())
}

fn deserialize_with<F, T, S>(
    stream: Option<&mut S>,
    formatter: Option<&F>,
    seek_to_first_position: bool
) -> Result<T, SerializationError>
where
    F: Formatter,
    T: DeserializeOwned,
    S: Stream
{
    let stream = stream.ok_or(InvalidArgument::NullStream)?;
    if !stream.can_read() {
        return Err(InvalidArgument::StreamNotReadable.into())
    }
    if stream.can_seek() && stream.length().map_err(SerializationError::Stream)? == 0 {
        return Err(InvalidArgument::EmptySeekableStream.into())
    }
    let formatter = formatter.ok_or(InvalidArgument::NullFormatter)?;
    if seek_to_first_position && !stream.can_seek() {
        return Err(InvalidArgument::SeekNotSupported { parameter: "seek_to_first_position" }.into())
    }

    trace!("deserializing `{}` (seek_to_first_position: {})", type_name::<T>(), seek_to_first_position);

    if seek_to_first_position {
        stream.set_position(0).map_err(SerializationError::Stream)?;
        debug!("rewound stream to its first position");
    }

    formatter.deserialize::<S, T>(stream).map_err(|error| match error {
        FormatError::InvalidCast { expected, found } => SerializationError::TypeMismatch { expected, found },
        error => {
            warn!("failed to deserialize `{}`: {}", type_name::<T>(), error);
            SerializationError::DeserializationFailure(error)
        }
    })
}
