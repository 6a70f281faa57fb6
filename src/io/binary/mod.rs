mod error;          pub use error::*;
mod options;        pub use options::*;
mod record;

use std::any::type_name;
use std::io;
use std::io::{Read, Write};
use bincode::config::{self, Config};
use log::trace;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::{Binarizable, CustomDebinarizable};
use record::{canonical_type_name, RecordHeader};

/// Encodes a value graph to bytes and decodes bytes back into a value graph.
///
/// A decoded graph whose recorded type is not the requested `T` must fail with
/// [`FormatError::InvalidCast`], so callers can tell it apart from corrupt input.
pub trait Formatter {
    /// Writes `value` at the writer's current position and returns the number of bytes written.
    fn serialize<W, T>(&self, writer: &mut W, value: &T) -> Result<usize, FormatError>
    where
        W: Write + ?Sized,
        T: Serialize + ?Sized;

    /// Reads the next value graph from the reader's current position.
    fn deserialize<R, T>(&self, reader: &mut R) -> Result<T, FormatError>
    where
        R: Read + ?Sized,
        T: DeserializeOwned;
}

impl<F: Formatter> Formatter for &F {
    #[inline]
    fn serialize<W, T>(&self, writer: &mut W, value: &T) -> Result<usize, FormatError>
    where
        W: Write + ?Sized,
        T: Serialize + ?Sized
    {
        (**self).serialize(writer, value)
    }

    #[inline]
    fn deserialize<R, T>(&self, reader: &mut R) -> Result<T, FormatError>
    where
        R: Read + ?Sized,
        T: DeserializeOwned
    {
        (**self).deserialize(reader)
    }
}

const fn config() -> impl Config {
    config::standard()
}

/// Self-describing binary records: a header naming the Rust type of the value, followed by
/// its bincode payload.
///
/// The recorded name is the one of the owned value: `&Entry` is recorded as `Entry`, `str` as
/// `String` and `[T]` as `Vec<T>`, since serde encodes each pair identically.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BinaryFormatter {
    options: BinaryFormatterOptions
}

impl BinaryFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BinaryFormatterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BinaryFormatterOptions {
        &self.options
    }
}

impl Formatter for BinaryFormatter {
    fn serialize<W, T>(&self, writer: &mut W, value: &T) -> Result<usize, FormatError>
    where
        W: Write + ?Sized,
        T: Serialize + ?Sized
    {
        // the whole record is built before anything reaches the writer
        let payload = bincode::serde::encode_to_vec(value, config())?;
        let header = RecordHeader::new(&canonical_type_name(type_name::<T>()), payload.len(), &self.options)?;

        let mut record = Vec::with_capacity(header.encoded_len() + payload.len());
        header.binarize(&mut record)?;
        record.extend_from_slice(&payload);
        writer.write_all(&record)?;

        trace!("binarized `{}` into {} bytes", header.type_name, record.len());
        Ok(record.len())
    }

    fn deserialize<R, T>(&self, reader: &mut R) -> Result<T, FormatError>
    where
        R: Read + ?Sized,
        T: DeserializeOwned
    {
        let header = RecordHeader::debinarize_with_options(reader, &self.options)?;
        let length = header.payload_length as usize;

        let mut payload = Vec::new();
        if Read::take(&mut *reader, length as u64).read_to_end(&mut payload)? < length {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into())
        }

        let expected = type_name::<T>();
        if header.type_name != canonical_type_name(expected) {
            return Err(FormatError::InvalidCast { expected, found: header.type_name })
        }

        let (value, consumed) = bincode::serde::decode_from_slice::<T, _>(&payload, config())?;
        if consumed != length {
            return Err(FormatError::Corrupt { trailing: length - consumed })
        }

        trace!("debinarized `{}` from {} payload bytes", expected, length);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Cursor;
    use serde::{Deserialize, Serializer};
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name:   String,
        offset: u64,
        tags:   Vec<String>,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("Unserializable cannot be binarized"))
        }
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry { name: "config.cpp".into(), offset: 0, tags: vec![] },
            Entry { name: "data/texture.paa".into(), offset: 4096, tags: vec!["packed".into()] },
        ]
    }

    #[test]
    fn writes_a_header_followed_by_the_payload() {
        let mut bytes = Vec::new();
        let written = BinaryFormatter::new().serialize(&mut bytes, &7u8).unwrap();

        assert_eq!(written, bytes.len());
        assert_eq!(&bytes[..4], b"SBIN");
        assert_eq!(&bytes[7..9], b"u8");
        assert_eq!(bytes.last(), Some(&7));
    }

    #[test]
    fn reads_back_what_it_wrote() {
        let formatter = BinaryFormatter::new();
        let mut cursor = Cursor::new(Vec::new());
        formatter.serialize(&mut cursor, &entries()).unwrap();

        let mut map = HashMap::new();
        map.insert("firstkey".to_string(), 123);
        formatter.serialize(&mut cursor, &map).unwrap();

        cursor.set_position(0);
        assert_eq!(formatter.deserialize::<_, Vec<Entry>>(&mut cursor).unwrap(), entries());
        assert_eq!(formatter.deserialize::<_, HashMap<String, i32>>(&mut cursor).unwrap(), map);
    }

    #[test]
    fn reports_the_recorded_type_on_a_bad_cast() {
        let formatter = BinaryFormatter::new();
        let mut cursor = Cursor::new(Vec::new());
        formatter.serialize(&mut cursor, &String::from("my test string")).unwrap();
        cursor.set_position(0);

        match formatter.deserialize::<_, HashMap<String, i32>>(&mut cursor) {
            Err(FormatError::InvalidCast { expected, found }) => {
                assert_eq!(expected, type_name::<HashMap<String, i32>>());
                assert_eq!(found, type_name::<String>());
            }
            other => panic!("expected an invalid cast, got {other:?}"),
        }
    }

    #[test]
    fn rejected_values_leave_the_writer_untouched() {
        let mut bytes = Vec::new();
        let error = BinaryFormatter::new().serialize(&mut bytes, &Unserializable).unwrap_err();

        assert!(matches!(error, FormatError::Encode(_)));
        assert!(bytes.is_empty());
    }

    #[test]
    fn oversized_payloads_leave_the_writer_untouched() {
        let options = BinaryFormatterOptions::default().with_max_payload_length(8);
        let mut bytes = Vec::new();
        let error = BinaryFormatter::with_options(options).serialize(&mut bytes, &entries()).unwrap_err();

        assert!(matches!(error, FormatError::PayloadTooLarge { limit: 8, .. }));
        assert!(bytes.is_empty());
    }

    #[test]
    fn truncated_payload_is_an_unexpected_eof() {
        let mut bytes = Vec::new();
        BinaryFormatter::new().serialize(&mut bytes, &entries()).unwrap();
        bytes.truncate(bytes.len() - 3);

        match BinaryFormatter::new().deserialize::<_, Vec<Entry>>(&mut Cursor::new(bytes)) {
            Err(FormatError::IO(error)) => assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected an eof, got {other:?}"),
        }
    }

    #[test]
    fn leftover_payload_bytes_are_corrupt() {
        let header = RecordHeader::new("u8", 2, &BinaryFormatterOptions::default()).unwrap();
        let mut bytes = Vec::new();
        header.binarize(&mut bytes).unwrap();
        bytes.extend_from_slice(&[5, 0]);

        let error = BinaryFormatter::new().deserialize::<_, u8>(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(error, FormatError::Corrupt { trailing: 1 }));
    }

    #[test]
    fn empty_input_is_an_unexpected_eof() {
        let error = BinaryFormatter::new().deserialize::<_, u8>(&mut io::empty()).unwrap_err();
        assert!(matches!(error, FormatError::IO(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }
}
