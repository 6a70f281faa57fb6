use std::any::type_name;
use std::borrow::Cow;
use std::io::{Read, Write};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crate::{Binarizable, CustomDebinarizable, Debinarizable};
use super::{BinaryFormatterOptions, FormatError};

crate::magic_enum! {
    u32, RecordMagic, FormatError, ForeignFormat {
        Binary = 0x4E49_4253
    }
}

crate::magic_enum! {
    u8, RecordVersion, FormatError, UnsupportedVersion {
        V1 = 1
    }
}

impl RecordVersion {
    pub const CURRENT: RecordVersion = RecordVersion::V1;
}

/// Everything that precedes the payload of a binary record:
///
/// | field          | encoding            |
/// |----------------|---------------------|
/// | magic          | `u32`, `"SBIN"`     |
/// | version        | `u8`                |
/// | type name size | `u16`               |
/// | type name      | utf-8 bytes         |
/// | payload size   | `u32`               |
///
/// All integers are little endian.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RecordHeader {
    pub(crate) version:        RecordVersion,
    pub(crate) type_name:      String,
    pub(crate) payload_length: u32,
}

impl RecordHeader {
    const FIXED_LENGTH: usize = 4 + 1 + 2 + 4;

    pub(crate) fn new(
        type_name: &str,
        payload_length: usize,
        options: &BinaryFormatterOptions
    ) -> Result<Self, FormatError> {
        check_type_name_length(type_name.len(), options)?;
        check_payload_length(payload_length, options)?;

        Ok(Self {
            version: RecordVersion::CURRENT,
            type_name: type_name.to_owned(),
            payload_length: payload_length as u32,
        })
    }

    #[inline]
    pub(crate) fn encoded_len(&self) -> usize {
        Self::FIXED_LENGTH + self.type_name.len()
    }
}

/// Name of the owned counterpart of a `std::any::type_name`. Only the outermost type is
/// rewritten: leading `&` and `&mut ` are peeled, `str` becomes `String` and a slice `[T]`
/// becomes `Vec<T>`. Arrays keep their name, serde encodes them without a length prefix.
pub(crate) fn canonical_type_name(name: &'static str) -> Cow<'static, str> {
    let mut name = name;
    loop {
        if let Some(rest) = name.strip_prefix("&mut ") {
            name = rest
        } else if let Some(rest) = name.strip_prefix('&') {
            name = rest
        } else {
            break
        }
    }

    if name == "str" {
        return Cow::Borrowed(type_name::<String>())
    }

    match name.strip_prefix('[').and_then(|inner| inner.strip_suffix(']')) {
        Some(element) if !is_array_element(element) => {
            let vec = type_name::<Vec<()>>();
            let prefix = vec.strip_suffix("<()>").unwrap_or(vec);
            Cow::Owned(format!("{prefix}<{}>", canonical_type_name(element)))
        }
        _ => Cow::Borrowed(name)
    }
}

/// `true` for the inside of `[T; N]`, i.e. a `;` outside any nested brackets.
fn is_array_element(element: &str) -> bool {
    let mut depth = 0usize;
    for c in element.chars() {
        match c {
            '[' | '<' | '(' => depth += 1,
            ']' | '>' | ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

#[inline]
fn check_type_name_length(length: usize, options: &BinaryFormatterOptions) -> Result<(), FormatError> {
    let limit = options.max_type_name_length();
    if length > limit {
        return Err(FormatError::TypeNameTooLong { length, limit })
    }
    Ok(())
}

#[inline]
fn check_payload_length(length: usize, options: &BinaryFormatterOptions) -> Result<(), FormatError> {
    let limit = options.max_payload_length();
    if length > limit {
        return Err(FormatError::PayloadTooLarge { length, limit })
    }
    Ok(())
}

impl<W: Write + ?Sized> Binarizable<W> for RecordMagic {
    type Error = FormatError;

    fn binarize(&self, writer: &mut W) -> Result<(), Self::Error> {
        Ok(writer.write_u32::<LittleEndian>((*self).into())?)
    }
}

impl<R: Read + ?Sized> Debinarizable<R> for RecordMagic {
    type Error = FormatError;

    fn debinarize(reader: &mut R) -> Result<Self, Self::Error> {
        RecordMagic::try_from(reader.read_u32::<LittleEndian>()?)
    }
}

impl<W: Write + ?Sized> Binarizable<W> for RecordVersion {
    type Error = FormatError;

    fn binarize(&self, writer: &mut W) -> Result<(), Self::Error> {
        Ok(writer.write_u8((*self).into())?)
    }
}

impl<R: Read + ?Sized> Debinarizable<R> for RecordVersion {
    type Error = FormatError;

    fn debinarize(reader: &mut R) -> Result<Self, Self::Error> {
        RecordVersion::try_from(reader.read_u8()?)
    }
}

impl<W: Write + ?Sized> Binarizable<W> for RecordHeader {
    type Error = FormatError;

    fn binarize(&self, writer: &mut W) -> Result<(), Self::Error> {
        RecordMagic::Binary.binarize(writer)?;
        self.version.binarize(writer)?;
        writer.write_u16::<LittleEndian>(self.type_name.len() as u16)?;
        writer.write_all(self.type_name.as_bytes())?;
        writer.write_u32::<LittleEndian>(self.payload_length)?;
        Ok(())
    }
}

impl<R: Read + ?Sized> CustomDebinarizable<R, BinaryFormatterOptions> for RecordHeader {
    type Error = FormatError;

    fn debinarize_with_options(reader: &mut R, options: &BinaryFormatterOptions) -> Result<Self, Self::Error> {
        RecordMagic::debinarize(reader)?;
        let version = RecordVersion::debinarize(reader)?;

        let name_length = reader.read_u16::<LittleEndian>()? as usize;
        check_type_name_length(name_length, options)?;
        let mut name = vec![0u8; name_length];
        reader.read_exact(&mut name)?;
        let type_name = String::from_utf8(name)?;

        let payload_length = reader.read_u32::<LittleEndian>()?;
        check_payload_length(payload_length as usize, options)?;

        Ok(Self { version, type_name, payload_length })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use super::*;

    #[test]
    fn canonical_names_peel_borrows() {
        assert_eq!(canonical_type_name(type_name::<&Vec<u8>>()), type_name::<Vec<u8>>());
        assert_eq!(canonical_type_name(type_name::<&mut &String>()), type_name::<String>());
        assert_eq!(canonical_type_name(type_name::<&str>()), type_name::<String>());
        assert_eq!(canonical_type_name(type_name::<u64>()), "u64");
    }

    #[test]
    fn canonical_names_own_slices_but_not_arrays() {
        assert_eq!(canonical_type_name(type_name::<[u8]>()), type_name::<Vec<u8>>());
        assert_eq!(canonical_type_name(type_name::<&[&str]>()), type_name::<Vec<String>>());
        assert_eq!(canonical_type_name(type_name::<[[u8; 2]]>()), type_name::<Vec<[u8; 2]>>());
        assert_eq!(canonical_type_name(type_name::<[u8; 4]>()), type_name::<[u8; 4]>());
    }

    #[test]
    fn header_layout_is_little_endian() {
        let header = RecordHeader::new("u8", 3, &BinaryFormatterOptions::default()).unwrap();
        let mut bytes = Vec::new();
        header.binarize(&mut bytes).unwrap();

        assert_eq!(bytes.len(), header.encoded_len());
        assert_eq!(&bytes[..4], b"SBIN");
        assert_eq!(bytes[4], 1);
        assert_eq!(&bytes[5..7], &[2, 0]);
        assert_eq!(&bytes[7..9], b"u8");
        assert_eq!(&bytes[9..], &[3, 0, 0, 0]);

        let read = RecordHeader::debinarize_default(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(read, header);
    }

    #[test]
    fn unknown_magic_is_a_foreign_format() {
        let mut reader = Cursor::new(b"<?xml version=\"1.0\"?>".to_vec());
        let error = RecordHeader::debinarize_default(&mut reader).unwrap_err();
        assert!(matches!(error, FormatError::ForeignFormat(magic) if magic == u32::from_le_bytes(*b"<?xm")));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut bytes = b"SBIN".to_vec();
        bytes.push(9);
        let error = RecordHeader::debinarize_default(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(error, FormatError::UnsupportedVersion(9)));
    }

    #[test]
    fn limits_apply_on_both_sides() {
        let options = BinaryFormatterOptions::default().with_max_type_name_length(4);
        assert!(matches!(
            RecordHeader::new("alloc::string::String", 0, &options),
            Err(FormatError::TypeNameTooLong { length: 21, limit: 4 })
        ));

        let header = RecordHeader::new("i32", 4096, &BinaryFormatterOptions::default()).unwrap();
        let mut bytes = Vec::new();
        header.binarize(&mut bytes).unwrap();

        let small = BinaryFormatterOptions::default().with_max_payload_length(16);
        let error = RecordHeader::debinarize_with_options(&mut Cursor::new(bytes), &small).unwrap_err();
        assert!(matches!(error, FormatError::PayloadTooLarge { length: 4096, limit: 16 }));
    }
}
