use crate::DebinarizationOptions;

pub const DEFAULT_MAX_TYPE_NAME_LENGTH: usize = 1024;
pub const DEFAULT_MAX_PAYLOAD_LENGTH:   usize = 64 * 1024 * 1024;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct BinaryFormatterOptions {
    pub(crate) max_type_name_length: usize,
    pub(crate) max_payload_length:   usize,
}

impl BinaryFormatterOptions {
    pub fn with_max_type_name_length(mut self, length: usize) -> Self {
        self.max_type_name_length = length;
        self
    }

    pub fn with_max_payload_length(mut self, length: usize) -> Self {
        self.max_payload_length = length;
        self
    }

    /// The type name length is stored as a `u16`, so larger settings are clamped.
    #[inline]
    pub fn max_type_name_length(&self) -> usize {
        self.max_type_name_length.min(u16::MAX as usize)
    }

    /// The payload length is stored as a `u32`, so larger settings are clamped.
    #[inline]
    pub fn max_payload_length(&self) -> usize {
        self.max_payload_length.min(u32::MAX as usize)
    }
}

impl Default for BinaryFormatterOptions {
    fn default() -> Self {
        Self {
            max_type_name_length: DEFAULT_MAX_TYPE_NAME_LENGTH,
            max_payload_length:   DEFAULT_MAX_PAYLOAD_LENGTH,
        }
    }
}

impl DebinarizationOptions for BinaryFormatterOptions {

}
