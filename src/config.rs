//! Decode options.

/// How a CRC-32 mismatch is treated while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrcMode {
    /// Log a warning and keep the decoded cue. Some producers emit bad CRCs.
    #[default]
    Lenient,
    /// Fail with [`DecodeError::CrcMismatch`](crate::DecodeError::CrcMismatch).
    Strict,
}

/// How text input is turned into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Hexadecimal if the text (after an optional `0x`) is all hex digits,
    /// base64 otherwise.
    ///
    /// A base64 string made only of hex digits is read as hex.
    #[default]
    Auto,
    /// Hexadecimal, with or without a `0x` prefix.
    Hex,
    /// Standard padded base64.
    Base64,
}

/// Options for [`Cue::decode_with`](crate::Cue::decode_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub crc_mode: CrcMode,
    pub input_format: InputFormat,
}

impl DecodeOptions {
    /// Default options with CRC mismatches treated as errors.
    pub fn strict() -> Self {
        Self {
            crc_mode: CrcMode::Strict,
            ..Default::default()
        }
    }

    pub fn with_input_format(mut self, input_format: InputFormat) -> Self {
        self.input_format = input_format;
        self
    }
}
