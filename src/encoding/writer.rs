//! Bit-level writer for encoding binary data.

use super::error::{EncodingError, EncodingResult};

/// A writer that appends fixed-width values, MSB first, to a byte buffer.
///
/// This is the encoding counterpart to `BitReader`. Completed bytes are pushed
/// as soon as they fill up and the partial byte is kept with its exact bit
/// count, so leading zero bytes survive without any sentinel.
pub struct BitWriter {
    /// Completed bytes.
    buffer: Vec<u8>,
    /// Bits already used in `current_byte` (0-7).
    bit_position: u8,
    /// Byte being filled.
    current_byte: u8,
}

impl BitWriter {
    /// Creates a new `BitWriter` with an empty buffer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new `BitWriter` with a pre-allocated buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            bit_position: 0,
            current_byte: 0,
        }
    }

    /// Appends the low `bits` bits of `value`.
    ///
    /// # Errors
    /// Returns [`EncodingError::InvalidBitWidth`] if `bits` is 0 or greater than 64.
    pub fn write_bits(&mut self, value: u64, bits: u8) -> EncodingResult<()> {
        if bits == 0 || bits > 64 {
            return Err(EncodingError::InvalidBitWidth(bits));
        }

        let mut remaining_bits = bits;
        let mut value_to_write = if bits == 64 {
            value
        } else {
            value & ((1u64 << bits) - 1)
        };

        while remaining_bits > 0 {
            let bits_available_in_current_byte = 8 - self.bit_position;
            let bits_to_write = remaining_bits.min(bits_available_in_current_byte);

            let shift_amount = remaining_bits - bits_to_write;
            let bits_value = (value_to_write >> shift_amount) as u8;
            let mask = ((1u16 << bits_to_write) - 1) as u8;

            self.current_byte |=
                (bits_value & mask) << (bits_available_in_current_byte - bits_to_write);
            self.bit_position += bits_to_write;

            if self.bit_position == 8 {
                self.buffer.push(self.current_byte);
                self.current_byte = 0;
                self.bit_position = 0;
            }

            remaining_bits -= bits_to_write;
            value_to_write &= (1u64 << shift_amount) - 1;
        }

        Ok(())
    }

    /// Writes a single bit.
    pub fn write_flag(&mut self, bit: bool) -> EncodingResult<()> {
        self.write_bits(bit as u64, 1)
    }

    /// Appends raw bytes at the current bit position.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> EncodingResult<()> {
        if self.bit_position == 0 {
            self.buffer.extend_from_slice(bytes);
            return Ok(());
        }
        for &byte in bytes {
            self.write_bits(byte as u64, 8)?;
        }
        Ok(())
    }

    /// Finishes writing and returns the complete buffer.
    ///
    /// A partial trailing byte is zero-padded on the right.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_position > 0 {
            self.buffer.push(self.current_byte);
        }
        self.buffer
    }

    /// Exact number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.buffer.len() * 8 + self.bit_position as usize
    }

    /// Returns true if no bits have been written yet.
    pub fn is_empty(&self) -> bool {
        self.bit_len() == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}
