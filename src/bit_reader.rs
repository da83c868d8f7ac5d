//! Bit-level reading utilities for parsing SCTE-35 binary data.
//!
//! This module provides the `BitReader` struct which enables reading arbitrary
//! numbers of bits from a byte buffer, as required by the SCTE-35 specification.

use crate::error::{DecodeError, DecodeResult};

/// A bounds-checked reader that extracts values at the bit level from a byte buffer.
///
/// SCTE-35 messages contain fields that are not byte-aligned, requiring
/// bit-level parsing. Reads never cross the end of the buffer: a read that
/// would fails without moving the offset.
pub(crate) struct BitReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` for the given buffer, starting at bit offset 0.
    pub fn new(buffer: &'a [u8]) -> Self {
        BitReader { buffer, offset: 0 }
    }

    /// Reads `num_bits` (at most 64) MSB first and returns them right-aligned.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferUnderflow`] if fewer than `num_bits` remain.
    pub fn read_bits(&mut self, num_bits: usize) -> DecodeResult<u64> {
        debug_assert!(num_bits <= 64, "cannot read more than 64 bits at once");
        self.ensure(num_bits)?;

        let mut value: u64 = 0;
        let mut bits_read = 0;

        while bits_read < num_bits {
            let byte = self.buffer[self.offset / 8];
            let bit_offset = self.offset % 8;
            let bits_to_read = std::cmp::min(num_bits - bits_read, 8 - bit_offset);
            let mask = if bits_to_read >= 8 {
                0xFF
            } else {
                (1u8 << bits_to_read) - 1
            };
            let bits_value = (byte >> (8 - bit_offset - bits_to_read)) & mask;

            value = (value << bits_to_read) | (bits_value as u64);
            self.offset += bits_to_read;
            bits_read += bits_to_read;
        }

        Ok(value)
    }

    /// Reads a single bit as a flag.
    pub fn read_flag(&mut self) -> DecodeResult<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Reads `count` raw bytes starting at the current bit offset.
    ///
    /// Used for variable-length payloads such as UPIDs and private bytes.
    pub fn read_bytes(&mut self, count: usize) -> DecodeResult<Vec<u8>> {
        self.ensure(count * 8)?;
        if self.offset % 8 == 0 {
            let start = self.offset / 8;
            self.offset += count * 8;
            return Ok(self.buffer[start..start + count].to_vec());
        }
        (0..count).map(|_| Ok(self.read_bits(8)? as u8)).collect()
    }

    /// Skips a specified number of bits in the buffer.
    pub fn skip_bits(&mut self, num_bits: usize) -> DecodeResult<()> {
        self.ensure(num_bits)?;
        self.offset += num_bits;
        Ok(())
    }

    /// Gets the current bit offset in the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bits left to read.
    pub fn remaining_bits(&self) -> usize {
        self.buffer.len() * 8 - self.offset
    }

    fn ensure(&self, num_bits: usize) -> DecodeResult<()> {
        let available = self.remaining_bits();
        if num_bits > available {
            return Err(DecodeError::BufferUnderflow {
                needed: num_bits,
                offset: self.offset,
                available,
            });
        }
        Ok(())
    }
}
