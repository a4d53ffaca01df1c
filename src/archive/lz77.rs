// archive/lz77.rs from wiilz (c) 2025 NinjaCheetah & Contributors
// https://github.com/NinjaCheetah/wiilz
//
// Implements the compression and decompression routines used for the Wii's LZ77 compression scheme.

use std::cmp::min;
use std::io::{self, Cursor, Write};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LZ77Error {
    #[error("compression is type `{0:#04x}` but only 0x10 is supported")]
    InvalidCompressionType(u8),
    #[error("LZ77 data ended before the declared decompressed size was reached")]
    TruncatedInput,
    #[error("reference at output offset {position} with displacement {displacement} points before the start of the data")]
    InvalidBackReference { displacement: usize, position: usize },
    #[error("data is {0} bytes long, but LZ77 can only store sizes up to 0xFFFFFF bytes")]
    DataTooLarge(usize),
    #[error("an I/O error occurred while processing LZ77 data")]
    IO(#[source] io::Error),
}

impl From<io::Error> for LZ77Error {
    fn from(err: io::Error) -> Self {
        // Running out of input while reading is the only way a read from an in-memory buffer can
        // fail, and it always means the stream was cut short.
        match err.kind() {
            io::ErrorKind::UnexpectedEof => LZ77Error::TruncatedInput,
            _ => LZ77Error::IO(err),
        }
    }
}

/// The only compression type supported on the Wii.
pub const LZ77_TYPE: u8 = 0x10;
/// The largest decompressed size that fits in the 24-bit size field of the header.
pub const MAX_UNCOMPRESSED_SIZE: usize = 0xFF_FFFF;
pub const LZ_MIN_LENGTH: usize = 0x03; // Minimum length for each reference.
pub const LZ_MAX_LENGTH: usize = 0x12; // Maximum length for each reference.
pub const LZ_MAX_DISTANCE: usize = 0x1000; // Maximum distance for each reference.
const HEADER_SIZE: usize = 4;
const FLAG_GROUP_SIZE: usize = 8;

/// The 4-byte header at the start of LZ77 data. It's stored as a single little-endian word, with
/// the compression type in the low byte and the decompressed size in the upper 3 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    uncompressed_length: u32, // Always fits in 24 bits.
    format_tag: u8,
}

impl Header {
    /// Creates a new header for data of the specified decompressed length.
    pub fn new(length: usize) -> Result<Self, LZ77Error> {
        if length > MAX_UNCOMPRESSED_SIZE {
            return Err(LZ77Error::DataTooLarge(length));
        }
        Ok(Header {
            uncompressed_length: length as u32,
            format_tag: LZ77_TYPE,
        })
    }

    /// Parses an LZ77 header from the first 4 bytes of the provided data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, LZ77Error> {
        let mut buf = Cursor::new(data);
        Header::read(&mut buf)
    }

    fn read(buf: &mut Cursor<&[u8]>) -> Result<Self, LZ77Error> {
        let word = buf.read_u32::<LittleEndian>()?;
        let format_tag = (word & 0xFF) as u8;
        // Nintendo used other types, but only 0x10 was supported on the Wii.
        if format_tag != LZ77_TYPE {
            return Err(LZ77Error::InvalidCompressionType(format_tag));
        }
        Ok(Header {
            uncompressed_length: word >> 8,
            format_tag,
        })
    }

    /// Dumps the header back into its 4-byte binary form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let word = (self.uncompressed_length << 8) | self.format_tag as u32;
        word.to_le_bytes()
    }

    pub fn uncompressed_size(&self) -> usize {
        self.uncompressed_length as usize
    }

    pub fn format_tag(&self) -> u8 {
        self.format_tag
    }
}

#[derive(Debug, Clone, Copy)]
struct BackReference {
    length: usize,
    displacement: usize,
}

impl BackReference {
    fn from_info(info: u16) -> Self {
        // The upper 4 bits are the length (minus 3), and the lower 12 are the distance (minus 1).
        let length = LZ_MIN_LENGTH + ((info >> 12) & 0xF) as usize;
        let displacement = (info as usize) & (LZ_MAX_DISTANCE - 1);
        BackReference { length, displacement }
    }
}

/// Returns the exact size of the data produced by [`compress_lz77`] for an input of the given
/// length: the header, one flag byte for every group of 8 bytes, and the bytes themselves.
pub fn compressed_size(length: usize) -> usize {
    HEADER_SIZE + length + length.div_ceil(FLAG_GROUP_SIZE)
}

/// Compresses data into the Wii's LZ77 format and returns the compressed result.
///
/// No references are ever emitted, so the result is always larger than the input. The data is
/// stored as literals, which is still valid LZ77 and will be accepted by anything that reads it.
pub fn compress_lz77(data: &[u8]) -> Result<Vec<u8>, LZ77Error> {
    let header = Header::new(data.len())?;
    let mut buf: Vec<u8> = Vec::with_capacity(compressed_size(data.len()));
    buf.write_all(&header.to_bytes())?;
    // Every flag is 0, meaning all 8 of the tokens that follow it are direct byte copies. The
    // final group may be shorter than 8 bytes.
    for group in data.chunks(FLAG_GROUP_SIZE) {
        buf.write_u8(0x00)?;
        buf.write_all(group)?;
    }
    debug!("LZ77 compressed {} bytes -> {} bytes", data.len(), buf.len());
    Ok(buf)
}

/// Decompresses LZ77-compressed data and returns the decompressed result.
pub fn decompress_lz77(data: &[u8]) -> Result<Vec<u8>, LZ77Error> {
    let mut buf = Cursor::new(data);
    let header = Header::read(&mut buf)?;
    let decompressed_size = header.uncompressed_size();
    debug!("LZ77 header: type {:#04x}, decompressed size {} bytes", header.format_tag(), decompressed_size);
    let mut out_buf: Vec<u8> = Vec::with_capacity(decompressed_size);
    while out_buf.len() < decompressed_size {
        let mut flags = buf.read_u8()?;
        // Read bits in flag from most to least significant.
        for _ in 0..FLAG_GROUP_SIZE {
            // Bit is 1, which is a reference to previous data in the file.
            if flags & 0x80 != 0 {
                let reference = BackReference::from_info(buf.read_u16::<BigEndian>()?);
                copy_reference(&mut out_buf, reference, decompressed_size)?;
            }
            // Bit is 0, which is a direct byte copy.
            else {
                out_buf.push(buf.read_u8()?);
            }
            flags <<= 1;
            // Stop as soon as we have all the data, even if the final flag is only partially used.
            if out_buf.len() >= decompressed_size {
                break;
            }
        }
    }
    debug!("LZ77 decompressed {} bytes -> {} bytes", buf.position(), out_buf.len());
    Ok(out_buf)
}

fn copy_reference(out_buf: &mut Vec<u8>, reference: BackReference, decompressed_size: usize) -> Result<(), LZ77Error> {
    let position = out_buf.len();
    let mut ptr = position.checked_sub(reference.displacement + 1).ok_or(LZ77Error::InvalidBackReference {
        displacement: reference.displacement,
        position,
    })?;
    // Avoids a buffer overrun if the copy length would extend past the end of the file.
    let count = min(reference.length, decompressed_size - position);
    if ptr + count < position {
        // The source is entirely made up of data that's already been written, so it can be
        // copied all at once.
        out_buf.extend_from_within(ptr..ptr + count);
    } else {
        // The source runs into the data being written by this reference, so each byte needs to
        // be written before it can be read again.
        for _ in 0..count {
            let byte = out_buf[ptr];
            out_buf.push(byte);
            ptr += 1;
        }
    }
    Ok(())
}
