//! Streaming PNG encoder for 8-bit greyscale and truecolor images.
//!
//! Supports four color types, selected by [`PixelFormat`]:
//! - **Greyscale (color type 0)**: one intensity byte per pixel.
//! - **Greyscale + alpha (color type 4)**
//! - **RGB (color type 2)**
//! - **RGBA (color type 6)**
//!
//! Rows are fed one at a time. Compressed data is emitted as an IDAT chunk
//! whenever the pending buffer grows past [`IDAT_FLUSH_THRESHOLD`], so large
//! images never hold more than one chunk of compressed output in memory.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

use crate::color::PixelFormat;
use crate::error::{RenderError, RenderResult};

/// PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Pending compressed bytes that trigger an IDAT chunk
pub const IDAT_FLUSH_THRESHOLD: usize = 64 * 1024;

/// Largest dimension the PNG format allows (2^31 - 1)
const MAX_DIMENSION: usize = i32::MAX as usize;

impl PixelFormat {
    /// PNG IHDR color type for this layout.
    pub fn png_color_type(self) -> u8 {
        match self {
            PixelFormat::Grey => 0,
            PixelFormat::Rgb => 2,
            PixelFormat::GreyAlpha => 4,
            PixelFormat::Rgba => 6,
        }
    }
}

/// Row-at-a-time PNG writer.
pub struct PngEncoder<W: Write> {
    sink: W,
    width: usize,
    height: usize,
    format: PixelFormat,
    zlib: ZlibEncoder<Vec<u8>>,
    rows_written: usize,
    bytes_written: u64,
}

impl<W: Write> PngEncoder<W> {
    /// Write the signature and IHDR chunk to `sink`.
    pub fn new(mut sink: W, width: usize, height: usize, format: PixelFormat) -> RenderResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::Encoding(format!(
                "invalid image dimensions {}x{}",
                width, height
            )));
        }

        sink.write_all(&PNG_SIGNATURE)?;
        let mut bytes_written = PNG_SIGNATURE.len() as u64;

        // IHDR chunk
        let mut ihdr_data = Vec::with_capacity(13);
        ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
        ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
        ihdr_data.push(8); // bit depth
        ihdr_data.push(format.png_color_type());
        ihdr_data.push(0); // compression method
        ihdr_data.push(0); // filter method
        ihdr_data.push(0); // interlace method
        bytes_written += write_chunk(&mut sink, b"IHDR", &ihdr_data)?;

        Ok(Self {
            sink,
            width,
            height,
            format,
            zlib: ZlibEncoder::new(Vec::new(), Compression::default()),
            rows_written: 0,
            bytes_written,
        })
    }

    /// Bytes expected per row (excluding the filter byte).
    pub fn row_len(&self) -> usize {
        self.width * self.format.channels()
    }

    /// Append one scanline of raw pixel bytes.
    pub fn write_row(&mut self, row: &[u8]) -> RenderResult<()> {
        if self.rows_written >= self.height {
            return Err(RenderError::Encoding(format!(
                "too many rows: image height is {}",
                self.height
            )));
        }
        if row.len() != self.row_len() {
            return Err(RenderError::Encoding(format!(
                "row {} has {} bytes, expected {}",
                self.rows_written,
                row.len(),
                self.row_len()
            )));
        }

        self.zlib.write_all(&[0])?; // filter type: none
        self.zlib.write_all(row)?;
        self.rows_written += 1;

        if self.zlib.get_ref().len() >= IDAT_FLUSH_THRESHOLD {
            let pending = std::mem::take(self.zlib.get_mut());
            self.bytes_written += write_chunk(&mut self.sink, b"IDAT", &pending)?;
        }
        Ok(())
    }

    /// Flush the remaining image data and IEND, returning the sink and the
    /// total number of bytes written to it.
    pub fn finish(self) -> RenderResult<(W, u64)> {
        let PngEncoder {
            mut sink,
            height,
            zlib,
            rows_written,
            mut bytes_written,
            ..
        } = self;

        if rows_written != height {
            return Err(RenderError::Encoding(format!(
                "expected {} rows, got {}",
                height, rows_written
            )));
        }

        let remaining = zlib.finish()?;
        if !remaining.is_empty() {
            bytes_written += write_chunk(&mut sink, b"IDAT", &remaining)?;
        }
        bytes_written += write_chunk(&mut sink, b"IEND", &[])?;
        sink.flush()?;

        Ok((sink, bytes_written))
    }
}

/// Encode a complete row-major pixel buffer into PNG bytes.
///
/// `pixels` must hold `width * height * format.channels()` bytes.
pub fn encode_png(pixels: &[u8], width: usize, height: usize, format: PixelFormat) -> RenderResult<Vec<u8>> {
    let row_len = width * format.channels();
    if pixels.len() != row_len * height {
        return Err(RenderError::Encoding(format!(
            "pixel buffer has {} bytes, expected {}",
            pixels.len(),
            row_len * height
        )));
    }

    let mut encoder = PngEncoder::new(Vec::new(), width, height, format)?;
    for row in pixels.chunks_exact(row_len) {
        encoder.write_row(row)?;
    }
    let (png, _) = encoder.finish()?;
    Ok(png)
}

/// Write a PNG chunk, returning its size on disk
fn write_chunk<W: Write>(sink: &mut W, chunk_type: &[u8; 4], data: &[u8]) -> std::io::Result<u64> {
    sink.write_all(&(data.len() as u32).to_be_bytes())?;
    sink.write_all(chunk_type)?;
    sink.write_all(data)?;

    // CRC covers chunk type and data
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    sink.write_all(&hasher.finalize().to_be_bytes())?;

    Ok(12 + data.len() as u64)
}
