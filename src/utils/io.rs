// Random-access byte sources

use std::fs::File;
use std::io;

use crate::error::{Error, Result};

/// Anything that can serve "read N bytes at offset" and knows its length.
///
/// Probing only ever issues small reads at computed offsets, so files,
/// memory maps and plain buffers can all back it.
pub trait ByteSource {
    /// Total length in bytes.
    fn len(&self) -> io::Result<u64>;

    /// Read into `buf` starting at `offset`.
    ///
    /// Returns fewer bytes than `buf.len()` only when the end of data is
    /// reached, and `Ok(0)` for offsets at or past the end.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;

    /// Whether the source holds no bytes at all.
    fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl ByteSource for [u8] {
    fn len(&self) -> io::Result<u64> {
        Ok(<[u8]>::len(self) as u64)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        let start = match usize::try_from(offset) {
            Ok(start) if start < <[u8]>::len(self) => start,
            _ => return Ok(0),
        };
        let available = &self[start..];
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        Ok(n)
    }
}

impl ByteSource for Vec<u8> {
    fn len(&self) -> io::Result<u64> {
        ByteSource::len(self.as_slice())
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.as_slice().read_at(offset, buf)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn len(&self) -> io::Result<u64> {
        (**self).len()
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_at(offset, buf)
    }
}

impl ByteSource for File {
    fn len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        // Positional reads may return early; keep going until EOF.
        let mut filled = 0;
        while filled < buf.len() {
            match positional_read(self, &mut buf[filled..], offset + filled as u64) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

#[cfg(unix)]
fn positional_read(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(file, buf, offset)
}

#[cfg(windows)]
fn positional_read(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_read(file, buf, offset)
}

/// Fill `buf` from `offset`, treating a short read as an I/O error.
///
/// `what` names the probe in the resulting error message.
pub fn read_exact_at<S: ByteSource + ?Sized>(
    source: &S,
    offset: u64,
    buf: &mut [u8],
    what: &str,
) -> Result<()> {
    let n = source.read_at(offset, buf)?;
    if n < buf.len() {
        return Err(Error::short_read(what));
    }
    Ok(())
}

/// Read a big-endian 32-bit integer from the start of `bytes`
pub fn read_be_u32(bytes: &[u8]) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_be_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_read_at_clamps_to_end() {
        let data = vec![1u8, 2, 3, 4, 5];
        let mut buf = [0u8; 4];

        assert_eq!(data.read_at(3, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[4, 5]);

        assert_eq!(data.read_at(5, &mut buf).unwrap(), 0);
        assert_eq!(data.read_at(u64::MAX, &mut buf).unwrap(), 0);
    }

    #[test]
    fn read_exact_at_reports_short_reads() {
        let data = vec![0u8; 3];
        let mut buf = [0u8; 4];

        let err = read_exact_at(&data, 0, &mut buf, "header").unwrap_err();
        match err {
            Error::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
                assert_eq!(e.to_string(), "header");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_source_reads_at_offset() {
        use std::io::Write;

        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"0123456789").unwrap();

        assert_eq!(ByteSource::len(&file).unwrap(), 10);

        let mut buf = [0u8; 3];
        assert_eq!(ByteSource::read_at(&file, 7, &mut buf).unwrap(), 3);
        assert_eq!(&buf, b"789");
        assert_eq!(ByteSource::read_at(&file, 9, &mut buf).unwrap(), 1);
    }

    #[test]
    fn be_u32() {
        assert_eq!(read_be_u32(&[0, 0, 1, 2, 9]), Some(0x0102));
        assert_eq!(read_be_u32(&[0, 0, 1]), None);
    }
}
