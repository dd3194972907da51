use crate::error::{FetchError, Result};
use flate2::read::GzDecoder;
use std::io::{self, Read};
use std::path::Path;
use tar::Archive;

/// Counts bytes pulled from the inner reader.
struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

/// Decompresses and unpacks a gzip tar stream into `destination`.
///
/// The decoder is drained after the tar end marker so a stream cut off in
/// the gzip trailer is still reported. Returns the number of compressed
/// bytes read.
pub fn extract_tar_gz<R: Read>(reader: R, destination: &Path) -> Result<u64> {
    tracing::debug!("Extracting archive stream into {}", destination.display());

    let counting = CountingReader {
        inner: reader,
        count: 0,
    };
    let mut archive = Archive::new(GzDecoder::new(counting));
    archive.unpack(destination).map_err(archive_error)?;

    let mut decoder = archive.into_inner();
    io::copy(&mut decoder, &mut io::sink()).map_err(archive_error)?;

    let count = decoder.into_inner().count;
    if count == 0 {
        return Err(FetchError::archive_format("empty archive stream"));
    }

    tracing::debug!("Extraction read {count} compressed bytes");
    Ok(count)
}

fn archive_error(e: io::Error) -> FetchError {
    FetchError::archive_format(e.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    /// Incompressible filler so truncation lands inside deflate data.
    fn noise(len: usize) -> Vec<u8> {
        let mut state: u32 = 0x2545_f491;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect()
    }

    /// Builds a gzip tar with `root/README` and `root/mercurial/noise.bin`.
    pub(crate) fn sample_archive(root: &str) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut append = |path: String, data: &[u8]| {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, data).unwrap();
        };
        append(format!("{root}/README"), b"Mercurial\n");
        append(format!("{root}/mercurial/noise.bin"), &noise(64 * 1024));

        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn test_extract_sample() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = sample_archive("mercurial-devel-6.7.2");

        let count = extract_tar_gz(&bytes[..], dir.path()).unwrap();

        assert_eq!(count, bytes.len() as u64);
        let readme = dir.path().join("mercurial-devel-6.7.2/README");
        assert_eq!(std::fs::read_to_string(readme).unwrap(), "Mercurial\n");
        assert!(dir
            .path()
            .join("mercurial-devel-6.7.2/mercurial/noise.bin")
            .is_file());
    }

    #[test]
    fn test_error_page_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let page = b"<!DOCTYPE html><html><body>404 Not Found</body></html>";

        let result = extract_tar_gz(&page[..], dir.path());
        assert!(matches!(result, Err(FetchError::ArchiveFormat { .. })));
    }

    #[test]
    fn test_empty_stream_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let result = extract_tar_gz(io::empty(), dir.path());
        assert!(matches!(result, Err(FetchError::ArchiveFormat { .. })));
    }

    #[test]
    fn test_truncated_stream_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = sample_archive("mercurial-devel-6.7.2");

        let result = extract_tar_gz(&bytes[..bytes.len() / 2], dir.path());
        assert!(matches!(result, Err(FetchError::ArchiveFormat { .. })));
    }

    #[test]
    fn test_missing_trailer_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = sample_archive("mercurial-devel-6.7.2");

        // Drop the CRC32 and size fields that close the gzip member.
        let result = extract_tar_gz(&bytes[..bytes.len() - 8], dir.path());
        assert!(matches!(result, Err(FetchError::ArchiveFormat { .. })));
    }
}
