use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::models::region::Region;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
///
/// # Returns
///
/// A `BufReader` object for a given file path or stdin.
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        let file_path = Path::new(file_path_str);
        get_dynamic_reader(file_path)
    }
}

/// Whether a BED line carries no record (blank, comment or UCSC header line).
pub fn is_header_line(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("track")
        || line.starts_with("browser")
}

///
/// Read every record of a BED-like stream, in file order.
///
/// # Arguments
///
/// - reader: any buffered reader over BED-like text
///
pub fn read_regions_from<R: BufRead>(reader: R) -> Result<Vec<Region>> {
    let mut regions = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if is_header_line(&line) {
            continue;
        }
        let region = Region::from_bed_line(&line)
            .with_context(|| format!("Failed to parse line {}", line_no + 1))?;
        regions.push(region);
    }

    Ok(regions)
}

///
/// Read every record of a BED-like file (or stdin, for `-`), in file order.
///
pub fn read_regions(file_path_str: &str) -> Result<Vec<Region>> {
    let reader = get_dynamic_reader_w_stdin(file_path_str)?;
    read_regions_from(reader)
        .with_context(|| format!("Failed to read regions from {}", file_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_read_regions_skips_headers() {
        let text = "track name=peaks\n# comment\n\nchr1\t10\t20\tp1\nbrowser position chr1\nchr2\t5\t6\n";
        let regions = read_regions_from(text.as_bytes()).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].rest.as_deref(), Some("p1"));
        assert_eq!(regions[1].chr, "chr2");
    }

    #[rstest]
    fn test_read_regions_reports_bad_line() {
        let text = "chr1\t10\t20\nchr1\tten\t20\n";
        let err = read_regions_from(text.as_bytes()).unwrap_err();
        assert_eq!(format!("{err}"), "Failed to parse line 2");
    }

    #[rstest]
    fn test_read_gzipped_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.bed.gz");

        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(b"chr1\t1\t5\nchr1\t3\t7\n").unwrap();
        encoder.finish().unwrap();

        let regions = read_regions(path.to_str().unwrap()).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].start, 3);
    }

    #[rstest]
    fn test_missing_file() {
        assert_eq!(read_regions("does/not/exist.bed").is_err(), true);
    }
}
