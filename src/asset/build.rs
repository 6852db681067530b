//! Table building: compress every walked file and collect the records.

use rayon::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{AssetRecord, AssetTable, BakeError, Fingerprint, WalkEntry, compress_reader, walk};
use crate::debug;
use crate::logger::ProgressLine;

/// Options for a bake run.
#[derive(Debug, Clone, Default)]
pub struct BakeOptions {
    /// Show a progress line while compressing.
    pub progress: bool,
}

/// Walk `root` and bake every file into an [`AssetTable`].
///
/// Files are compressed in parallel; the table orders records by path, so
/// the result does not depend on completion order. The first failure aborts
/// the whole run.
pub fn bake(root: impl AsRef<Path>, options: &BakeOptions) -> Result<AssetTable, BakeError> {
    let root = root.as_ref();
    let entries = walk(root)?;
    debug!("bake"; "found {} files under {}", entries.len(), root.display());

    let progress = options
        .progress
        .then(|| ProgressLine::new("bake", entries.len()));

    let records = entries
        .par_iter()
        .map(|entry| {
            let record = bake_entry(entry);
            if let (Some(progress), Ok(record)) = (&progress, &record) {
                progress.record(record.payload.len());
            }
            record
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(progress) = progress {
        progress.finish();
    }

    AssetTable::from_records(records, Fingerprint::random())
}

fn bake_entry(entry: &WalkEntry) -> Result<AssetRecord, BakeError> {
    let file = File::open(&entry.source).map_err(|e| BakeError::Read(entry.source.clone(), e))?;
    let compressed = compress_reader(BufReader::with_capacity(64 * 1024, file))
        .map_err(|e| BakeError::Compress(entry.source.clone(), e))?;

    debug!("bake"; "{} -> {} bytes", entry.path, compressed.payload.len());
    Ok(AssetRecord::new(entry.path.clone(), compressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::decompress;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "A").unwrap();
        fs::write(dir.path().join("app.js"), "B").unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
        dir
    }

    #[test]
    fn test_bake_one_record_per_file() {
        let dir = site();
        let table = bake(dir.path(), &BakeOptions::default()).unwrap();
        let paths: Vec<_> = table.paths().collect();
        assert_eq!(paths, vec!["/app.js", "/img/logo.png", "/index.html"]);
    }

    #[test]
    fn test_bake_payloads_roundtrip() {
        let dir = site();
        let table = bake(dir.path(), &BakeOptions::default()).unwrap();
        for record in table.iter() {
            let original = fs::read(dir.path().join(&record.path[1..])).unwrap();
            assert_eq!(decompress(&record.payload).unwrap(), original);
        }
    }

    #[test]
    fn test_bake_is_reproducible_except_fallback() {
        let dir = site();
        let first = bake(dir.path(), &BakeOptions::default()).unwrap();
        let second = bake(dir.path(), &BakeOptions::default()).unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a, b);
        }
        assert_ne!(first.fallback_token(), second.fallback_token());
    }

    #[test]
    fn test_bake_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        assert!(bake(dir.path().join("missing"), &BakeOptions::default()).is_err());
    }
}
