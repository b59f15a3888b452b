//! Flat content-addressable disk cache.
//!
//! One directory, one file per entry, named by the digest of the logical key
//! (not of the content). No expiry or metadata: an entry is served until the
//! directory is purged.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::digest::digest_str;
use crate::error::{Error, Result};

/// Handle to a cache directory. Cloned freely and threaded through the fetcher.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    /// Opens the user-level cache: `$XDG_CACHE_HOME/jsbuild` (default `~/.cache/jsbuild`).
    pub fn open_default() -> anyhow::Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix(crate::NAME)?;
        let dir = xdg_dirs.get_cache_home();
        Ok(Self::open_at(dir)?)
    }

    /// Opens (creating if needed) a cache rooted at `dir`.
    pub fn open_at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| Error::CacheIo {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path where the blob for `key` lives (whether or not it exists yet).
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(digest_str(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }

    /// Returns the stored blob, or `None` on a miss.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::CacheIo { path, source }),
        }
    }

    /// Stores `bytes` under `key`, replacing any previous entry.
    ///
    /// Data is written to a sibling temp file and renamed into place, so
    /// readers only ever see complete blobs.
    pub fn put(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(key);
        let io_err = |source| Error::CacheIo {
            path: path.clone(),
            source,
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(bytes).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;
        tracing::debug!(key, path = %path.display(), bytes = bytes.len(), "cache store");
        Ok(path)
    }

    /// Lists every file currently in the cache directory.
    pub fn entries(&self) -> Result<Vec<PathBuf>> {
        let read_dir = fs::read_dir(&self.dir).map_err(|source| Error::CacheIo {
            path: self.dir.clone(),
            source,
        })?;
        let mut out = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| Error::CacheIo {
                path: self.dir.clone(),
                source,
            })?;
            out.push(entry.path());
        }
        out.sort();
        Ok(out)
    }

    /// Deletes every cached file, keeping the directory itself.
    /// Returns the removed paths.
    pub fn purge(&self) -> Result<Vec<PathBuf>> {
        let entries = self.entries()?;
        for path in &entries {
            fs::remove_file(path).map_err(|source| Error::CacheIo {
                path: path.clone(),
                source,
            })?;
        }
        tracing::info!(dir = %self.dir.display(), removed = entries.len(), "cache purged");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cache_lives_directly_under_xdg_cache_home() {
        let home = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CACHE_HOME", home.path());
        let cache = Cache::open_default().unwrap();
        assert_eq!(cache.dir(), home.path().join("jsbuild"));
        assert!(cache.dir().is_dir());
    }

    #[test]
    fn miss_then_hit() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_at(dir.path()).unwrap();
        assert!(cache.get("http_https://h/a.js").unwrap().is_none());
        cache.put("http_https://h/a.js", b"export const a = 1;").unwrap();
        assert_eq!(
            cache.get("http_https://h/a.js").unwrap().as_deref(),
            Some(&b"export const a = 1;"[..])
        );
    }

    #[test]
    fn entry_is_named_by_key_digest() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_at(dir.path()).unwrap();
        let path = cache.put("http_https://h/y.js", b"x").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "beb7249a7986acc003a82efb24602c181efc5068d0e44bd0aa39b434a14d49bc"
        );
        assert_eq!(cache.entries().unwrap(), vec![path]);
    }

    #[test]
    fn put_overwrites_existing_blob() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_at(dir.path()).unwrap();
        cache.put("k", b"old").unwrap();
        cache.put("k", b"new").unwrap();
        assert_eq!(cache.get("k").unwrap().unwrap(), b"new");
        assert_eq!(cache.entries().unwrap().len(), 1);
    }

    #[test]
    fn purge_removes_files_but_keeps_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_at(dir.path().join("jsbuild")).unwrap();
        cache.put("a", b"1").unwrap();
        cache.put("b", b"2").unwrap();
        let removed = cache.purge().unwrap();
        assert_eq!(removed.len(), 2);
        assert!(cache.dir().is_dir());
        assert!(cache.entries().unwrap().is_empty());
        assert!(!cache.contains("a"));
    }
}
