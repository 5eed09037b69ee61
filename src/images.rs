use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ImageError;
use crate::fetch::Fetcher;
use crate::text::last_segment;

/// Local image directory. Files are named after the URL's last path segment
/// and overwritten when they already exist.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ImageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| ImageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(ImageStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Download `url` and store it; returns the written path.
    pub fn download(&self, fetcher: &Fetcher, url: &str) -> Result<PathBuf, ImageError> {
        let name = file_name(url)?;
        info!("Downloading image {}", url);
        let mut response = fetcher.get(url)?;
        self.write(name, &mut response)
    }

    /// Stream `reader` into `<dir>/<name>`.
    pub fn write(&self, name: &str, reader: &mut impl Read) -> Result<PathBuf, ImageError> {
        let path = self.dir.join(name);
        let io_err = |source: io::Error| ImageError::Io {
            path: path.clone(),
            source,
        };
        let file = File::create(&path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        io::copy(reader, &mut out).map_err(io_err)?;
        out.flush().map_err(io_err)?;
        Ok(path)
    }
}

fn file_name(url: &str) -> Result<&str, ImageError> {
    let name = last_segment(url);
    if name.is_empty() || name == "." || name == ".." {
        return Err(ImageError::NoFileName(url.to_string()));
    }
    Ok(name)
}
