use std::{
    fs::File,
    io::{BufReader, Read as _},
    path::{Path, PathBuf},
};

use docsmith_utils::fs::safe_remove;
use flate2::read::GzDecoder;
use tracing::debug;
use zip::ZipArchive;

use crate::error::CoreError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZIP_MAGIC: [u8; 4] = [b'P', b'K', 0x03, 0x04];
const TAR_MAGIC: &[u8] = b"ustar";
const TAR_MAGIC_OFFSET: usize = 257;

/// Supported archive formats, selected by extension or by sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    /// Plain tar and gzip-compressed tar share one strategy; the strategy
    /// sniffs for gzip itself.
    TarGz,
}

impl ArchiveFormat {
    /// Select a format from the archive's file extension.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "zip" => Ok(Self::Zip),
            "gz" | "tar" => Ok(Self::TarGz),
            _ => Err(CoreError::UnsupportedArchive {
                kind: extension,
            }),
        }
    }

    /// Select a format by sniffing leading bytes; fallback for inputs with
    /// no usable extension.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.starts_with(&ZIP_MAGIC) {
            return Ok(Self::Zip);
        }
        if bytes.starts_with(&GZIP_MAGIC) {
            return Ok(Self::TarGz);
        }
        if bytes.len() >= TAR_MAGIC_OFFSET + TAR_MAGIC.len()
            && &bytes[TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + TAR_MAGIC.len()] == TAR_MAGIC
        {
            return Ok(Self::TarGz);
        }

        Err(CoreError::UnsupportedArchive {
            kind: "unknown".to_string(),
        })
    }

    /// Unpack `archive_path` into `working_dir`.
    ///
    /// The archive file (and any intermediate artifact) is removed on every
    /// exit path, success or failure.
    pub fn extract(&self, working_dir: &Path, archive_path: &Path) -> Result<(), CoreError> {
        debug!(
            archive = %archive_path.display(),
            dir = %working_dir.display(),
            "extracting archive"
        );
        match self {
            Self::Zip => extract_zip(working_dir, archive_path),
            Self::TarGz => extract_tar(working_dir, archive_path),
        }
    }
}

fn extract_zip(working_dir: &Path, archive_path: &Path) -> Result<(), CoreError> {
    let result = unpack_zip(working_dir, archive_path);
    let cleanup = safe_remove(archive_path);
    result?;
    cleanup?;
    Ok(())
}

fn unpack_zip(working_dir: &Path, archive_path: &Path) -> Result<(), CoreError> {
    let file = File::open(archive_path).map_err(|e| CoreError::Extraction(e.to_string()))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| CoreError::Extraction(e.to_string()))?;
    archive
        .extract(working_dir)
        .map_err(|e| CoreError::Extraction(e.to_string()))
}

fn extract_tar(working_dir: &Path, archive_path: &Path) -> Result<(), CoreError> {
    let tar_path = working_dir.join("archive.tar");
    let result = unpack_tar(working_dir, archive_path, &tar_path);
    let cleanup_archive = safe_remove(archive_path);
    let cleanup_tar = safe_remove(&tar_path);
    result?;
    cleanup_archive?;
    cleanup_tar?;
    Ok(())
}

fn unpack_tar(working_dir: &Path, archive_path: &Path, tar_path: &Path) -> Result<(), CoreError> {
    // A compressed input is first decompressed to an `archive.tar` sibling,
    // then unpacked; a plain tar is unpacked directly.
    let source = if is_gzip(archive_path)? {
        let input = File::open(archive_path).map_err(|e| CoreError::Extraction(e.to_string()))?;
        let mut decoder = GzDecoder::new(BufReader::new(input));
        let mut output = File::create(tar_path).map_err(|e| CoreError::Extraction(e.to_string()))?;
        std::io::copy(&mut decoder, &mut output)
            .map_err(|e| CoreError::Extraction(e.to_string()))?;
        tar_path.to_path_buf()
    } else {
        archive_path.to_path_buf()
    };

    let file = File::open(&source).map_err(|e| CoreError::Extraction(e.to_string()))?;
    let mut archive = tar::Archive::new(BufReader::new(file));
    archive
        .unpack(working_dir)
        .map_err(|e| CoreError::Extraction(e.to_string()))
}

fn is_gzip(path: &Path) -> Result<bool, CoreError> {
    let mut file = File::open(path).map_err(|e| CoreError::Extraction(e.to_string()))?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(magic == GZIP_MAGIC),
        // Too short to carry a gzip header, so it cannot be gzip.
        Err(_) => Ok(false),
    }
}
