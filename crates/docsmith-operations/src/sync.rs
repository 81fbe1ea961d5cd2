use std::{
    fs::File,
    io::Read as _,
    path::{Path, PathBuf},
};

use docsmith_config::{config::Config, source::Source};
use docsmith_core::{
    error::CoreError,
    extract::ArchiveFormat,
    materialize::{materialize, MaterializeOptions},
    validate::validate_tree,
};
use docsmith_dl::{download::fetch, host::Host};
use tracing::{error, info};

use crate::{
    error::OperationError,
    types::{FailedSync, SyncReport, SyncedSource},
};

/// Sync every configured source.
///
/// Each `(source, tag)` pair runs the full pipeline independently; a failing
/// pair is recorded in the report and the batch continues.
pub fn sync_all(config: &Config) -> SyncReport {
    sync_sources(config, &config.sources)
}

/// Sync a single source by name.
pub fn sync_source(config: &Config, name: &str) -> Result<SyncReport, OperationError> {
    let source = config
        .find_source(name)
        .ok_or_else(|| OperationError::SourceNotFound {
            name: name.to_string(),
        })?;

    Ok(sync_sources(config, std::slice::from_ref(source)))
}

fn sync_sources(config: &Config, sources: &[Source]) -> SyncReport {
    let dest_root = config.dest_path();
    let options = MaterializeOptions {
        copy_images: config.copy_images(),
    };

    let mut report = SyncReport::default();
    for source in sources {
        // The host is resolved once per source; an unrecognized or invalid
        // URL fails every tag of that source the same way.
        let host = match Host::resolve(&source.url) {
            Ok(host) => host,
            Err(err) => {
                error!(source = %source.name, %err, "cannot resolve repository host");
                for tag in &source.tags {
                    report.failed.push(FailedSync {
                        source: source.name.clone(),
                        tag: tag.clone(),
                        error: err.to_string(),
                    });
                }
                continue;
            }
        };

        for tag in &source.tags {
            info!(source = %source.name, %tag, "syncing");
            match sync_tag(host, source, tag, &dest_root, options) {
                Ok(dest) => {
                    info!(source = %source.name, %tag, dest = %dest.display(), "synced");
                    report.synced.push(SyncedSource {
                        source: source.name.clone(),
                        tag: tag.clone(),
                        dest,
                    });
                }
                Err(err) => {
                    error!(source = %source.name, %tag, %err, "sync failed");
                    report.failed.push(FailedSync {
                        source: source.name.clone(),
                        tag: tag.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
    }

    report
}

/// Run the pipeline for one `(source, tag)` pair: fetch the archive into a
/// scratch directory, extract, validate, materialize. The scratch directory
/// is removed when the guard drops, on success and on failure alike.
fn sync_tag(
    host: Host,
    source: &Source,
    tag: &str,
    dest_root: &Path,
    options: MaterializeOptions,
) -> Result<PathBuf, OperationError> {
    let request = host.download_request(&source.url, tag, source.token.as_deref())?;

    let working = tempfile::Builder::new().prefix("docsmith-").tempdir()?;
    let archive = fetch(&request, working.path())?;

    let format = resolve_format(&archive.path)?;
    format.extract(working.path(), &archive.path)?;

    if !validate_tree(working.path())? {
        return Err(CoreError::InvalidContent.into());
    }

    let dest = materialize(working.path(), dest_root, &source.name, options)?;
    Ok(dest)
}

/// Pick the archive format from the filename, falling back to sniffing the
/// leading bytes when the extension says nothing useful.
fn resolve_format(archive_path: &Path) -> Result<ArchiveFormat, OperationError> {
    if let Ok(format) = ArchiveFormat::from_path(archive_path) {
        return Ok(format);
    }

    let mut head = [0u8; 512];
    let mut file = File::open(archive_path)?;
    let read = file.read(&mut head)?;
    Ok(ArchiveFormat::from_bytes(&head[..read])?)
}
