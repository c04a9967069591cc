//! Writes downloaded episodes to disk.

use anyhow::Context;
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tokio::{fs::File, io::AsyncWriteExt};
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

use crate::{episode::Episode, errors::DownloadError};

/// How an episode is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// A folder of numbered images.
    Raw,
    /// A single `.cbz` (zip) archive of numbered images.
    #[default]
    Archive,
}

/// Where and how episodes are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Folder or archive.
    pub mode: Mode,
    /// Root directory; each series gets its own folder inside.
    pub output: PathBuf,
    /// Prefix names with the zero padded episode number, e.g. `#007_`.
    pub numbered: bool,
}

impl Options {
    /// `{output}/{title}/{title}_[#{number:03}_]{name}`, without any extension.
    pub fn destination(&self, episode: &Episode) -> PathBuf {
        let numbering = if self.numbered {
            format!("#{:03}_", episode.number())
        } else {
            String::new()
        };

        self.output
            .join(episode.title())
            .join(format!("{}_{numbering}{}", episode.title(), episode.name()))
    }
}

/// Name of the `index`-th page inside the folder or archive.
fn page_name(index: usize) -> String {
    format!("{index:02}.jpg")
}

/// Saves `pages` of `episode` and returns the path written.
///
/// Directories are created as needed. Existing output is overwritten.
///
/// # Errors
///
/// Returns [`DownloadError`] if a directory, page or archive could not be written.
pub async fn save(
    episode: &Episode,
    pages: &[Vec<u8>],
    options: &Options,
) -> Result<PathBuf, DownloadError> {
    let destination = options.destination(episode);

    match options.mode {
        Mode::Raw => {
            save_multiple(&destination, pages).await?;
            Ok(destination)
        }
        Mode::Archive => {
            let mut archive = destination.into_os_string();
            archive.push(".cbz");
            let archive = PathBuf::from(archive);

            save_archive(&archive, pages).await?;
            Ok(archive)
        }
    }
}

async fn save_multiple(path: &Path, pages: &[Vec<u8>]) -> Result<(), DownloadError> {
    tokio::fs::create_dir_all(path).await?;

    for (index, bytes) in pages.iter().enumerate() {
        let path = path.join(page_name(index));

        let mut file = File::create(&path)
            .await
            .context("failed to create page file")?;

        file.write_all(bytes).await?;
        file.flush().await?;
    }

    Ok(())
}

async fn save_archive(path: &Path, pages: &[Vec<u8>]) -> Result<(), DownloadError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let path = path.to_path_buf();
    let pages = pages.to_vec();

    tokio::task::spawn_blocking(move || write_zip(&path, &pages))
        .await
        .context("Failed `spawn_blocking`")?
}

fn write_zip(path: &Path, pages: &[Vec<u8>]) -> Result<(), DownloadError> {
    let file = std::fs::File::create(path).context("failed to create archive file")?;

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (index, bytes) in pages.iter().enumerate() {
        zip.start_file(page_name(index), options)?;
        zip.write_all(bytes)?;
    }

    zip.finish()?;

    Ok(())
}
