// SPDX-License-Identifier: MPL-2.0
//! Handing assets to the rest of the desktop: system opener, save dialog.

use crate::error::{Error, Result};
use crate::media::{self, extensions};
use crate::media::source::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Opens `location` with the platform's default handler.
pub async fn open_externally(location: String) -> Result<()> {
    let target = match Location::parse(&location) {
        Location::Remote(url) => url.to_string(),
        Location::Local(path) => {
            if !path.exists() {
                return Err(Error::Io(format!("{} not found", path.display())));
            }
            path.display().to_string()
        }
    };
    opener(&target).spawn().map(|_| ()).map_err(Error::from)
}

#[cfg(target_os = "windows")]
fn opener(target: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", target]);
    command
}

#[cfg(target_os = "macos")]
fn opener(target: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener(target: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}

/// File name offered in the save dialog for `location`.
#[must_use]
pub fn suggested_file_name(location: &str) -> String {
    let name = match Location::parse(location) {
        Location::Remote(url) => url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .unwrap_or_default()
            .to_string(),
        Location::Local(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    if name.is_empty() {
        "download".to_string()
    } else {
        name
    }
}

/// Asks where to save a download.
pub async fn pick_download_target(suggested: String) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_file_name(suggested)
        .save_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

/// Asks for a manifest to open.
pub async fn pick_manifest(last_directory: Option<PathBuf>) -> Option<PathBuf> {
    let mut dialog =
        rfd::AsyncFileDialog::new().add_filter("Gallery", extensions::MANIFEST_EXTENSIONS);
    if let Some(dir) = last_directory.filter(|dir| dir.exists()) {
        dialog = dialog.set_directory(&dir);
    }
    dialog.pick_file().await.map(|handle| handle.path().to_path_buf())
}

/// Copies the asset at `source` to `target`.
pub async fn download(source: String, target: PathBuf) -> Result<PathBuf> {
    let bytes = media::fetch_bytes(source).await?;
    write_file(&target, &bytes).await?;
    Ok(target)
}

async fn write_file(target: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(target, bytes).await.map_err(Error::from)
}
