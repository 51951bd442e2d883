//! Atomic network file downloads.
//!
//! A download is streamed into a temp file created beside the destination and
//! then renamed over it, so the destination never holds a partial file.

use crate::error::{Error, Result};
use crate::types::DownloadTarget;
use futures::TryStreamExt;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tokio_util::io::StreamReader;

use super::TrainingClient;

impl TrainingClient {
    /// Download the network `sha` from `uri_prefix` to `network_path`
    ///
    /// Fetches `uri_prefix + sha`. A status of 400 or above is an error and
    /// nothing is written. Returns the number of bytes published.
    pub async fn download_network(
        &self,
        uri_prefix: &str,
        network_path: &Path,
        sha: &str,
    ) -> Result<u64> {
        let target = DownloadTarget::new(network_path, sha)?;
        let url = target.url(uri_prefix);

        tracing::debug!(url = %url, path = ?network_path, "downloading network");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            tracing::warn!(url = %url, status = %status, "network server gave error status");
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = StreamReader::new(response.bytes_stream().map_err(std::io::Error::other));
        tokio::pin!(body);
        let written = publish_atomically(&mut body, &target).await?;

        tracing::info!(sha = %sha, path = ?network_path, bytes = written, "network downloaded");
        Ok(written)
    }
}

/// Copy `reader` into a temp file next to the target, then rename it into place
///
/// The temp file never outlives the call: on success it has become the
/// destination, and on any failure it is gone and the destination is untouched.
pub(crate) async fn publish_atomically<R>(reader: &mut R, target: &DownloadTarget) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let prefix = target.temp_prefix();
    let temp = tempfile::Builder::new()
        .prefix(&prefix)
        .tempfile_in(target.staging_dir())?;

    let copied = copy_to_file(reader, temp.as_file()).await;

    let written = match copied {
        Ok(written) => written,
        Err(e) => {
            if let Err(cleanup) = temp.close() {
                tracing::warn!(error = %cleanup, "failed to remove temp file");
            }
            return Err(e);
        }
    };

    // PersistError hands the temp file back; dropping it removes the file
    temp.persist(target.path()).map_err(|e| Error::Io(e.error))?;
    Ok(written)
}

/// Copy everything from `reader` into `file`, flushed and synced to disk
async fn copy_to_file<R>(reader: &mut R, file: &std::fs::File) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut out = tokio::fs::File::from_std(file.try_clone()?);
    let written = tokio::io::copy(reader, &mut out).await?;
    out.flush().await?;
    out.sync_all().await?;
    Ok(written)
}
