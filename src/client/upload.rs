//! Multipart file upload request building.

use crate::error::{Error, Result};
use crate::types::Params;
use crate::utils::upload_file_name;
use reqwest::multipart::{Form, Part};
use std::path::Path;

use super::TrainingClient;

impl TrainingClient {
    /// Build an unsent multipart POST uploading the file at `path`
    ///
    /// The body holds one file part named `param_name` (with the file's base
    /// name as filename) followed by one text part per entry in `params`, in
    /// key order. The `Content-Type` header carries the multipart boundary.
    ///
    /// Nothing is sent; pass the request to [`TrainingClient::execute`] or to
    /// the underlying HTTP client.
    pub async fn build_upload_request(
        &self,
        url: &str,
        params: &Params,
        param_name: &str,
        path: &Path,
    ) -> Result<reqwest::Request> {
        // The file is read fully and its handle closed before the request exists
        let contents = tokio::fs::read(path)
            .await
            .map_err(|source| Error::UploadFile {
                path: path.to_path_buf(),
                source,
            })?;

        let file_name = upload_file_name(path);
        tracing::debug!(
            url = %url,
            file = %file_name,
            size = contents.len(),
            "building upload request"
        );

        let mut form = Form::new().part(
            param_name.to_string(),
            Part::bytes(contents).file_name(file_name),
        );

        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();
        for key in keys {
            form = form.text(key.clone(), params[key].clone());
        }

        let request = self.http.post(url).multipart(form).build()?;
        Ok(request)
    }
}
