//! Form POST with optional JSON reply decoding.

use crate::error::{Error, Result};
use crate::types::Params;
use crate::utils::{encode_form, signals_upgrade};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use super::TrainingClient;

/// Content type of every form POST
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

impl TrainingClient {
    /// POST `params` as a form to `url` and decode the JSON reply
    ///
    /// The whole reply body is read before returning. If it does not decode as
    /// `T` and contains the server's upgrade notice, the error is
    /// [`Error::IncompatibleClient`]; otherwise the body is logged and
    /// [`Error::Decode`] is returned.
    pub async fn post_params<T>(&self, url: &str, params: Option<&Params>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.post_form(url, params).await?;
        decode_reply(url, &body)
    }

    /// POST `params` as a form to `url`, reading and discarding the reply
    pub async fn post_params_ignore_reply(&self, url: &str, params: Option<&Params>) -> Result<()> {
        self.post_form(url, params).await.map(|_| ())
    }

    /// Send the form and return the full reply body
    async fn post_form(&self, url: &str, params: Option<&Params>) -> Result<Vec<u8>> {
        let encoded = params.map(encode_form).unwrap_or_default();

        tracing::debug!(url = %url, body_len = encoded.len(), "posting form");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(encoded)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "server replied with non-success status");
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

/// Decode a reply body, classifying failures
pub(crate) fn decode_reply<T>(url: &str, body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|source| {
        if signals_upgrade(body) {
            tracing::error!(
                url = %url,
                "the client version you are using is not accepted by the server"
            );
            return Error::IncompatibleClient {
                url: url.to_string(),
            };
        }

        tracing::warn!(
            url = %url,
            body = %String::from_utf8_lossy(body),
            error = %source,
            "bad JSON from server"
        );
        Error::Decode {
            url: url.to_string(),
            source,
        }
    })
}
