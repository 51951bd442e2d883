//! Work assignment and match result calls.

use crate::error::{Error, Result};
use crate::types::{MatchResult, NextGameResponse, Params};

use super::TrainingClient;

impl TrainingClient {
    /// Ask the server for the next unit of work
    ///
    /// POSTs `params` to `/next_game`. An assignment without a network hash is
    /// rejected with [`Error::EmptyHash`] even when the exchange itself worked;
    /// servers answer that way when they have nothing usable to hand out.
    pub async fn next_game(&self, params: &Params) -> Result<NextGameResponse> {
        let url = self.config.endpoint("next_game");
        let resp: NextGameResponse = self.post_params(&url, Some(params)).await?;

        if resp.sha.is_empty() {
            tracing::warn!(url = %url, kind = %resp.kind, "server gave back empty hash");
            return Err(Error::EmptyHash);
        }

        tracing::debug!(
            kind = %resp.kind,
            training_id = resp.training_id,
            network_id = resp.network_id,
            sha = %resp.sha,
            "received work assignment"
        );
        Ok(resp)
    }

    /// Report the outcome of a pair of match games
    ///
    /// The form sent to `/match_result` is `params` plus the six result fields
    /// from `result`. `params` is not modified. The reply body is ignored.
    pub async fn upload_match_result(&self, result: &MatchResult, params: &Params) -> Result<()> {
        let url = self.config.endpoint("match_result");
        let form = result.to_params(params);

        tracing::debug!(
            url = %url,
            match_game_id1 = result.match_game_id1,
            match_game_id2 = result.match_game_id2,
            "uploading match result"
        );
        self.post_params_ignore_reply(&url, Some(&form)).await
    }
}
