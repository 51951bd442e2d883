//! Core types for training-client

use crate::error::{Error, Result};
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Form parameters sent with a request
///
/// Inserting an existing key replaces its value.
pub type Params = HashMap<String, String>;

/// Assignment kind for match games
pub const KIND_MATCH: &str = "match";

/// Assignment kind for training games
pub const KIND_TRAIN: &str = "train";

/// A unit of work handed out by the task server
///
/// Serialized with the server's PascalCase JSON keys. Decoding matches keys
/// case-insensitively (`Sha`, `sha` and `SHA` all name the hash); when a key
/// appears more than once the last one wins. Missing or `null` fields take
/// their default value, and unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NextGameResponse {
    /// Assignment kind ("train" or "match")
    #[serde(rename = "Type")]
    pub kind: String,
    /// Training run identifier
    pub training_id: u64,
    /// Network identifier
    pub network_id: u64,
    /// Content hash of the current network
    pub sha: String,
    /// Content hash of the candidate network (match games)
    pub candidate_sha: String,
    /// Serialized engine parameters
    pub params: String,
    /// Whether the candidate plays the other side in the first game
    pub flip1: bool,
    /// First match game identifier
    pub match_game_id1: u64,
    /// Second match game identifier
    pub match_game_id2: u64,
    /// How long to keep training data, as sent by the server
    pub keep_time: String,
    /// Opening book location
    pub book_url: String,
    /// Opening book content hash
    pub book_sha: String,
}

impl<'de> Deserialize<'de> for NextGameResponse {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NextGameVisitor)
    }
}

struct NextGameVisitor;

impl<'de> Visitor<'de> for NextGameVisitor {
    type Value = NextGameResponse;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a work assignment object")
    }

    // A bare `null` decodes to an empty assignment
    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(NextGameResponse::default())
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // Keys are folded to lowercase in document order, so later duplicates win
        let mut fields: HashMap<String, Value> = HashMap::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            fields.insert(key.to_lowercase(), value);
        }

        Ok(NextGameResponse {
            kind: take_field(&mut fields, "type")?,
            training_id: take_field(&mut fields, "trainingid")?,
            network_id: take_field(&mut fields, "networkid")?,
            sha: take_field(&mut fields, "sha")?,
            candidate_sha: take_field(&mut fields, "candidatesha")?,
            params: take_field(&mut fields, "params")?,
            flip1: take_field(&mut fields, "flip1")?,
            match_game_id1: take_field(&mut fields, "matchgameid1")?,
            match_game_id2: take_field(&mut fields, "matchgameid2")?,
            keep_time: take_field(&mut fields, "keeptime")?,
            book_url: take_field(&mut fields, "bookurl")?,
            book_sha: take_field(&mut fields, "booksha")?,
        })
    }
}

/// Decode one lowercased field, defaulting when it is absent or `null`
fn take_field<T, E>(fields: &mut HashMap<String, Value>, name: &str) -> std::result::Result<T, E>
where
    T: DeserializeOwned + Default,
    E: de::Error,
{
    match fields.remove(name) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| E::custom(format!("field {name:?}: {e}"))),
    }
}

impl NextGameResponse {
    /// True when this assignment is a match between two networks
    pub fn is_match(&self) -> bool {
        self.kind == KIND_MATCH
    }
}

/// Outcome of a pair of match games, reported to `/match_result`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Identifier of the first game
    pub match_game_id1: u64,
    /// Result of the first game
    pub result1: i32,
    /// Game record of the first game
    pub pgn1: String,
    /// Identifier of the second game
    pub match_game_id2: u64,
    /// Result of the second game
    pub result2: i32,
    /// Game record of the second game
    pub pgn2: String,
}

impl MatchResult {
    /// Build the form for this result on top of `base`
    ///
    /// Returns a copy of `base` with the six result keys set. Keys already in
    /// `base` with the same names are overwritten in the copy; `base` itself is
    /// left alone.
    pub fn to_params(&self, base: &Params) -> Params {
        let mut params = base.clone();
        params.insert(
            "match_game_id1".to_string(),
            self.match_game_id1.to_string(),
        );
        params.insert("result1".to_string(), self.result1.to_string());
        params.insert("pgn1".to_string(), self.pgn1.clone());
        params.insert(
            "match_game_id2".to_string(),
            self.match_game_id2.to_string(),
        );
        params.insert("result2".to_string(), self.result2.to_string());
        params.insert("pgn2".to_string(), self.pgn2.clone());
        params
    }
}

/// Where a network download goes and which network it is
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadTarget {
    path: PathBuf,
    sha: String,
}

impl DownloadTarget {
    /// Create a target, rejecting hashes that cannot name a file
    ///
    /// The hash is used as a URL suffix and as part of a temp file name, so it
    /// must be non-empty and ASCII alphanumeric.
    pub fn new(path: impl Into<PathBuf>, sha: impl Into<String>) -> Result<Self> {
        let sha = sha.into();
        if sha.is_empty() {
            return Err(Error::EmptyHash);
        }
        if !sha.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidHash { sha });
        }
        Ok(Self {
            path: path.into(),
            sha,
        })
    }

    /// Final destination of the download
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content hash of the network
    pub fn sha(&self) -> &str {
        &self.sha
    }

    /// Remote location: the prefix with the hash appended
    pub fn url(&self, uri_prefix: &str) -> String {
        format!("{}{}", uri_prefix, self.sha)
    }

    /// Prefix of the temp file staged next to the destination
    pub fn temp_prefix(&self) -> String {
        format!("{}_tmp", self.sha)
    }

    /// Directory the temp file is created in
    pub fn staging_dir(&self) -> PathBuf {
        crate::utils::staging_dir(&self.path)
    }
}
