use super::test_helpers::*;
use super::*;
use crate::error::Error;
use crate::types::{MatchResult, Params};

mod upload;
