//! Token metadata lookups memoized for the lifetime of one report.
//!
//! A resolver is created by each `generate_report` call and dropped with it,
//! so nothing learned while building one statement is visible to another.
//! Misses are not memoized: a token indexed while the report runs can still
//! be picked up by a later row.

use std::collections::HashMap;

use super::error::StatementError;
use super::sources::{AssetRef, TokenMetadata, TokenSource};

pub struct TokenResolver<'a> {
    source: &'a dyn TokenSource,
    cache: HashMap<AssetRef, TokenMetadata>,
}

impl<'a> TokenResolver<'a> {
    pub fn new(source: &'a dyn TokenSource) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Returns the metadata for `asset`, querying the store on first use only
    pub async fn resolve(&mut self, asset: AssetRef) -> Result<Option<TokenMetadata>, StatementError> {
        if let Some(metadata) = self.cache.get(&asset) {
            return Ok(Some(metadata.clone()));
        }

        match self.source.find_token(asset).await? {
            Some(metadata) => {
                self.cache.insert(asset, metadata.clone());
                Ok(Some(metadata))
            }
            None => Ok(None),
        }
    }

    /// Number of memoized tokens
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
