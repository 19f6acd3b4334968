use std::collections::HashMap;

use crate::domain::SignRecord;

pub const DEFAULT_SIGN_GLOSS: &str = "HELLO";

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("catalogue is empty")]
    Empty,
    #[error("duplicate gloss: {0}")]
    DuplicateGloss(String),
    #[error("default sign {0} is not in the catalogue")]
    MissingDefaultSign(String),
    #[error("catalogue source unreadable: {0}")]
    Source(String),
}

/// Read-only, ordered set of known signs with gloss and id lookups.
#[derive(Debug)]
pub struct SignCatalogue {
    records: Vec<SignRecord>,
    by_gloss: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
    default_index: usize,
}

impl SignCatalogue {
    pub fn new(records: Vec<SignRecord>, default_gloss: &str) -> Result<Self, CatalogueError> {
        if records.is_empty() {
            return Err(CatalogueError::Empty);
        }

        let mut by_gloss = HashMap::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let key = record.gloss.to_uppercase();
            if by_gloss.insert(key, index).is_some() {
                return Err(CatalogueError::DuplicateGloss(record.gloss.clone()));
            }
            by_id.entry(record.id.to_lowercase()).or_insert(index);
        }

        let default_index = *by_gloss
            .get(&default_gloss.to_uppercase())
            .ok_or_else(|| CatalogueError::MissingDefaultSign(default_gloss.to_string()))?;

        tracing::info!(
            signs = records.len(),
            default_gloss = %records[default_index].gloss,
            "Sign catalogue loaded"
        );

        Ok(Self {
            records,
            by_gloss,
            by_id,
            default_index,
        })
    }

    /// Case-insensitive gloss match, then the lowercased gloss as a record id.
    pub fn get_by_gloss(&self, gloss: &str) -> Option<&SignRecord> {
        self.by_gloss
            .get(&gloss.to_uppercase())
            .or_else(|| self.by_id.get(&gloss.to_lowercase()))
            .map(|&index| &self.records[index])
    }

    pub fn default_sign(&self) -> &SignRecord {
        &self.records[self.default_index]
    }

    pub fn records(&self) -> &[SignRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
