use std::{
    collections::BTreeSet,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{SecretsError, censor::Censorer};

/// A censor whose list of secrets grows while the program runs, for secrets
/// that are only discovered after startup (read from the environment or from
/// mounted files).
///
/// The secret set and the censorer built from it are swapped together under
/// one lock. Readers clone the current censorer out of the lock, so a
/// redaction always uses a censorer built from a complete set.
#[derive(Debug, Default)]
pub struct DynamicCensor {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    secrets: BTreeSet<String>,
    censorer: Arc<Censorer>,
}

impl DynamicCensor {
    pub fn new() -> Self { Self::default() }

    /// Add one or more secrets to the censor list. Empty strings are ignored.
    ///
    /// When the set changes the censorer is rebuilt from the full set. If
    /// that fails, neither the set nor the censorer is modified.
    pub fn add_secrets<I, S>(&self, secrets: I) -> Result<(), SecretsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let added: Vec<String> = secrets
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.is_empty() && !state.secrets.contains(s))
            .collect();
        if added.is_empty() {
            return Ok(());
        }
        let mut secrets = state.secrets.clone();
        secrets.extend(added);
        let censorer = Censorer::new(secrets.iter().map(String::as_str))?;
        tracing::debug!(count = secrets.len(), "Refreshed censored secrets");
        *state = State { secrets, censorer: Arc::new(censorer) };
        Ok(())
    }

    /// The censorer for the current set of secrets.
    pub fn censorer(&self) -> Arc<Censorer> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).censorer.clone()
    }

    pub fn redact(&self, text: &str) -> String { self.censorer().censor(text) }

    pub fn redact_bytes(&self, data: &[u8]) -> Vec<u8> { self.censorer().censor_bytes(data) }

    pub fn secrets(&self) -> BTreeSet<String> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).secrets.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).secrets.len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}
