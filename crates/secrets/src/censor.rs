use std::collections::BTreeSet;

use base64::{Engine, engine::general_purpose::STANDARD};
use regex::{Captures, Regex, RegexBuilder, bytes};

const MASK: char = '*';

// The default regex size limit is exceeded by a few hundred long tokens.
const SIZE_LIMIT: usize = 256 << 20;

/// Masks every literal occurrence of a fixed set of secrets.
///
/// Each secret is also censored in its standard base64 encoding. Matches are
/// replaced with `*`, one per character.
#[derive(Debug, Clone, Default)]
pub struct Censorer {
    text: Option<Regex>,
    bytes: Option<bytes::Regex>,
}

impl Censorer {
    pub fn new<'a>(secrets: impl IntoIterator<Item = &'a str>) -> Result<Self, regex::Error> {
        let mut candidates = BTreeSet::new();
        for secret in secrets.into_iter().filter(|s| !s.is_empty()) {
            candidates.insert(secret.to_string());
            candidates.insert(STANDARD.encode(secret));
        }
        if candidates.is_empty() {
            return Ok(Self::default());
        }
        let mut candidates: Vec<String> = candidates.into_iter().collect();
        // Alternation is leftmost-first: put longer secrets first so a secret
        // that contains another one is masked in full.
        candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let pattern =
            candidates.iter().map(|s| regex::escape(s)).collect::<Vec<_>>().join("|");
        let text = RegexBuilder::new(&pattern).size_limit(SIZE_LIMIT).build()?;
        let bytes = bytes::RegexBuilder::new(&pattern).size_limit(SIZE_LIMIT).build()?;
        Ok(Self { text: Some(text), bytes: Some(bytes) })
    }

    pub fn is_empty(&self) -> bool { self.text.is_none() }

    pub fn censor(&self, text: &str) -> String {
        match &self.text {
            Some(re) => re
                .replace_all(text, |caps: &Captures| {
                    std::iter::repeat_n(MASK, caps[0].chars().count()).collect::<String>()
                })
                .into_owned(),
            None => text.to_string(),
        }
    }

    /// Censor raw bytes. Matches are masked byte for byte.
    pub fn censor_bytes(&self, data: &[u8]) -> Vec<u8> {
        match &self.bytes {
            Some(re) => re
                .replace_all(data, |caps: &bytes::Captures| vec![MASK as u8; caps[0].len()])
                .into_owned(),
            None => data.to_vec(),
        }
    }
}
