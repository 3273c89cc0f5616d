use crate::error::{GameError, Result};
use crate::language::{Dataset, Language};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Configuration for word selection
#[derive(Debug, Clone, PartialEq)]
pub struct WordGenConfig {
    pub dataset: Dataset,
    /// Fixed word to show every round instead of a random pick
    pub word_override: Option<String>,
}

impl Default for WordGenConfig {
    fn default() -> Self {
        Self {
            dataset: Dataset::NounsTh,
            word_override: None,
        }
    }
}

/// Hands out one word per round
pub trait WordSource {
    fn pick_word(&mut self) -> Result<String>;
}

impl<F> WordSource for F
where
    F: FnMut() -> String,
{
    fn pick_word(&mut self) -> Result<String> {
        Ok(self())
    }
}

/// Picks words from a bundled dataset, or repeats the configured override
pub struct WordGenerator {
    config: WordGenConfig,
    language: Option<Language>,
    rng: StdRng,
}

impl WordGenerator {
    pub fn new(config: WordGenConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: WordGenConfig, rng: StdRng) -> Self {
        Self {
            config,
            language: None,
            rng,
        }
    }

    pub fn config(&self) -> &WordGenConfig {
        &self.config
    }

    fn language(&mut self) -> Result<&Language> {
        if self.language.is_none() {
            let lang = Language::load(self.config.dataset)?;
            debug!("words: loaded {} ({} words)", lang.name, lang.words.len());
            self.language = Some(lang);
        }
        self.language
            .as_ref()
            .ok_or_else(|| GameError::MissingDataset(self.config.dataset.to_string()))
    }
}

impl WordSource for WordGenerator {
    fn pick_word(&mut self) -> Result<String> {
        if let Some(ref word) = self.config.word_override {
            let word = word.trim();
            if word.is_empty() {
                return Err(GameError::EmptyWord);
            }
            return Ok(word.to_string());
        }

        self.language()?;
        let WordGenerator { language, rng, .. } = self;
        language
            .as_ref()
            .and_then(|lang| lang.random_word(rng))
            .map(str::to_string)
            .ok_or(GameError::EmptyWord)
    }
}
