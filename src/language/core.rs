use crate::error::{GameError, Result};
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::from_str;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Word lists bundled into the binary
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Dataset {
    NounsTh,
    NounsEn,
}

impl Dataset {
    pub fn file_name(&self) -> String {
        format!("{self}.json")
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(dataset: Dataset) -> Result<Self> {
        let mut lang = read_language_from_file(&dataset.file_name())?;

        lang.words = lang
            .words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        if lang.words.is_empty() {
            return Err(GameError::EmptyDataset(dataset.to_string()));
        }
        Ok(lang)
    }

    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| GameError::MissingDataset(file_name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| GameError::MissingDataset(file_name.to_string()))?;

    from_str(file_as_str).map_err(|source| GameError::MalformedDataset {
        name: file_name.to_string(),
        source,
    })
}
