use std::collections::HashSet;
use std::path::Path;

/// The pool bundled with this crate.
pub const EMBEDDED_WORD_POOL: &str = include_str!("resources/word_pool.txt");

/// An ordered, read-only list of distinct candidate words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Parses one word per line.
    ///
    /// Surrounding whitespace is trimmed, empty lines and lines starting
    /// with `#` are skipped, and only the first occurrence of a word is kept.
    pub fn parse(data: &str) -> Self {
        Self::from_words(data.lines().filter(|line| !line.trim_start().starts_with('#')))
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_string())
            .filter(|word| !word.is_empty() && seen.insert(word.clone()))
            .collect();
        Self { words }
    }

    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_WORD_POOL)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&data))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
