use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};

/// The clue sizes the hint service ranks hints for, largest first.
pub const CLUE_SIZES: [u8; 3] = [4, 3, 2];

/// Request body for the hint service.
///
/// The field names are part of the wire format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintRequest {
    /// Words of the team hints are generated for.
    pub my_words: Vec<String>,
    /// Words of the other team.
    pub opponent_words: Vec<String>,
    pub neutral_words: Vec<String>,
    /// Empty if no cell is the assassin.
    pub assassin_word: String,
}

/// A candidate clue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    pub hint: String,
    /// Higher is better. There is no fixed range.
    pub score: f64,
    /// The words of the requesting team this clue covers.
    pub words: Vec<String>,
}

/// Ranked hints, grouped by how many words a clue covers.
///
/// In JSON, this is an object with the keys `"2"`, `"3"` and `"4"`. Missing
/// keys are read as having no hints, keys that are not a number are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HintResult {
    by_size: BTreeMap<u8, Vec<Hint>>,
}

impl HintResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hints covering `size` words, best first. Empty if there are none.
    pub fn hints(&self, size: u8) -> &[Hint] {
        self.by_size.get(&size).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, size: u8, hints: Vec<Hint>) {
        self.by_size.insert(size, hints);
    }

    /// Total number of hints over all sizes.
    pub fn len(&self) -> usize {
        self.by_size.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for HintResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let by_key: BTreeMap<String, &Vec<Hint>> = self
            .by_size
            .iter()
            .map(|(size, hints)| (size.to_string(), hints))
            .collect();
        by_key.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HintResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let by_key = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut result = HintResult::new();
        for (key, value) in by_key {
            // Only the canonical spelling names a size, so " 2" or "02" can't
            // shadow the hints under "2"
            let size = match key.parse::<u8>() {
                Ok(size) if size.to_string() == key => size,
                _ => continue,
            };
            let hints = Vec::<Hint>::deserialize(value).map_err(serde::de::Error::custom)?;
            result.insert(size, hints);
        }
        Ok(result)
    }
}

/// The body the hint service sends along with a 400 status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceError {
    pub error: String,
}
