use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_krec_copies: f64,
    pub min_trec_copies: f64,
    pub max_krec_delta: f64,
    pub max_trec_delta: f64,
}

impl Thresholds {
    pub fn default_v1() -> Self {
        Self {
            min_krec_copies: 10_000.0,
            min_trec_copies: 10_000.0,
            max_krec_delta: 11.5,
            max_trec_delta: 12.0,
        }
    }

    /// Sets a threshold by its parameter-sheet key. Returns false for unknown keys.
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        match key {
            "min_krec_copies" => self.min_krec_copies = value,
            "min_trec_copies" => self.min_trec_copies = value,
            "max_krec_delta" => self.max_krec_delta = value,
            "max_trec_delta" => self.max_trec_delta = value,
            _ => return false,
        }
        true
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::default_v1()
    }
}
