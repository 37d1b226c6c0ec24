//! Match intensity derived from the alive ratio.
//!
//! The audio layer reacts to these levels; the engine only tracks which
//! thresholds have been crossed.

use serde::{Serialize, Deserialize};

use crate::config::game::{FRANTIC_RATIO, TENSE_RATIO};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Intensity {
    Calm,
    Tense,
    Frantic,
}

/// One-way tracker: each level is raised at most once per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityTracker {
    level: Intensity,
}

impl Default for IntensityTracker {
    fn default() -> Self {
        Self { level: Intensity::Calm }
    }
}

impl IntensityTracker {
    pub fn level(&self) -> Intensity {
        self.level
    }

    /// Feed the latest alive ratio; returns the levels newly crossed, in order.
    pub fn observe(&mut self, alive_ratio: f32) -> Vec<Intensity> {
        let mut raised = Vec::new();
        let thresholds = [(Intensity::Tense, TENSE_RATIO), (Intensity::Frantic, FRANTIC_RATIO)];
        for (level, threshold) in thresholds {
            if self.level < level && alive_ratio < threshold {
                self.level = level;
                raised.push(level);
            }
        }
        raised
    }
}
