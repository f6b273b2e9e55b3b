use serde::{Deserialize, Serialize};

use crate::core::prelude::*;

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum CoinColour {
    Red,
    Green,
    Blue,
    Yellow,
}

impl CoinColour {
    /// The entity tag the level uses for coins of this colour.
    pub fn tag(self) -> &'static str {
        match self {
            CoinColour::Red => "coin_red",
            CoinColour::Green => "coin_green",
            CoinColour::Blue => "coin_blue",
            CoinColour::Yellow => "coin_yellow",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CoinOutcome {
    Counted { collected: usize, required: usize },
    /// This coin completed the set.
    GoalReached,
    WrongColour { committed: CoinColour },
    /// The set was already complete; nothing changed.
    AlreadyComplete,
}

/// Tracks the colour the current attempt is committed to and how many of it are collected.
///
/// The first coin picked up commits the attempt to its colour; from then on only that colour
/// counts, and any other colour is fatal.
#[derive(Clone, Debug, Default)]
pub struct CoinScoring {
    committed: Option<CoinColour>,
    collected: usize,
    required: usize,
}

impl CoinScoring {
    pub fn committed_colour(&self) -> Option<CoinColour> { self.committed }
    pub fn collected(&self) -> usize { self.collected }
    pub fn required(&self) -> usize { self.required }

    pub fn is_goal_met(&self) -> bool {
        self.committed.is_some() && self.collected == self.required
    }

    /// Records a pickup of `colour`. On the first pickup, counts the coins of that colour in
    /// `level`; the coin being picked up is expected to still be in the level at that point.
    pub fn collect(&mut self, colour: CoinColour, level: &dyn LevelHost) -> CoinOutcome {
        let committed = match self.committed {
            Some(committed) => committed,
            None => {
                let count = level.count_entities_tagged(colour.tag());
                if count == 0 {
                    warn!("level reports no {colour:?} coins while one is being collected");
                }
                self.required = count.max(1);
                self.committed = Some(colour);
                info!("committed to {colour:?} coins, {} to collect", self.required);
                colour
            }
        };
        if colour != committed {
            return CoinOutcome::WrongColour { committed };
        }
        if self.is_goal_met() {
            return CoinOutcome::AlreadyComplete;
        }
        self.collected += 1;
        check_le!(self.collected, self.required);
        if self.collected == self.required {
            CoinOutcome::GoalReached
        } else {
            CoinOutcome::Counted { collected: self.collected, required: self.required }
        }
    }
}
