use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BallKind {
    Standard,
    Great,
    Ultra,
}

impl BallKind {
    /// Multiplier applied to the capture rate.
    pub fn bonus(self) -> f64 {
        match self {
            BallKind::Standard => 1.0,
            BallKind::Great => 1.5,
            BallKind::Ultra => 2.0,
        }
    }
}

impl fmt::Display for BallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallKind::Standard => write!(f, "Ball"),
            BallKind::Great => write!(f, "Great Ball"),
            BallKind::Ultra => write!(f, "Ultra Ball"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Item {
    Potion,
    Ball(BallKind),
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Potion => write!(f, "Potion"),
            Item::Ball(kind) => write!(f, "{}", kind),
        }
    }
}

/// Item counts. Items with a zero count are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<Item, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: Item) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: Item, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.items.entry(item).or_insert(0) += quantity;
    }

    /// Take one of `item`. Returns false (and changes nothing) if none is held.
    pub fn consume(&mut self, item: Item) -> bool {
        match self.items.get_mut(&item) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.items.remove(&item);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Item, u32)> + '_ {
        self.items.iter().map(|(item, count)| (*item, *count))
    }
}
