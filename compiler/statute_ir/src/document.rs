//! The parsed document aggregate.

use crate::block::Block;
use crate::division::Division;
use serde::{Deserialize, Serialize};

/// Everything the markup builder needs: front matter, the body hierarchy,
/// schedules, and closing material, in document order.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    pub header: Vec<Block>,
    pub body: Vec<Division>,
    pub schedules: Vec<Division>,
    pub conclusions: Vec<Block>,
}

impl Document {
    /// Body divisions followed by schedules.
    pub fn divisions(&self) -> impl Iterator<Item = &Division> {
        self.body.iter().chain(&self.schedules)
    }
}
