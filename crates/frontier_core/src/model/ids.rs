//! Identifiers for entities of a frontier run
//!
//! Each entity type has its own ID type so asset columns and generated
//! portfolios cannot be mixed up.

use serde::{Deserialize, Serialize};

/// Column index of an asset class within the returns table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u16);

impl AssetId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Generation index of a portfolio within a sampling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortfolioId(pub u32);

impl PortfolioId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
