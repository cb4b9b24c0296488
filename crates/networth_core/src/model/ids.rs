//! Identifiers for projection items
//!
//! Assets, liabilities and cash-flow items each live in their own id space,
//! so an `ItemId` is only meaningful together with the kind of item it names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an asset, liability or cash-flow item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
