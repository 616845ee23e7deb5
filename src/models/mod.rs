pub mod card;
pub mod chat;
pub mod enums;
pub mod set;
pub mod summary;

pub use card::*;
pub use chat::*;
pub use enums::*;
pub use set::*;
pub use summary::*;

use std::collections::HashMap;

/// Card id -> owned copies. A missing entry means zero.
pub type Collection = HashMap<String, u32>;

/// Card id -> wishlisted. Independent of ownership.
pub type Wishlist = HashMap<String, bool>;
