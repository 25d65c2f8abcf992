pub mod card;
pub mod color;
pub mod deck;
pub mod page;
pub mod snapshot;

pub use card::*;
pub use color::*;
pub use deck::*;
pub use page::*;
pub use snapshot::*;
