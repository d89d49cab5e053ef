//! Commonly used utilities like handles, pools and hash containers.

#[macro_use]
pub mod handle;
pub mod color;
pub mod handle_pool;
pub mod hash;

pub mod prelude {
    pub use super::color::Color;
    pub use super::handle::{Handle, HandleIndex, HandleLike};
    pub use super::handle_pool::HandlePool;
    pub use super::hash::{FastHashMap, FastHashSet};
}
