mod error;
pub mod recipe;
pub mod user;
pub mod validation;

pub use error::*;

#[doc(hidden)]
pub use anyhow as __anyhow;
pub use recipe::*;
pub use user::User;

/// Offset/limit window used by every paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    pub fn first(limit: u32) -> Self {
        Self { offset: 0, limit }
    }

    pub fn next(&self) -> Self {
        Self {
            offset: self.offset + self.limit,
            limit: self.limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(20)
    }
}
