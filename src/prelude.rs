//! Convenient imports for consumers of nes-cartridge
//!
//! Pull in everything commonly needed in one line:
//! ```rust
//! use nes_cartridge::prelude::*;
//! ```

pub use crate::cartridge::header::{Header, Mirroring};
pub use crate::cartridge::storage::{GfxStorage, PrgStorage, SaveStorage};
pub use crate::cartridge::{Cartridge, CartridgeBus};
pub use crate::error::CartridgeError;

// Conditional testing utilities
#[cfg(feature = "testing-utils")]
pub use crate::test_utils::*;
