// NES cartridge modules
pub mod cartridge;
pub mod error;
pub mod prelude;

#[cfg(any(test, feature = "testing-utils"))]
pub mod test_utils;

// Re-exports
pub use cartridge::header::{Header, HeaderFlags, Mirroring};
pub use cartridge::storage::{GfxStorage, PrgStorage, SaveStorage};
pub use cartridge::{Cartridge, CartridgeBus};
pub use error::{CartridgeError, Result};
