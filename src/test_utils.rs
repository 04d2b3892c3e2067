//! Builders for headers and cartridges in tests.
//!
//! Compiled for this crate's own tests, and exported to other crates with the
//! `testing-utils` feature.

use crate::cartridge::Cartridge;
use crate::cartridge::header::{GFX_UNIT_SIZE, HEADER_SIZE, Header, PRG_UNIT_SIZE};
use crate::cartridge::storage::{GfxStorage, PrgStorage};

/// Raw 16-byte iNES header with the given unit counts and flag bytes.
pub fn header_bytes(prg_units: u8, gfx_units: u8, flags6: u8, flags7: u8) -> Vec<u8> {
    let mut raw = vec![0u8; HEADER_SIZE];
    raw[0..4].copy_from_slice(b"NES\x1A");
    raw[4] = prg_units;
    raw[5] = gfx_units;
    raw[6] = flags6;
    raw[7] = flags7;
    raw
}

/// Full iNES image: header, optional trainer, then PRG and graphics payloads
/// filled with `prg_fill` / `gfx_fill`.
pub fn ines_image(
    prg_units: u8,
    gfx_units: u8,
    flags6: u8,
    flags7: u8,
    prg_fill: u8,
    gfx_fill: u8,
) -> Vec<u8> {
    let mut raw = header_bytes(prg_units, gfx_units, flags6, flags7);
    if flags6 & 0b0000_0100 != 0 {
        raw.extend(std::iter::repeat_n(0xEE, 512));
    }
    raw.extend(std::iter::repeat_n(prg_fill, prg_units as usize * PRG_UNIT_SIZE));
    raw.extend(std::iter::repeat_n(gfx_fill, gfx_units as usize * GFX_UNIT_SIZE));
    raw
}

/// Cartridge whose payloads match the header exactly.
///
/// Panics if `prg_units` is 0; meant for tests only.
pub fn filled_cartridge(
    prg_units: u8,
    gfx_units: u8,
    flags6: u8,
    prg_fill: u8,
    gfx_fill: u8,
) -> Cartridge {
    let header = Header::from_bytes(&header_bytes(prg_units, gfx_units, flags6, 0))
        .expect("test header should be valid");
    let prg = PrgStorage::new(vec![prg_fill; header.prg_byte_size()]);
    let gfx = if header.uses_gfx_ram() {
        GfxStorage::ram(GFX_UNIT_SIZE)
    } else {
        GfxStorage::new(vec![gfx_fill; header.gfx_byte_size()])
    };
    Cartridge::new(header, prg, gfx, None).expect("test cartridge should be valid")
}

/// Installs `env_logger` once so `log` output shows up under `cargo test`.
#[cfg(test)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
