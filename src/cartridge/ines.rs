use super::Cartridge;
use super::header::{GFX_UNIT_SIZE, HEADER_SIZE, Header};
use super::storage::{GfxStorage, PrgStorage};
use crate::error::{CartridgeError, Result};

impl Cartridge {
    /// Builds a cartridge from a complete iNES image already in memory.
    ///
    /// Layout is header, optional 512-byte trainer (skipped), PRG ROM, then
    /// CHR ROM. Trailing bytes past the declared payloads are ignored. A header
    /// with no CHR units gets 8 KiB of zeroed CHR RAM.
    pub fn from_ines(raw: &[u8]) -> Result<Cartridge> {
        let header = Header::from_bytes(raw)?;

        let prg_start = HEADER_SIZE + header.trainer_byte_size();
        let chr_start = prg_start + header.prg_byte_size();
        let chr_end = chr_start + header.gfx_byte_size();

        if raw.len() < chr_end {
            return Err(CartridgeError::InvalidHeader(format!(
                "iNES image truncated: header declares {} bytes, got {} bytes",
                chr_end,
                raw.len()
            )));
        }

        let prg = PrgStorage::new(raw[prg_start..chr_start].to_vec());
        let gfx = if header.uses_gfx_ram() {
            GfxStorage::ram(GFX_UNIT_SIZE)
        } else {
            GfxStorage::new(raw[chr_start..chr_end].to_vec())
        };

        Cartridge::new(header, prg, gfx, None)
    }
}
