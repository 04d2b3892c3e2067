use bitflags::bitflags;

use crate::error::{CartridgeError, Result};

pub const HEADER_SIZE: usize = 16;
pub const PRG_UNIT_SIZE: usize = 0x4000;
pub const GFX_UNIT_SIZE: usize = 0x2000;
pub const TRAINER_SIZE: usize = 512;

const NES_MAGIC_BYTES: &[u8; 4] = b"NES\x1A";

bitflags! {
    /* See: https://www.nesdev.org/wiki/INES#Flags_6
        7  bit  0
        ---- ----
        NNNN FTBM
        |||| ||||
        |||| |||+- Nametable arrangement (0: horizontal, 1: vertical mirroring)
        |||| ||+-- Battery-backed PRG RAM at $6000-$7FFF
        |||| |+--- 512-byte trainer before PRG data
        |||| +---- Four-screen VRAM
        ++++------ Lower nibble of mapper number
     */
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HeaderFlags: u8 {
        const VERTICAL_MIRRORING = 0b0000_0001;
        const BATTERY_BACKED =     0b0000_0010;
        const TRAINER =            0b0000_0100;
        const FOUR_SCREEN_VRAM =   0b0000_1000;
        const MAPPER_LOW =         0b1111_0000;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Vertical,
    Horizontal,
    FourScreen,
}

/// Decoded 16-byte iNES header.
///
/// Only constructible through [`Header::from_bytes`], so a value in hand always
/// has the signature checked and at least one PRG unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    prg_units: u8,
    gfx_units: u8,
    mapper_id: u8,
    flags: HeaderFlags,
}

impl Header {
    pub fn from_bytes(raw: &[u8]) -> Result<Header> {
        if raw.len() < HEADER_SIZE {
            return Err(CartridgeError::InvalidHeader(format!(
                "header is {} bytes, expected at least {}",
                raw.len(),
                HEADER_SIZE
            )));
        }
        if &raw[0..4] != NES_MAGIC_BYTES {
            return Err(CartridgeError::InvalidHeader("Not an iNES file".into()));
        }

        let prg_units = raw[4];
        let gfx_units = raw[5];
        let flags = HeaderFlags::from_bits_truncate(raw[6]);

        // Bytes 8-15 are reserved
        let mapper_id = (raw[7] & 0b1111_0000) | (raw[6] >> 4);

        if prg_units == 0 {
            return Err(CartridgeError::InvalidHeader(
                "PRG ROM unit count is 0".into(),
            ));
        }

        let header = Header {
            prg_units,
            gfx_units,
            mapper_id,
            flags,
        };
        log::debug!(
            "parsed iNES header: prg={}x16K gfx={}x8K mapper={} flags={:?}",
            prg_units,
            gfx_units,
            mapper_id,
            flags
        );
        Ok(header)
    }

    pub fn prg_units(&self) -> u8 {
        self.prg_units
    }

    pub fn gfx_units(&self) -> u8 {
        self.gfx_units
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    pub fn flags(&self) -> HeaderFlags {
        self.flags
    }

    pub fn vertical_mirroring(&self) -> bool {
        self.flags.contains(HeaderFlags::VERTICAL_MIRRORING)
    }

    pub fn battery_backed(&self) -> bool {
        self.flags.contains(HeaderFlags::BATTERY_BACKED)
    }

    pub fn has_trainer(&self) -> bool {
        self.flags.contains(HeaderFlags::TRAINER)
    }

    pub fn four_screen_vram(&self) -> bool {
        self.flags.contains(HeaderFlags::FOUR_SCREEN_VRAM)
    }

    /// No fixed graphics data; the board provides CHR RAM instead
    pub fn uses_gfx_ram(&self) -> bool {
        self.gfx_units == 0
    }

    pub fn mirroring(&self) -> Mirroring {
        match (self.four_screen_vram(), self.vertical_mirroring()) {
            (true, _) => Mirroring::FourScreen,
            (false, true) => Mirroring::Vertical,
            (false, false) => Mirroring::Horizontal,
        }
    }

    pub fn prg_byte_size(&self) -> usize {
        self.prg_units as usize * PRG_UNIT_SIZE
    }

    pub fn gfx_byte_size(&self) -> usize {
        self.gfx_units as usize * GFX_UNIT_SIZE
    }

    pub fn trainer_byte_size(&self) -> usize {
        if self.has_trainer() { TRAINER_SIZE } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::header_bytes;

    #[test]
    fn parses_unit_counts() {
        let header = Header::from_bytes(&header_bytes(2, 1, 0x00, 0x00)).unwrap();
        assert_eq!(header.prg_units(), 2);
        assert_eq!(header.gfx_units(), 1);
        assert_eq!(header.prg_byte_size(), 32768);
        assert_eq!(header.gfx_byte_size(), 8192);
        assert_eq!(header.trainer_byte_size(), 0);
        assert!(!header.uses_gfx_ram());
    }

    #[test]
    fn rejects_short_input() {
        let raw = header_bytes(1, 1, 0, 0);
        let err = Header::from_bytes(&raw[..15]).unwrap_err();
        assert!(matches!(err, CartridgeError::InvalidHeader(_)));
        assert!(Header::from_bytes(&[]).is_err());
    }

    #[test]
    fn rejects_bad_signature() {
        let mut raw = header_bytes(1, 1, 0, 0);
        raw[3] = 0x1B;
        let err = Header::from_bytes(&raw).unwrap_err();
        assert_eq!(err, CartridgeError::InvalidHeader("Not an iNES file".into()));
    }

    #[test]
    fn rejects_zero_prg_units() {
        let err = Header::from_bytes(&header_bytes(0, 1, 0, 0)).unwrap_err();
        assert!(matches!(err, CartridgeError::InvalidHeader(_)));
    }

    #[test]
    fn zero_gfx_units_means_gfx_ram() {
        let header = Header::from_bytes(&header_bytes(1, 0, 0, 0)).unwrap();
        assert!(header.uses_gfx_ram());
        assert_eq!(header.gfx_byte_size(), 0);
    }

    #[test]
    fn reserved_bytes_are_ignored() {
        let mut raw = header_bytes(1, 1, 0, 0);
        raw[8..16].copy_from_slice(&[0xFF; 8]);
        assert!(Header::from_bytes(&raw).is_ok());
        // longer input is fine too, only the first 16 bytes are looked at
        raw.extend_from_slice(&[0xAB; 4]);
        assert!(Header::from_bytes(&raw).is_ok());
    }

    #[test]
    fn flag_bits_decode_independently() {
        let cases = [
            (0b0000_0001, (true, false, false, false)),
            (0b0000_0010, (false, true, false, false)),
            (0b0000_0100, (false, false, true, false)),
            (0b0000_1000, (false, false, false, true)),
            (0b0000_1111, (true, true, true, true)),
            (0b0000_0000, (false, false, false, false)),
        ];
        for (flags6, (vertical, battery, trainer, four_screen)) in cases {
            let header = Header::from_bytes(&header_bytes(1, 1, flags6, 0)).unwrap();
            assert_eq!(header.vertical_mirroring(), vertical, "flags6={:08b}", flags6);
            assert_eq!(header.battery_backed(), battery, "flags6={:08b}", flags6);
            assert_eq!(header.has_trainer(), trainer, "flags6={:08b}", flags6);
            assert_eq!(header.four_screen_vram(), four_screen, "flags6={:08b}", flags6);
        }
    }

    #[test]
    fn flags6_0x33() {
        let header = Header::from_bytes(&header_bytes(1, 1, 0x33, 0x00)).unwrap();
        assert!(header.vertical_mirroring());
        assert!(header.battery_backed());
        assert!(!header.has_trainer());
        assert!(!header.four_screen_vram());
        assert_eq!(header.mapper_id(), 3);
    }

    #[test]
    fn mapper_id_combines_nibbles() {
        let id = |flags6, flags7| {
            Header::from_bytes(&header_bytes(1, 1, flags6, flags7))
                .unwrap()
                .mapper_id()
        };
        assert_eq!(id(0x10, 0x00), 1);
        assert_eq!(id(0x00, 0x80), 128);
        assert_eq!(id(0x70, 0x70), 119);
        // low bits of byte 7 don't leak into the mapper id
        assert_eq!(id(0x00, 0x0F), 0);
    }

    #[test]
    fn trainer_size() {
        let header = Header::from_bytes(&header_bytes(1, 1, 0b0000_0100, 0)).unwrap();
        assert_eq!(header.trainer_byte_size(), 512);
    }

    #[test]
    fn mirroring_mode() {
        let mirroring = |flags6| {
            Header::from_bytes(&header_bytes(1, 1, flags6, 0))
                .unwrap()
                .mirroring()
        };
        assert_eq!(mirroring(0b0000), Mirroring::Horizontal);
        assert_eq!(mirroring(0b0001), Mirroring::Vertical);
        assert_eq!(mirroring(0b1000), Mirroring::FourScreen);
        assert_eq!(mirroring(0b1001), Mirroring::FourScreen);
    }
}
