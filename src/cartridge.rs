use crate::error::{CartridgeError, Result};
use header::{Header, Mirroring};
use storage::{DEFAULT_SAVE_SIZE, GfxStorage, PrgStorage, SaveStorage};

pub mod header;
pub mod ines;
pub mod storage;

/// PRG RAM window in CPU space
pub const SAVE_WINDOW_START: u16 = 0x6000;
pub const SAVE_WINDOW_END: u16 = 0x7FFF;
/// Start of PRG ROM in CPU space
pub const PRG_WINDOW_START: u16 = 0x8000;
/// Pattern tables ($0000-$1FFF) in PPU space
pub const PATTERN_TABLE_END: u16 = 0x1FFF;

/// Bus-facing surface of a cartridge, as seen by the CPU and PPU.
pub trait CartridgeBus {
    /// CPU read ($4020–$FFFF)
    fn cpu_read(&mut self, addr: u16) -> u8;

    /// CPU write ($4020–$FFFF)
    fn cpu_write(&mut self, addr: u16, data: u8);

    /// PPU read ($0000–$1FFF)
    fn ppu_read(&mut self, addr: u16) -> u8;

    /// PPU write ($0000–$1FFF)
    fn ppu_write(&mut self, addr: u16, data: u8);

    /// Return to power-on state
    fn reset(&mut self);

    fn mapper_id(&self) -> u8;

    /// Nametable mirroring mode
    fn mirroring(&self) -> Mirroring;

    fn prg_data(&self) -> &[u8];

    fn gfx_data(&self) -> &[u8];
}

/// Header plus the three memory regions, with sizes checked against each other.
///
/// Address decoding is a fixed linear split. PRG is mirrored straight from
/// $8000 upwards with no bank switching; a mapper wraps this type for that.
#[derive(Debug, Clone)]
pub struct Cartridge {
    header: Header,
    prg: PrgStorage,
    gfx: GfxStorage,
    save: SaveStorage,
}

impl Cartridge {
    /// Assembles a cartridge, rejecting payloads whose size disagrees with the header.
    ///
    /// When the header declares no graphics units, `gfx` is used as CHR RAM and
    /// may be any size. Without `save`, 8 KiB of PRG RAM is created with the
    /// header's battery flag.
    pub fn new(
        header: Header,
        prg: PrgStorage,
        gfx: GfxStorage,
        save: Option<SaveStorage>,
    ) -> Result<Cartridge> {
        if prg.size() != header.prg_byte_size() {
            log::warn!(
                "rejecting cartridge: PRG is {} bytes, header says {}",
                prg.size(),
                header.prg_byte_size()
            );
            return Err(CartridgeError::InvalidHeader(format!(
                "PRG ROM size mismatch: header declares {} bytes, got {} bytes",
                header.prg_byte_size(),
                prg.size()
            )));
        }

        if !header.uses_gfx_ram() && gfx.size() != header.gfx_byte_size() {
            log::warn!(
                "rejecting cartridge: CHR is {} bytes, header says {}",
                gfx.size(),
                header.gfx_byte_size()
            );
            return Err(CartridgeError::InvalidHeader(format!(
                "CHR ROM size mismatch: header declares {} bytes, got {} bytes",
                header.gfx_byte_size(),
                gfx.size()
            )));
        }

        let save = save.unwrap_or_else(|| {
            SaveStorage::new(DEFAULT_SAVE_SIZE, header.battery_backed(), None)
        });

        log::debug!(
            "cartridge ready: mapper={} prg={}B chr={}B{} save={}B battery={}",
            header.mapper_id(),
            prg.size(),
            gfx.size(),
            if header.uses_gfx_ram() { " (ram)" } else { "" },
            save.size(),
            save.is_battery_backed()
        );

        Ok(Cartridge {
            header,
            prg,
            gfx,
            save,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn prg_storage(&self) -> &PrgStorage {
        &self.prg
    }

    pub fn gfx_storage(&self) -> &GfxStorage {
        &self.gfx
    }

    pub fn save_storage(&self) -> &SaveStorage {
        &self.save
    }

    pub fn save_storage_mut(&mut self) -> &mut SaveStorage {
        &mut self.save
    }

    pub fn set_save_storage(&mut self, save: SaveStorage) {
        self.save = save;
    }

    /// Current PRG RAM contents, for writing a battery save out
    pub fn save_data(&self) -> &[u8] {
        self.save.data()
    }

    /// Restores PRG RAM from a battery save; see [`SaveStorage::load`]
    pub fn load_save_data(&mut self, data: &[u8]) {
        self.save.load(data);
    }
}

impl CartridgeBus for Cartridge {
    fn cpu_read(&mut self, addr: u16) -> u8 {
        match addr {
            SAVE_WINDOW_START..=SAVE_WINDOW_END => {
                self.save.read((addr - SAVE_WINDOW_START) as usize)
            }
            PRG_WINDOW_START..=0xFFFF => self.prg.read((addr - PRG_WINDOW_START) as isize),
            _ => 0,
        }
    }

    fn cpu_write(&mut self, addr: u16, data: u8) {
        match addr {
            SAVE_WINDOW_START..=SAVE_WINDOW_END => {
                self.save.write((addr - SAVE_WINDOW_START) as usize, data);
            }
            // PRG space writes are mapper register writes
            _ => log::trace!("dropped CPU write {:02X} -> ${:04X}", data, addr),
        }
    }

    fn ppu_read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=PATTERN_TABLE_END => self.gfx.read(addr as usize),
            _ => 0,
        }
    }

    fn ppu_write(&mut self, addr: u16, data: u8) {
        if addr <= PATTERN_TABLE_END && self.header.uses_gfx_ram() {
            self.gfx.write(addr as usize, data);
        } else {
            log::trace!("dropped PPU write {:02X} -> ${:04X}", data, addr);
        }
    }

    fn reset(&mut self) {
        // Nothing to reset without mapper state
    }

    fn mapper_id(&self) -> u8 {
        self.header.mapper_id()
    }

    fn mirroring(&self) -> Mirroring {
        self.header.mirroring()
    }

    fn prg_data(&self) -> &[u8] {
        self.prg.data()
    }

    fn gfx_data(&self) -> &[u8] {
        self.gfx.data()
    }
}
