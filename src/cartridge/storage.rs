//! Fixed-size byte containers backing the cartridge's memory regions.
//!
//! Each container is allocated once and never resized. Addresses past the end
//! wrap around the container's length.

pub const DEFAULT_SAVE_SIZE: usize = 0x2000;

/// Wraps `address` into `0..len`, or `None` for an empty container.
fn mirror(address: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(address % len)
}

/// Like [`mirror`], but negative addresses wrap from the end (`-1` is the last byte).
fn mirror_signed(address: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    Some(address.rem_euclid(len) as usize)
}

#[derive(Clone)]
struct Memory {
    data: Box<[u8]>,
}

impl Memory {
    fn from_vec(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }

    fn zeroed(size: usize) -> Self {
        Self {
            data: vec![0; size].into_boxed_slice(),
        }
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn get(&self, index: Option<usize>) -> u8 {
        index.map_or(0, |i| self.data[i])
    }

    fn set(&mut self, index: Option<usize>, value: u8) {
        if let Some(i) = index {
            self.data[i] = value;
        }
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory({} bytes)", self.data.len())
    }
}

/// PRG ROM. Read-only once built; bank switching belongs to a mapper.
#[derive(Debug, Clone)]
pub struct PrgStorage {
    memory: Memory,
}

impl PrgStorage {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            memory: Memory::from_vec(data),
        }
    }

    /// Reads with wrap-around in both directions. Empty storage reads as 0.
    pub fn read(&self, address: isize) -> u8 {
        self.memory.get(mirror_signed(address, self.memory.size()))
    }

    pub fn size(&self) -> usize {
        self.memory.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.memory.data
    }
}

/// CHR ROM, or CHR RAM when the header declares no graphics units.
#[derive(Debug, Clone)]
pub struct GfxStorage {
    memory: Memory,
}

impl GfxStorage {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            memory: Memory::from_vec(data),
        }
    }

    /// Zero-filled graphics RAM of `size` bytes
    pub fn ram(size: usize) -> Self {
        Self {
            memory: Memory::zeroed(size),
        }
    }

    pub fn read(&self, address: usize) -> u8 {
        self.memory.get(mirror(address, self.memory.size()))
    }

    /// No-op on empty storage.
    pub fn write(&mut self, address: usize, value: u8) {
        let index = mirror(address, self.memory.size());
        self.memory.set(index, value);
    }

    pub fn size(&self) -> usize {
        self.memory.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.memory.data
    }
}

/// PRG RAM mapped at $6000-$7FFF, optionally kept alive by a battery.
///
/// Whether the contents get persisted is up to the embedder; this type only
/// reports the flag and offers [`SaveStorage::load`] / [`SaveStorage::data`]
/// for moving bytes in and out.
#[derive(Debug, Clone)]
pub struct SaveStorage {
    memory: Memory,
    battery_backed: bool,
}

impl SaveStorage {
    /// `initial` is used only if it is exactly `size` bytes long; anything
    /// else leaves the storage zero-filled.
    pub fn new(size: usize, battery_backed: bool, initial: Option<Vec<u8>>) -> Self {
        let memory = match initial {
            Some(data) if data.len() == size => Memory::from_vec(data),
            _ => Memory::zeroed(size),
        };
        Self {
            memory,
            battery_backed,
        }
    }

    pub fn read(&self, address: usize) -> u8 {
        self.memory.get(mirror(address, self.memory.size()))
    }

    pub fn write(&mut self, address: usize, value: u8) {
        let index = mirror(address, self.memory.size());
        self.memory.set(index, value);
    }

    /// Replaces the contents with `data`, truncated or zero-padded to fit.
    pub fn load(&mut self, data: &[u8]) {
        let size = self.memory.size();
        let n = data.len().min(size);
        self.memory.data[..n].copy_from_slice(&data[..n]);
        self.memory.data[n..].fill(0);
    }

    pub fn is_battery_backed(&self) -> bool {
        self.battery_backed
    }

    pub fn size(&self) -> usize {
        self.memory.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.memory.data
    }
}

impl Default for SaveStorage {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_SIZE, false, None)
    }
}
