use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};

use crate::bus::Memory;
use crate::cpu::{Cpu, StatusFlags};

/// Complete machine snapshot: register file plus the 64KiB memory image.
#[derive(Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub flags: u8,
    pub ram: Vec<u8>,
}

impl Snapshot {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn capture(cpu: &Cpu, memory: &Memory) -> Self {
        Snapshot {
            version: Self::CURRENT_VERSION,
            a: cpu.a,
            x: cpu.x,
            y: cpu.y,
            sp: cpu.sp,
            pc: cpu.pc,
            flags: cpu.status.bits(),
            ram: memory.get_ram(),
        }
    }

    pub fn restore(&self, cpu: &mut Cpu, memory: &mut Memory) -> Result<(), String> {
        if self.version > Self::CURRENT_VERSION {
            return Err(format!(
                "Snapshot version {} is not supported (current: {})",
                self.version,
                Self::CURRENT_VERSION
            ));
        }
        let ram: &[u8; 0x10000] = self.ram.as_slice().try_into().map_err(|_| {
            format!(
                "Snapshot memory image is {} bytes, expected 65536",
                self.ram.len()
            )
        })?;

        cpu.a = self.a;
        cpu.x = self.x;
        cpu.y = self.y;
        cpu.sp = self.sp;
        cpu.pc = self.pc;
        // Only the six physical bits may live in the register
        cpu.status = StatusFlags::from_bits_truncate(self.flags) & StatusFlags::PHYSICAL;
        memory.set_ram(ram);
        Ok(())
    }

    pub fn save_to_file(&self, filename: &str) -> Result<(), String> {
        let data = bincode::serialize(self)
            .map_err(|e| format!("Failed to serialize snapshot: {}", e))?;
        let mut file =
            File::create(filename).map_err(|e| format!("Failed to create snapshot file: {}", e))?;

        file.write_all(&data)
            .map_err(|e| format!("Failed to write snapshot file: {}", e))?;

        Ok(())
    }

    pub fn load_from_file(filename: &str) -> Result<Self, String> {
        let mut file =
            File::open(filename).map_err(|e| format!("Failed to open snapshot file: {}", e))?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| format!("Failed to read snapshot file: {}", e))?;

        bincode::deserialize(&data).map_err(|e| format!("Failed to deserialize snapshot: {}", e))
    }
}
