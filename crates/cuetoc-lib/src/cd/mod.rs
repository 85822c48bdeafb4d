// src/cd/mod.rs
pub mod error;
pub mod time;

pub const SECTOR_SIZE: usize = 2352;

/// Red Book track limit (01 to 99)
pub const MAX_TRACKS: usize = 99;
/// Red Book index limit (00 to 98)
pub const MAX_INDEXES: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiscMode {
    #[default]
    CdDa,
    CdRom,
    CdRomXa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackMode {
    #[default]
    Audio,
    Mode1,
    Mode1Raw,
    Mode2,
    Mode2Form1,
    Mode2Form2,
    Mode2FormMix,
    Mode2Raw,
}

impl TrackMode {
    /// Nominal size in bytes of one sector of this block type.
    pub fn sector_size(self) -> usize {
        match self {
            TrackMode::Audio | TrackMode::Mode1Raw | TrackMode::Mode2Raw => SECTOR_SIZE,
            TrackMode::Mode1 | TrackMode::Mode2Form1 => 2048,
            TrackMode::Mode2 => 2336,
            TrackMode::Mode2Form2 | TrackMode::Mode2FormMix => 2324,
        }
    }

    pub fn is_audio(self) -> bool {
        self == TrackMode::Audio
    }

    pub fn is_mode2(self) -> bool {
        matches!(
            self,
            TrackMode::Mode2
                | TrackMode::Mode2Form1
                | TrackMode::Mode2Form2
                | TrackMode::Mode2FormMix
                | TrackMode::Mode2Raw
        )
    }
}

/// Sub-channel data mode of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubMode {
    #[default]
    Rw,
    RwRaw,
}

/// Track control flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrackFlags(pub u8);

impl TrackFlags {
    pub const PRE_EMPHASIS: u8 = 0x01;
    pub const COPY_PERMITTED: u8 = 0x02;
    pub const DATA: u8 = 0x04;
    pub const FOUR_CHANNEL: u8 = 0x08;
    pub const SCMS: u8 = 0x10;

    pub fn is_set(&self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_sizes_follow_block_type() {
        assert_eq!(TrackMode::Audio.sector_size(), 2352);
        assert_eq!(TrackMode::Mode1.sector_size(), 2048);
        assert_eq!(TrackMode::Mode1Raw.sector_size(), 2352);
        assert_eq!(TrackMode::Mode2.sector_size(), 2336);
        assert_eq!(TrackMode::Mode2Form1.sector_size(), 2048);
        assert_eq!(TrackMode::Mode2Form2.sector_size(), 2324);
        assert_eq!(TrackMode::Mode2Raw.sector_size(), 2352);
    }

    #[test]
    fn flags_are_set_and_cleared_independently() {
        let mut flags = TrackFlags::default();
        assert!(flags.is_empty());

        flags.set(TrackFlags::PRE_EMPHASIS);
        flags.set(TrackFlags::SCMS);
        assert!(flags.is_set(TrackFlags::PRE_EMPHASIS));
        assert!(flags.is_set(TrackFlags::SCMS));
        assert!(!flags.is_set(TrackFlags::COPY_PERMITTED));

        flags.clear(TrackFlags::PRE_EMPHASIS);
        assert!(!flags.is_set(TrackFlags::PRE_EMPHASIS));
        assert!(flags.is_set(TrackFlags::SCMS));
    }

    #[test]
    fn mode2_variants_are_detected() {
        assert!(TrackMode::Mode2FormMix.is_mode2());
        assert!(!TrackMode::Mode1Raw.is_mode2());
        assert!(TrackMode::Audio.is_audio());
    }
}
