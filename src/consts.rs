use crate::schema::{Field, TextField};

// The high byte of a magic is the record kind, the next byte its version and
// the low word the record length including the magic. The current track
// magic has no room for its length.
pub const TRK_MAGIC: u32 = 0x0103_0000;
pub const TRK_MAGIC_OLD: u32 = 0x0102_1F70;
pub const WPT_MAGIC: u32 = 0x0202_0024;
pub const WPT_MAGIC2: u32 = 0x0203_0024;
pub const RTE_MAGIC: u32 = 0x0303_0088;

pub const MAGIC_SIZE: usize = 4;

/// The record signatures this crate knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magic {
    Waypoint,
    /// Used by newer firmware for the same waypoint layout.
    Waypoint2,
    Route,
    Track,
    TrackOld,
}

impl Magic {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            WPT_MAGIC => Some(Self::Waypoint),
            WPT_MAGIC2 => Some(Self::Waypoint2),
            RTE_MAGIC => Some(Self::Route),
            TRK_MAGIC => Some(Self::Track),
            TRK_MAGIC_OLD => Some(Self::TrackOld),
            _ => None,
        }
    }

    pub fn value(self) -> u32 {
        match self {
            Self::Waypoint => WPT_MAGIC,
            Self::Waypoint2 => WPT_MAGIC2,
            Self::Route => RTE_MAGIC,
            Self::Track => TRK_MAGIC,
            Self::TrackOld => TRK_MAGIC_OLD,
        }
    }

    pub fn to_be_bytes(self) -> [u8; MAGIC_SIZE] {
        self.value().to_be_bytes()
    }
}

// waypoint
pub const WPT_SIZE: usize = 32;
pub const WPT_NAME_LEN: usize = 12;

pub const WPT_NUM: Field<u16> = Field::at(0);
pub const WPT_STATUS: Field<u8> = Field::at(4);
pub const WPT_ICON: Field<u8> = Field::at(5);
pub const WPT_DEPTH: Field<u16> = Field::at(6);
pub const WPT_TIME: Field<u32> = Field::at(8);
pub const WPT_EAST: Field<i32> = Field::at(12);
pub const WPT_NORTH: Field<i32> = Field::at(16);
pub const WPT_NAME: TextField = TextField::at(20, WPT_NAME_LEN);

// route
pub const RTE_SIZE: usize = 132;
pub const RTE_NAME_LEN: usize = 20;
pub const MAX_RTE_POINTS: usize = 50;

pub const RTE_NUM: Field<u16> = Field::at(0);
pub const RTE_COUNT: Field<i8> = Field::at(7);
pub const RTE_TIME: Field<u32> = Field::at(8);
pub const RTE_NAME: TextField = TextField::at(12, RTE_NAME_LEN);
pub const RTE_POINTS: Field<u16> = Field::at(32);

// track, both layouts share the first 28 header bytes
pub const TRK_NAME_LEN: usize = 20;

pub const TRK_NUM: Field<u16> = Field::at(0);
pub const TRK_NUM_POINTS: Field<u16> = Field::at(4);
pub const TRK_TIME: Field<u32> = Field::at(8);
pub const TRK_START_EAST: Field<i32> = Field::at(12);
pub const TRK_START_NORTH: Field<i32> = Field::at(16);
pub const TRK_END_EAST: Field<i32> = Field::at(20);
pub const TRK_END_NORTH: Field<i32> = Field::at(24);

// current track
pub const TRK_HEADER_SIZE: usize = 64;
pub const TRK_POINT_SIZE: usize = 6;
pub const TRK_RECORD_LEN: usize = 131_080;
/// Two bytes left over after the point slots.
pub const TRK_TRAILER_SIZE: usize = 2;
pub const TRK_MAX_POINTS: usize = (TRK_RECORD_LEN - MAGIC_SIZE - TRK_HEADER_SIZE) / TRK_POINT_SIZE;

pub const TRK_SW_EAST: Field<i32> = Field::at(28);
pub const TRK_SW_NORTH: Field<i32> = Field::at(32);
pub const TRK_NE_EAST: Field<i32> = Field::at(36);
pub const TRK_NE_NORTH: Field<i32> = Field::at(40);
pub const TRK_NAME: TextField = TextField::at(44, TRK_NAME_LEN);

pub const TRK_POINT_DELTA_EAST: Field<i16> = Field::at(0);
pub const TRK_POINT_DELTA_NORTH: Field<i16> = Field::at(2);
pub const TRK_POINT_DEPTH: Field<u16> = Field::at(4);

// legacy track
pub const TRK_OLD_HEADER_SIZE: usize = 28;
pub const TRK_OLD_POINT_SIZE: usize = 4;
pub const TRK_OLD_RECORD_LEN: usize = 8048;
pub const TRK_OLD_NAME_OFFSET: usize = TRK_OLD_RECORD_LEN - TRK_NAME_LEN;
pub const TRK_OLD_MAX_POINTS: usize =
    (TRK_OLD_RECORD_LEN - TRK_OLD_HEADER_SIZE - MAGIC_SIZE - TRK_NAME_LEN) / TRK_OLD_POINT_SIZE;

pub const TRK_OLD_NAME: TextField = TextField::at(0, TRK_NAME_LEN);
