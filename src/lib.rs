//! Decoder/Encoder for Humminbird fishfinder waypoint, route and track files.
//!
//! The [decode_file] function decodes a `.hwr`/`.ht` byte buffer into a
//! [File], and [encode_file] turns a [File] back into bytes. Positions are
//! stored on disk in a projected integer system, see [projection].

use chrono::{DateTime, Utc};

mod consts;
mod decode;
mod encode;
pub mod icons;
mod index;
pub mod projection;
mod route;
mod schema;
pub mod shortname;
mod track;
mod waypoint;

pub use decode::*;
pub use encode::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
    pub waypoints: Vec<Waypoint>,
    pub routes: Vec<Route>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub name: String,
    /// Free text used instead of the name when short names are synthesized.
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Water depth in meters.
    pub depth: Option<f64>,
    pub creation_time: Option<DateTime<Utc>>,
    /// Human readable icon name, see [icons::ICONS].
    pub icon: Option<String>,
    pub status: WaypointStatus,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            latitude,
            longitude,
            depth: None,
            creation_time: None,
            icon: None,
            status: WaypointStatus::Permanent,
        }
    }
}

/// Status byte of a waypoint record.
///
/// Only [Permanent](Self::Permanent), [Temporary](Self::Temporary) and
/// [ManOverboard](Self::ManOverboard) waypoints are real positions; the
/// others are group bookkeeping and are skipped when reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaypointStatus {
    Unused,
    #[default]
    Permanent,
    Temporary,
    ManOverboard,
    GroupHeader,
    GroupBody,
    GroupInvalid,
    Other(u8),
}

impl WaypointStatus {
    pub fn from_byte(value: u8) -> Self {
        match value {
            0 => Self::Unused,
            1 => Self::Permanent,
            2 => Self::Temporary,
            3 => Self::ManOverboard,
            16 => Self::GroupHeader,
            17 => Self::GroupBody,
            63 => Self::GroupInvalid,
            other => Self::Other(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Self::Unused => 0,
            Self::Permanent => 1,
            Self::Temporary => 2,
            Self::ManOverboard => 3,
            Self::GroupHeader => 16,
            Self::GroupBody => 17,
            Self::GroupInvalid => 63,
            Self::Other(other) => other,
        }
    }

    /// Whether a record with this status describes an actual waypoint.
    pub fn is_position(self) -> bool {
        matches!(self, Self::Permanent | Self::Temporary | Self::ManOverboard)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub name: String,
    pub number: u16,
    pub creation_time: Option<DateTime<Utc>>,
    pub points: Vec<Waypoint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub name: String,
    pub number: u16,
    pub format: TrackFormat,
    pub points: Vec<TrackPoint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Water depth in meters. Never set on [TrackFormat::Legacy] tracks.
    pub depth: Option<f64>,
    pub creation_time: Option<DateTime<Utc>>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            depth: None,
            creation_time: None,
        }
    }
}

/// On-disk track record layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackFormat {
    /// Variable header with bounding box, name and per-point depth.
    #[default]
    Current,
    /// Fixed 8048 byte record without depth, name stored in the trailer.
    Legacy,
}
