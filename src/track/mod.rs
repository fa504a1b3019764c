//! Track records.
//!
//! A track record stores its first position in the header and every further
//! position as a 16-bit step from the previous one. The two layouts differ
//! in capacity, in whether depth and a bounding box are stored, and in where
//! the name lives; see [current] and [legacy].

pub mod current;
pub mod legacy;

use crate::consts::*;
use crate::encode::EncodeError;
use crate::projection::Coord;
use crate::schema::{decode_depth, decode_time, encode_depth, encode_time};
use crate::TrackPoint;

/// Header fields shared by both layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub number: u16,
    pub num_points: u16,
    pub time: u32,
    pub start: Coord,
    pub end: Coord,
}

impl Header {
    pub fn read(data: &[u8]) -> Self {
        Self {
            number: TRK_NUM.get(data),
            num_points: TRK_NUM_POINTS.get(data),
            time: TRK_TIME.get(data),
            start: Coord::new(TRK_START_EAST.get(data), TRK_START_NORTH.get(data)),
            end: Coord::new(TRK_END_EAST.get(data), TRK_END_NORTH.get(data)),
        }
    }

    pub fn write(&self, data: &mut [u8]) {
        TRK_NUM.set(data, self.number);
        TRK_NUM_POINTS.set(data, self.num_points);
        TRK_TIME.set(data, self.time);
        TRK_START_EAST.set(data, self.start.east);
        TRK_START_NORTH.set(data, self.start.north);
        TRK_END_EAST.set(data, self.end.east);
        TRK_END_NORTH.set(data, self.end.north);
    }
}

/// One stored step. `depth` is always zero in the legacy layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delta {
    pub east: i16,
    pub north: i16,
    pub depth: u16,
}

/// South-west and north-east corners enclosing a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub sw: Coord,
    pub ne: Coord,
}

impl Bounds {
    pub fn new(coord: Coord) -> Self {
        Self {
            sw: coord,
            ne: coord,
        }
    }

    pub fn extend(&mut self, coord: Coord) {
        self.sw.east = self.sw.east.min(coord.east);
        self.sw.north = self.sw.north.min(coord.north);
        self.ne.east = self.ne.east.max(coord.east);
        self.ne.north = self.ne.north.max(coord.north);
    }

    #[cfg(test)]
    pub fn contains(&self, coord: Coord) -> bool {
        (self.sw.east..=self.ne.east).contains(&coord.east)
            && (self.sw.north..=self.ne.north).contains(&coord.north)
    }
}

/// Undoes a sensor glitch that records a step of `-1, 0` as
/// `32767, -32768`. Each axis is checked on its own.
pub fn filter_freak_values(deltas: &mut [Delta]) {
    for i in 1..deltas.len() {
        if deltas[i - 1].east == i16::MAX && deltas[i].east == i16::MIN {
            deltas[i - 1].east = -1;
            deltas[i].east = 0;
        }
        if deltas[i - 1].north == i16::MAX && deltas[i].north == i16::MIN {
            deltas[i - 1].north = -1;
            deltas[i].north = 0;
        }
    }
}

/// Absolute coordinates of the start and every step after it.
pub fn accumulate(start: Coord, deltas: &[Delta]) -> Vec<Coord> {
    let mut coords = Vec::with_capacity(deltas.len() + 1);
    coords.push(start);
    let mut coord = start;
    for delta in deltas {
        coord = coord.offset(delta.east, delta.north);
        coords.push(coord);
    }
    coords
}

/// Turns a decoded record into points. The header time belongs to the last
/// stepped point; a lone start point gets no time.
pub fn build_points(header: &Header, deltas: &[Delta]) -> Vec<TrackPoint> {
    let coords = accumulate(header.start, deltas);

    let mut points: Vec<TrackPoint> = coords
        .iter()
        .map(|coord| TrackPoint::new(coord.latitude(), coord.longitude()))
        .collect();

    // the start point in the header has no depth
    for (point, delta) in points[1..].iter_mut().zip(deltas) {
        point.depth = decode_depth(delta.depth);
    }

    if !deltas.is_empty()
        && let Some(last) = points.last_mut()
    {
        last.creation_time = decode_time(header.time);
    }

    points
}

fn step(to: i32, from: i32) -> Option<i16> {
    to.checked_sub(from).and_then(|d| i16::try_from(d).ok())
}

/// The stored form of a run of track points.
#[derive(Debug)]
pub struct Swath {
    pub start: Coord,
    pub end: Coord,
    pub bounds: Bounds,
    pub deltas: Vec<Delta>,
    /// Time of the last point that has one.
    pub time: u32,
}

impl Swath {
    /// `first_index` is the position of `points[0]` in the whole track and
    /// only used for error reporting.
    pub fn encode(
        track: &str,
        first_index: usize,
        points: &[TrackPoint],
    ) -> Result<Option<Self>, EncodeError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(None);
        };

        let start = Coord::from_lat_lon(first.latitude, first.longitude);
        let mut swath = Swath {
            start,
            end: start,
            bounds: Bounds::new(start),
            deltas: Vec::with_capacity(rest.len()),
            time: encode_time(first.creation_time),
        };

        for (i, point) in rest.iter().enumerate() {
            let coord = Coord::from_lat_lon(point.latitude, point.longitude);
            let (Some(east), Some(north)) = (
                step(coord.east, swath.end.east),
                step(coord.north, swath.end.north),
            ) else {
                return Err(EncodeError::TrackDeltaOverflow {
                    track: track.to_string(),
                    index: first_index + i + 1,
                });
            };

            swath.deltas.push(Delta {
                east,
                north,
                depth: encode_depth(point.depth),
            });
            swath.bounds.extend(coord);
            swath.end = coord;
            if point.creation_time.is_some() {
                swath.time = encode_time(point.creation_time);
            }
        }

        Ok(Some(swath))
    }

    pub fn header(&self, number: u16) -> Header {
        Header {
            number,
            num_points: (self.deltas.len() + 1) as u16,
            time: self.time,
            start: self.start,
            end: self.end,
        }
    }
}
