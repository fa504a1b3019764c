//! Track layout with a 64 byte header, bounding box and depth per point.
//!
//! The header's point count includes the start point held in the header
//! itself. Written records always hold [TRK_MAX_POINTS] point slots followed
//! by two zero bytes, whatever the number of points.

use super::{Bounds, Delta, Header, Swath, build_points, filter_freak_values};
use crate::consts::*;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::projection::Coord;
use crate::schema::Input;
use crate::{Track, TrackFormat};
use tracing::debug;

/// A record as stored, before positions are projected.
#[derive(Debug)]
struct Record {
    header: Header,
    bounds: Bounds,
    name: String,
    deltas: Vec<Delta>,
}

fn read_record(input: &mut Input) -> Result<Record, DecodeError> {
    let data = input.take(TRK_HEADER_SIZE, "track header")?;
    let header = Header::read(data);

    let mut num_points = usize::from(header.num_points);
    // a completely full record claims one point more than it can hold
    if num_points == TRK_MAX_POINTS + 1 {
        num_points -= 1;
    }
    if num_points > TRK_MAX_POINTS {
        return Err(DecodeError::TooManyTrackPoints {
            count: header.num_points,
            max: TRK_MAX_POINTS,
        });
    }

    let delta_count = num_points.saturating_sub(1);
    let body = input.take(delta_count * TRK_POINT_SIZE, "track points")?;
    let deltas = body
        .chunks_exact(TRK_POINT_SIZE)
        .map(|point| Delta {
            east: TRK_POINT_DELTA_EAST.get(point),
            north: TRK_POINT_DELTA_NORTH.get(point),
            depth: TRK_POINT_DEPTH.get(point),
        })
        .collect();

    Ok(Record {
        header,
        bounds: Bounds {
            sw: Coord::new(TRK_SW_EAST.get(data), TRK_SW_NORTH.get(data)),
            ne: Coord::new(TRK_NE_EAST.get(data), TRK_NE_NORTH.get(data)),
        },
        name: TRK_NAME.get(data),
        deltas,
    })
}

/// Decodes the record following a [TRK_MAGIC].
pub fn decode_track(input: &mut Input) -> Result<Track, DecodeError> {
    let mut record = read_record(input)?;
    filter_freak_values(&mut record.deltas);

    let points = build_points(&record.header, &record.deltas);
    debug!(name = %record.name, points = points.len(), "decoded track");

    Ok(Track {
        name: record.name,
        number: record.header.number,
        format: TrackFormat::Current,
        points,
    })
}

/// Encodes a track as one record per [TRK_MAX_POINTS] points, magics
/// included. A track without points encodes to nothing.
pub fn encode_track(track: &Track, name: &str) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    for (i, points) in track.points.chunks(TRK_MAX_POINTS).enumerate() {
        let first_index = i * TRK_MAX_POINTS;
        if let Some(swath) = Swath::encode(&track.name, first_index, points)? {
            out.extend_from_slice(&encode_swath(&swath, track.number, name));
        }
    }
    Ok(out)
}

fn encode_swath(swath: &Swath, number: u16, name: &str) -> Vec<u8> {
    let mut buf = vec![0u8; TRK_RECORD_LEN];
    buf[..MAGIC_SIZE].copy_from_slice(&Magic::Track.to_be_bytes());

    let (header, points) = buf[MAGIC_SIZE..].split_at_mut(TRK_HEADER_SIZE);
    swath.header(number).write(header);
    TRK_SW_EAST.set(header, swath.bounds.sw.east);
    TRK_SW_NORTH.set(header, swath.bounds.sw.north);
    TRK_NE_EAST.set(header, swath.bounds.ne.east);
    TRK_NE_NORTH.set(header, swath.bounds.ne.north);
    TRK_NAME.set(header, name);

    for (slot, delta) in points.chunks_exact_mut(TRK_POINT_SIZE).zip(&swath.deltas) {
        TRK_POINT_DELTA_EAST.set(slot, delta.east);
        TRK_POINT_DELTA_NORTH.set(slot, delta.north);
        TRK_POINT_DEPTH.set(slot, delta.depth);
    }

    buf
}
