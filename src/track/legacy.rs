//! Fixed 8048 byte track layout of older units.
//!
//! There is no depth and no bounding box, and the name sits in the last 20
//! bytes of the record rather than in the header. Steps are taken as stored:
//! unlike the current layout, no freak value filtering is applied.

use super::{Delta, Header, Swath, build_points};
use crate::consts::*;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::schema::Input;
use crate::{Track, TrackFormat};
use tracing::debug;

/// Decodes the record following a [TRK_MAGIC_OLD]. `record_start` is the
/// offset of that magic, which the name's position is relative to.
pub fn decode_track(input: &mut Input, record_start: usize) -> Result<Track, DecodeError> {
    let data = input.take(TRK_OLD_HEADER_SIZE, "track header")?;
    let header = Header::read(data);

    let num_points = usize::from(header.num_points);
    if num_points > TRK_OLD_MAX_POINTS {
        return Err(DecodeError::TooManyTrackPoints {
            count: header.num_points,
            max: TRK_OLD_MAX_POINTS,
        });
    }

    let delta_count = num_points.saturating_sub(1);
    let body = input.take(delta_count * TRK_OLD_POINT_SIZE, "track points")?;
    let deltas: Vec<Delta> = body
        .chunks_exact(TRK_OLD_POINT_SIZE)
        .map(|point| Delta {
            east: TRK_POINT_DELTA_EAST.get(point),
            north: TRK_POINT_DELTA_NORTH.get(point),
            depth: 0,
        })
        .collect();

    let trailer = input.peek_at(
        record_start + TRK_OLD_NAME_OFFSET,
        TRK_NAME_LEN,
        "track name",
    )?;
    let name = TRK_OLD_NAME.get(trailer);

    let points = build_points(&header, &deltas);
    debug!(name = %name, points = points.len(), "decoded legacy track");

    Ok(Track {
        name,
        number: header.number,
        format: TrackFormat::Legacy,
        points,
    })
}

/// Encodes a track as one 8048 byte record per [TRK_OLD_MAX_POINTS]
/// points. Depths are not stored.
pub fn encode_track(track: &Track, name: &str) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    for (i, points) in track.points.chunks(TRK_OLD_MAX_POINTS).enumerate() {
        let first_index = i * TRK_OLD_MAX_POINTS;
        if let Some(swath) = Swath::encode(&track.name, first_index, points)? {
            out.extend_from_slice(&encode_swath(&swath, track.number, name));
        }
    }
    Ok(out)
}

fn encode_swath(swath: &Swath, number: u16, name: &str) -> Vec<u8> {
    let mut buf = vec![0u8; TRK_OLD_RECORD_LEN];
    buf[..MAGIC_SIZE].copy_from_slice(&Magic::TrackOld.to_be_bytes());

    let (record, trailer) = buf.split_at_mut(TRK_OLD_NAME_OFFSET);
    let (header, points) = record[MAGIC_SIZE..].split_at_mut(TRK_OLD_HEADER_SIZE);
    swath.header(number).write(header);

    for (slot, delta) in points.chunks_exact_mut(TRK_OLD_POINT_SIZE).zip(&swath.deltas) {
        TRK_POINT_DELTA_EAST.set(slot, delta.east);
        TRK_POINT_DELTA_NORTH.set(slot, delta.north);
    }

    TRK_OLD_NAME.set(trailer, name);

    buf
}
