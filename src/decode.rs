use crate::consts::*;
use crate::index::WaypointIndex;
use crate::schema::Input;
use crate::{File, route, track, waypoint};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unexpected end of file reading {0}")]
    UnexpectedEof(&'static str),
    #[error("invalid record header 0x{0:08X} (no or unknown humminbird file)")]
    UnknownMagic(u32),
    #[error("too many track points: {count} (at most {max})")]
    TooManyTrackPoints { count: u16, max: usize },
    #[error("too many route points: {0} (at most 50)")]
    TooManyRoutePoints(i8),
}

/// Problems that drop data from the result without failing the decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    #[error("route {route:?} refers to unknown waypoint number {point}, point dropped")]
    UnresolvedRoutePoint { route: String, point: u16 },
}

#[derive(Debug, Default)]
pub struct DecodedFile {
    pub file: File,
    pub warnings: Vec<DecodeWarning>,
}

pub fn decode_file(data: &[u8]) -> Result<DecodedFile, DecodeError> {
    Reader::new(data).read()
}

/// Single forward pass over the records of a file.
///
/// Waypoints are indexed by their record number as they are read, so that
/// later route records can refer to them. A track record ends the file.
pub struct Reader<'a> {
    input: Input<'a>,
    index: WaypointIndex,
    decoded: DecodedFile,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            input: Input::new(data),
            index: WaypointIndex::default(),
            decoded: DecodedFile::default(),
        }
    }

    pub fn read(mut self) -> Result<DecodedFile, DecodeError> {
        while !self.input.is_at_end() {
            let start = self.input.position();
            let value = self.input.take(MAGIC_SIZE, "record header")?;
            let value = u32::from_be_bytes(value.try_into().unwrap());
            let magic = Magic::from_u32(value).ok_or(DecodeError::UnknownMagic(value))?;
            debug!(offset = start, ?magic, "reading record");

            match magic {
                Magic::Waypoint | Magic::Waypoint2 => self.read_waypoint()?,
                Magic::Route => self.read_route()?,
                Magic::Track => {
                    let track = track::current::decode_track(&mut self.input)?;
                    self.decoded.file.tracks.push(track);
                    // the rest of the file is zero padding
                    break;
                }
                Magic::TrackOld => {
                    let track = track::legacy::decode_track(&mut self.input, start)?;
                    self.decoded.file.tracks.push(track);
                    break;
                }
            }
        }

        Ok(self.decoded)
    }

    fn read_waypoint(&mut self) -> Result<(), DecodeError> {
        let data = self.input.take(WPT_SIZE, "waypoint")?;
        if let Some((number, waypoint)) = waypoint::decode_waypoint(data) {
            self.index.insert(number, waypoint.clone());
            self.decoded.file.waypoints.push(waypoint);
        }
        Ok(())
    }

    fn read_route(&mut self) -> Result<(), DecodeError> {
        let data = self.input.take(RTE_SIZE, "route")?;
        let route = route::decode_route(data, &self.index, &mut self.decoded.warnings)?;
        if let Some(route) = route {
            self.decoded.file.routes.push(route);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    fn waypoint_record(magic: u32, number: u16, status: u8, name: &[u8]) -> Vec<u8> {
        let mut record = [0u8; WPT_SIZE];
        WPT_NUM.set(&mut record, number);
        WPT_STATUS.set(&mut record, status);
        WPT_EAST.set(&mut record, 1_000_000);
        WPT_NORTH.set(&mut record, 2_000_000);
        record[WPT_NAME.offset..WPT_NAME.offset + name.len()].copy_from_slice(name);

        let mut data = magic.to_be_bytes().to_vec();
        data.extend_from_slice(&record);
        data
    }

    fn route_record(name: &[u8], points: &[u16]) -> Vec<u8> {
        let mut record = [0u8; RTE_SIZE];
        RTE_COUNT.set(&mut record, points.len() as i8);
        record[RTE_NAME.offset..RTE_NAME.offset + name.len()].copy_from_slice(name);
        for (i, point) in points.iter().enumerate() {
            RTE_POINTS.nth(i).set(&mut record, *point);
        }

        let mut data = RTE_MAGIC.to_be_bytes().to_vec();
        data.extend_from_slice(&record);
        data
    }

    fn track_record(num_points: u16) -> Vec<u8> {
        let mut header = [0u8; TRK_HEADER_SIZE];
        TRK_NUM_POINTS.set(&mut header, num_points);
        let mut data = TRK_MAGIC.to_be_bytes().to_vec();
        data.extend_from_slice(&header);
        data
    }

    #[test]
    fn decoding_works_for_empty_file() {
        let decoded = decode_file(b"").unwrap();
        assert_eq!(decoded.file, File::default());
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn decoding_fails_for_unknown_magic() {
        assert_debug_snapshot!(
            decode_file(&[0x12, 0x34, 0x56, 0x78, 0, 0]).unwrap_err(),
            @r###"
        UnknownMagic(
            305419896,
        )
        "###
        );
    }

    #[test]
    fn unknown_magic_message_names_the_value() {
        let err = decode_file(&[0, 0, 0, 0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid record header 0x00000000 (no or unknown humminbird file)"
        );
    }

    #[test]
    fn decoding_fails_for_truncated_magic() {
        assert_debug_snapshot!(
            decode_file(&[0x02, 0x02]).unwrap_err(),
            @r###"
        UnexpectedEof(
            "record header",
        )
        "###
        );
    }

    #[test]
    fn decoding_fails_for_truncated_waypoint() {
        let data = waypoint_record(WPT_MAGIC, 0, 1, b"A");
        assert_debug_snapshot!(
            decode_file(&data[..20]).unwrap_err(),
            @r###"
        UnexpectedEof(
            "waypoint",
        )
        "###
        );
    }

    #[test]
    fn decoding_reads_both_waypoint_signatures() {
        let mut data = waypoint_record(WPT_MAGIC, 0, 1, b"First");
        data.extend(waypoint_record(WPT_MAGIC2, 1, 2, b"Second"));
        let decoded = decode_file(&data).unwrap();
        let names: Vec<&str> = decoded
            .file
            .waypoints
            .iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn decoding_skips_group_records() {
        let mut data = waypoint_record(WPT_MAGIC, 0, 16, b"Group");
        data.extend(waypoint_record(WPT_MAGIC, 1, 17, b""));
        data.extend(waypoint_record(WPT_MAGIC, 2, 3, b"MOB"));
        let decoded = decode_file(&data).unwrap();
        assert_eq!(decoded.file.waypoints.len(), 1);
        assert_eq!(decoded.file.waypoints[0].name, "MOB");
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn routes_resolve_earlier_waypoints() {
        let mut data = waypoint_record(WPT_MAGIC, 5, 1, b"Five");
        data.extend(waypoint_record(WPT_MAGIC, 7, 1, b"Seven"));
        data.extend(route_record(b"Home", &[5, 99, 7]));
        let decoded = decode_file(&data).unwrap();

        let route = &decoded.file.routes[0];
        assert_eq!(route.name, "Home");
        let names: Vec<&str> = route.points.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Five", "Seven"]);

        assert_debug_snapshot!(decoded.warnings, @r###"
        [
            UnresolvedRoutePoint {
                route: "Home",
                point: 99,
            },
        ]
        "###);
    }

    #[test]
    fn routes_cannot_refer_to_later_waypoints() {
        let mut data = route_record(b"Early", &[5]);
        data.extend(waypoint_record(WPT_MAGIC, 5, 1, b"Five"));
        let decoded = decode_file(&data).unwrap();
        assert!(decoded.file.routes.is_empty());
        assert_eq!(decoded.file.waypoints.len(), 1);
        assert_eq!(decoded.warnings.len(), 1);
    }

    #[test]
    fn routes_cannot_refer_to_skipped_waypoints() {
        let mut data = waypoint_record(WPT_MAGIC, 5, 0, b"Unused");
        data.extend(route_record(b"Nowhere", &[5]));
        let decoded = decode_file(&data).unwrap();
        assert!(decoded.file.routes.is_empty());
    }

    #[test]
    fn track_record_ends_the_file() {
        let mut data = waypoint_record(WPT_MAGIC, 0, 1, b"Before");
        data.extend(track_record(1));
        // anything after the track is never looked at
        data.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let decoded = decode_file(&data).unwrap();
        assert_eq!(decoded.file.waypoints.len(), 1);
        assert_eq!(decoded.file.tracks.len(), 1);
        assert_eq!(decoded.file.tracks[0].points.len(), 1);
    }
}
