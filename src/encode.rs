use crate::consts::*;
use crate::index::WaypointNumbering;
use crate::shortname::MakeShort;
use crate::track::{current, legacy};
use crate::{File, Track, TrackFormat, Waypoint, route, waypoint};
use std::io::{Cursor, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("route {route:?} has more than {max} points, simplify it first")]
    TooManyRoutePoints { route: String, max: usize },
    #[error("point {index} of track {track:?} is too far from the previous point")]
    TrackDeltaOverflow { track: String, index: usize },
    #[error("too many distinct waypoints (at most 65536)")]
    TooManyWaypoints,
}

/// Name constraints for the written records.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub waypoint_names: MakeShort,
    pub route_names: MakeShort,
    pub track_names: MakeShort,
    /// Name waypoints after their description when they have one.
    pub synthesize_shortnames: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            waypoint_names: MakeShort::new(WPT_NAME_LEN - 1, "WPT"),
            route_names: MakeShort::new(RTE_NAME_LEN - 1, "Route"),
            track_names: MakeShort::new(TRK_NAME_LEN - 1, "Track"),
            synthesize_shortnames: false,
        }
    }
}

pub fn encode_file(file: &File) -> Result<Vec<u8>, EncodeError> {
    encode_file_with_options(file, WriteOptions::default())
}

pub fn encode_file_with_options(
    file: &File,
    options: WriteOptions,
) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_options(Cursor::new(Vec::new()), options);
    writer.write(file)?;
    Ok(writer.into_inner().into_inner())
}

pub struct Writer<W: Write> {
    writer: W,
    options: WriteOptions,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, WriteOptions::default())
    }

    pub fn with_options(inner: W, options: WriteOptions) -> Self {
        Self {
            writer: inner,
            options,
        }
    }

    /// Writes waypoints, then routes, then tracks.
    ///
    /// Readers stop at the first track record, so only the first track of a
    /// file with several can be read back.
    pub fn write(&mut self, file: &File) -> Result<(), EncodeError> {
        self.write_waypoints_and_routes(file)?;
        self.write_tracks(&file.tracks)
    }

    pub fn write_waypoints_and_routes(&mut self, file: &File) -> Result<(), EncodeError> {
        // waypoints only reachable through a route need a record as well
        let route_points = file.routes.iter().flat_map(|route| &route.points);

        let mut numbering = WaypointNumbering::default();
        for waypoint in file.waypoints.iter().chain(route_points) {
            if let Some(number) = numbering.assign(waypoint)? {
                self.write_waypoint(waypoint, number)?;
            }
        }
        let numbers = numbering.freeze();

        let mut route_number: u16 = 0;
        for route in file.routes.iter().filter(|route| !route.points.is_empty()) {
            let name = self.options.route_names.shorten(&route.name);
            if let Some(buf) = route::encode_route(route, route_number, &name, &numbers)? {
                self.writer.write_all(&Magic::Route.to_be_bytes())?;
                self.writer.write_all(&buf)?;
                route_number = route_number.wrapping_add(1);
            }
        }

        Ok(())
    }

    pub fn write_tracks(&mut self, tracks: &[Track]) -> Result<(), EncodeError> {
        for track in tracks.iter().filter(|track| !track.points.is_empty()) {
            let name = self.options.track_names.shorten(&track.name);
            let (data, record_len) = match track.format {
                TrackFormat::Current => (current::encode_track(track, &name)?, TRK_RECORD_LEN),
                TrackFormat::Legacy => (legacy::encode_track(track, &name)?, TRK_OLD_RECORD_LEN),
            };
            debug!(
                track = %track.name,
                points = track.points.len(),
                records = data.len() / record_len,
                "writing track"
            );
            self.writer.write_all(&data)?;
        }
        Ok(())
    }

    fn write_waypoint(&mut self, waypoint: &Waypoint, number: u16) -> Result<(), EncodeError> {
        let source = match &waypoint.description {
            Some(description) if self.options.synthesize_shortnames => description,
            _ => &waypoint.name,
        };
        let name = self.options.waypoint_names.shorten(source);

        let buf = waypoint::encode_waypoint(waypoint, number, &name);
        self.writer.write_all(&Magic::Waypoint.to_be_bytes())?;
        self.writer.write_all(&buf)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
