use crate::consts::*;
use crate::icons::{UNKNOWN_ICON, icon_index, icon_name};
use crate::projection::Coord;
use crate::schema::{decode_depth, decode_time, encode_depth, encode_time};
use crate::{Waypoint, WaypointStatus};

/// Decodes a waypoint record body into its record number and waypoint.
///
/// Records whose status is not a position (unused slots, group headers and
/// bodies) yield `None`.
pub fn decode_waypoint(data: &[u8]) -> Option<(u16, Waypoint)> {
    let status = WaypointStatus::from_byte(WPT_STATUS.get(data));
    if !status.is_position() {
        return None;
    }

    let coord = Coord::new(WPT_EAST.get(data), WPT_NORTH.get(data));

    let waypoint = Waypoint {
        name: WPT_NAME.get(data),
        description: None,
        latitude: coord.latitude(),
        longitude: coord.longitude(),
        depth: decode_depth(WPT_DEPTH.get(data)),
        creation_time: decode_time(WPT_TIME.get(data)),
        icon: icon_name(WPT_ICON.get(data)).map(str::to_string),
        status,
    };

    Some((WPT_NUM.get(data), waypoint))
}

/// `name` is the already shortened name; it is cut to the field width.
pub fn encode_waypoint(waypoint: &Waypoint, number: u16, name: &str) -> [u8; WPT_SIZE] {
    let mut buf = [0u8; WPT_SIZE];

    // anything else would be skipped by readers
    let status = if waypoint.status.is_position() {
        waypoint.status
    } else {
        WaypointStatus::Permanent
    };

    let icon = waypoint.icon.as_deref().map_or(UNKNOWN_ICON, icon_index);
    let coord = Coord::from_lat_lon(waypoint.latitude, waypoint.longitude);

    WPT_NUM.set(&mut buf, number);
    WPT_STATUS.set(&mut buf, status.to_byte());
    WPT_ICON.set(&mut buf, icon);
    WPT_DEPTH.set(&mut buf, encode_depth(waypoint.depth));
    WPT_TIME.set(&mut buf, encode_time(waypoint.creation_time));
    WPT_EAST.set(&mut buf, coord.east);
    WPT_NORTH.set(&mut buf, coord.north);
    WPT_NAME.set(&mut buf, name);

    buf
}
