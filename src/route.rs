use crate::consts::*;
use crate::decode::{DecodeError, DecodeWarning};
use crate::encode::EncodeError;
use crate::index::{WaypointIndex, WaypointNumbers};
use crate::schema::{decode_time, encode_time};
use crate::Route;
use tracing::warn;

/// Decodes a route record body, resolving its point numbers against the
/// waypoints read so far.
///
/// Numbers without a waypoint are dropped with a warning. A route left
/// without any point yields `None`.
pub fn decode_route(
    data: &[u8],
    index: &WaypointIndex,
    warnings: &mut Vec<DecodeWarning>,
) -> Result<Option<Route>, DecodeError> {
    let count = RTE_COUNT.get(data);
    let len = usize::try_from(count).unwrap_or(0);
    if len > MAX_RTE_POINTS {
        return Err(DecodeError::TooManyRoutePoints(count));
    }

    let name = RTE_NAME.get(data);

    let mut points = Vec::with_capacity(len);
    for i in 0..len {
        let number = RTE_POINTS.nth(i).get(data);
        match index.get(number) {
            Some(waypoint) => points.push(waypoint.clone()),
            None => {
                warn!(route = %name, point = number, "route point refers to unknown waypoint");
                warnings.push(DecodeWarning::UnresolvedRoutePoint {
                    route: name.clone(),
                    point: number,
                });
            }
        }
    }

    if points.is_empty() {
        return Ok(None);
    }

    Ok(Some(Route {
        name,
        number: RTE_NUM.get(data),
        creation_time: decode_time(RTE_TIME.get(data)),
        points,
    }))
}

/// Encodes a route whose waypoints have all been numbered already.
///
/// Returns `None` if no point could be referenced, in which case no record
/// is written for the route.
pub fn encode_route(
    route: &Route,
    number: u16,
    name: &str,
    numbers: &WaypointNumbers,
) -> Result<Option<[u8; RTE_SIZE]>, EncodeError> {
    let mut buf = [0u8; RTE_SIZE];

    let mut count = 0;
    for waypoint in &route.points {
        let Some(point) = numbers.get(waypoint) else {
            warn!(
                route = %route.name,
                waypoint = %waypoint.name,
                "missing waypoint reference in route, point dropped"
            );
            continue;
        };
        if count == MAX_RTE_POINTS {
            return Err(EncodeError::TooManyRoutePoints {
                route: route.name.clone(),
                max: MAX_RTE_POINTS,
            });
        }
        RTE_POINTS.nth(count).set(&mut buf, point);
        count += 1;
    }

    if count == 0 {
        return Ok(None);
    }

    RTE_NUM.set(&mut buf, number);
    RTE_COUNT.set(&mut buf, count as i8);
    RTE_TIME.set(&mut buf, encode_time(route.creation_time));
    RTE_NAME.set(&mut buf, name);

    Ok(Some(buf))
}
