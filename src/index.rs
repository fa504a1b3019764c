//! Cross-record waypoint lookup.
//!
//! Route records refer to waypoints by the number the waypoint record was
//! stored under. On reading, [WaypointIndex] collects waypoints as they pass
//! by; on writing, [WaypointNumbering] hands out numbers during the waypoint
//! pass and is then frozen into [WaypointNumbers] for the route pass.

use crate::Waypoint;
use crate::encode::EncodeError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

#[derive(Debug, Default)]
pub struct WaypointIndex {
    by_number: HashMap<u16, Waypoint>,
}

impl WaypointIndex {
    pub fn insert(&mut self, number: u16, waypoint: Waypoint) {
        self.by_number.insert(number, waypoint);
    }

    pub fn get(&self, number: u16) -> Option<&Waypoint> {
        self.by_number.get(&number)
    }
}

/// Identity used to recognise the same waypoint in the waypoint list and
/// inside routes.
pub fn waypoint_id(waypoint: &Waypoint) -> String {
    format!(
        "{}\x01{:.9}\x01{:.9}",
        waypoint.name, waypoint.latitude, waypoint.longitude
    )
}

#[derive(Debug, Default)]
pub struct WaypointNumbering {
    numbers: HashMap<String, u16>,
    next: u32,
}

impl WaypointNumbering {
    /// Returns the number for a waypoint seen for the first time, or `None`
    /// if it already has one.
    pub fn assign(&mut self, waypoint: &Waypoint) -> Result<Option<u16>, EncodeError> {
        match self.numbers.entry(waypoint_id(waypoint)) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(entry) => {
                let number =
                    u16::try_from(self.next).map_err(|_| EncodeError::TooManyWaypoints)?;
                entry.insert(number);
                self.next += 1;
                Ok(Some(number))
            }
        }
    }

    pub fn freeze(self) -> WaypointNumbers {
        WaypointNumbers {
            numbers: self.numbers,
        }
    }
}

#[derive(Debug)]
pub struct WaypointNumbers {
    numbers: HashMap<String, u16>,
}

impl WaypointNumbers {
    pub fn get(&self, waypoint: &Waypoint) -> Option<u16> {
        self.numbers.get(&waypoint_id(waypoint)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_finds_registered_waypoints() {
        let mut index = WaypointIndex::default();
        index.insert(5, Waypoint::new("Five", 1.0, 2.0));
        assert_eq!(index.get(5).unwrap().name, "Five");
        assert!(index.get(6).is_none());
    }

    #[test]
    fn identity_uses_nine_decimals() {
        let waypoint = Waypoint::new("Dock", 59.5, -1.25);
        assert_eq!(waypoint_id(&waypoint), "Dock\x0159.500000000\x01-1.250000000");
    }

    #[test]
    fn numbers_are_assigned_once_per_identity() {
        let mut numbering = WaypointNumbering::default();
        let a = Waypoint::new("A", 1.0, 1.0);
        let b = Waypoint::new("B", 1.0, 1.0);
        assert_eq!(numbering.assign(&a).unwrap(), Some(0));
        assert_eq!(numbering.assign(&b).unwrap(), Some(1));
        assert_eq!(numbering.assign(&a.clone()).unwrap(), None);

        let numbers = numbering.freeze();
        assert_eq!(numbers.get(&a), Some(0));
        assert_eq!(numbers.get(&b), Some(1));
        assert_eq!(numbers.get(&Waypoint::new("A", 1.0, 1.000000001)), None);
    }

    #[test]
    fn numbering_fails_once_exhausted() {
        let mut numbering = WaypointNumbering {
            next: u32::from(u16::MAX),
            ..Default::default()
        };
        let a = Waypoint::new("A", 0.0, 0.0);
        assert_eq!(numbering.assign(&a).unwrap(), Some(u16::MAX));
        assert!(matches!(
            numbering.assign(&Waypoint::new("B", 0.0, 0.0)),
            Err(EncodeError::TooManyWaypoints)
        ));
    }
}
