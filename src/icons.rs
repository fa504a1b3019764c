//! Waypoint icon table. The on-disk icon byte is an index into [ICONS].

pub const ICONS: [&str; 29] = [
    "Normal",
    "House",
    "Red cross",
    "Fish",
    "Duck",
    "Anchor",
    "Buoy",
    "Airport",
    "Camping",
    "Danger",
    "Fuel",
    "Rock",
    "Weed",
    "Wreck",
    "Phone",
    "Coffee",
    "Beer",
    "Mooring",
    "Pier",
    "Slip",
    "Ramp",
    "Circle",
    "Diamond",
    "Flag",
    "Pattern",
    "Shower",
    "Water tap",
    "Tree",
    "Book",
];

/// Icon byte written when no table entry matches.
pub const UNKNOWN_ICON: u8 = 255;

pub fn icon_name(index: u8) -> Option<&'static str> {
    ICONS.get(usize::from(index)).copied()
}

/// Maps a free-form icon description to its table index.
///
/// An exact case-insensitive match wins. Otherwise the first entry in table
/// order that occurs inside the description is used, so "Green Diamond" and
/// "Diamond, Green" both become "Diamond".
pub fn icon_index(description: &str) -> u8 {
    let position = ICONS
        .iter()
        .position(|icon| icon.eq_ignore_ascii_case(description))
        .or_else(|| {
            let description = description.to_lowercase();
            ICONS
                .iter()
                .position(|icon| description.contains(&icon.to_lowercase()))
        });

    match position {
        Some(index) => index as u8,
        None => UNKNOWN_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_looked_up_by_index() {
        assert_eq!(icon_name(0), Some("Normal"));
        assert_eq!(icon_name(28), Some("Book"));
        assert_eq!(icon_name(29), None);
        assert_eq!(icon_name(UNKNOWN_ICON), None);
    }

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(icon_index("water TAP"), 26);
        assert_eq!(icon_index("fish"), 3);
    }

    #[test]
    fn compound_names_match_contained_icon() {
        assert_eq!(icon_index("Diamond, Green"), 22);
        assert_eq!(icon_index("Green Diamond"), 22);
    }

    #[test]
    fn first_contained_icon_in_table_order_wins() {
        // "Fish" (3) comes before "Pier" (18) in the table
        assert_eq!(icon_index("Pier with fish"), 3);
        // table order decides, not position in the description
        assert_eq!(icon_index("Rocky buoy"), 6);
    }

    #[test]
    fn unmatched_descriptions_are_unknown() {
        assert_eq!(icon_index("Seagull"), UNKNOWN_ICON);
        assert_eq!(icon_index(""), UNKNOWN_ICON);
    }
}
