//! Named example locations
//!
//! A few UK towns that can be picked by id on the command line instead of
//! typing coordinates.

use super::Location;

/// A location with a short id and a display name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    /// Unique identifier used on the command line
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Coordinates
    pub location: Location,
}

/// Static array of all preset places
pub static PLACES: [Place; 3] = [
    Place {
        id: "oxford",
        name: "Oxford",
        location: Location {
            latitude: 51.75,
            longitude: -1.25,
        },
    },
    Place {
        id: "newcastle",
        name: "Newcastle upon Tyne",
        location: Location {
            latitude: 54.98,
            longitude: -1.61,
        },
    },
    Place {
        id: "brighton",
        name: "Brighton",
        location: Location {
            latitude: 50.75,
            longitude: 0.0,
        },
    },
];

/// Get a place by its id, ignoring case and surrounding whitespace
///
/// # Example
///
/// ```
/// use sunblock::data::locations::get_place_by_id;
///
/// if let Some(place) = get_place_by_id("oxford") {
///     println!("{}: {:?}", place.name, place.location);
/// }
/// ```
pub fn get_place_by_id(id: &str) -> Option<&'static Place> {
    let id = id.trim().to_lowercase();
    PLACES.iter().find(|place| place.id == id)
}

/// Get all preset places
pub fn all_places() -> &'static [Place] {
    &PLACES
}
