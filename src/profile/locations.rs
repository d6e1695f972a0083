//! Reference monitoring locations in Kathmandu Valley.

use super::types::LocationCoordinates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KathmanduLocation {
    pub location: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub pm25_avg: f64,
    pub pm10_avg: f64,
}

impl KathmanduLocation {
    pub fn coordinates(&self) -> LocationCoordinates {
        LocationCoordinates::new(self.location, self.lat, self.lng)
    }
}

macro_rules! loc {
    ($name:expr, $lat:expr, $lng:expr, $pm25:expr, $pm10:expr) => {
        KathmanduLocation {
            location: $name,
            lat: $lat,
            lng: $lng,
            pm25_avg: $pm25,
            pm10_avg: $pm10,
        }
    };
}

static LOCATIONS: &[KathmanduLocation] = &[
    loc!("Thamel", 27.7172, 85.3082, 38.5, 68.7),
    loc!("Kalanki", 27.6939, 85.2809, 115.0, 177.5),
    loc!("Balaju", 27.7361, 85.3031, 80.0, 120.0),
    loc!("Bhaktapur", 27.6711, 85.4298, 28.5, 50.0),
    loc!("Lalitpur", 27.6588, 85.3247, 16.5, 30.0),
    loc!("Koteshwor", 27.6796, 85.3497, 148.0, 202.5),
    loc!("Patan", 27.6742, 85.3240, 27.5, 51.5),
    loc!("Ratnapark", 27.7041, 85.3131, 85.0, 120.0),
    loc!("Chabahil", 27.7197, 85.3429, 68.0, 95.0),
    loc!("Swayambhu", 27.7147, 85.2896, 105.0, 145.0),
    loc!("Budhanilkantha", 27.7784, 85.3618, 32.0, 60.0),
    loc!("Kirtipur", 27.6818, 85.2884, 25.0, 48.0),
    loc!("Godavari", 27.5965, 85.3782, 15.0, 28.0),
];

pub fn kathmandu_locations() -> &'static [KathmanduLocation] {
    LOCATIONS
}

/// Looks a location up by exact name.
pub fn find_location(name: &str) -> Option<&'static KathmanduLocation> {
    LOCATIONS.iter().find(|l| l.location == name)
}
