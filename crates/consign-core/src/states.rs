//! Reference table of US states: full name, routing slug, and an approximate
//! geographic center used to place map markers without geocoding.

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsState {
    pub name: &'static str,
    pub slug: &'static str,
    pub center: GeoPoint,
}

/// Geographic center of the contiguous US.
pub const US_CENTER: GeoPoint = GeoPoint {
    lat: 39.828_3,
    lng: -98.579_5,
};

/// All 50 states plus the District of Columbia, sorted by name.
pub const US_STATES: &[UsState] = &[
    UsState {
        name: "Alabama",
        slug: "alabama",
        center: GeoPoint {
            lat: 32.806_671,
            lng: -86.791_130,
        },
    },
    UsState {
        name: "Alaska",
        slug: "alaska",
        center: GeoPoint {
            lat: 61.370_716,
            lng: -152.404_419,
        },
    },
    UsState {
        name: "Arizona",
        slug: "arizona",
        center: GeoPoint {
            lat: 33.729_759,
            lng: -111.431_221,
        },
    },
    UsState {
        name: "Arkansas",
        slug: "arkansas",
        center: GeoPoint {
            lat: 34.969_704,
            lng: -92.373_123,
        },
    },
    UsState {
        name: "California",
        slug: "california",
        center: GeoPoint {
            lat: 36.116_203,
            lng: -119.681_564,
        },
    },
    UsState {
        name: "Colorado",
        slug: "colorado",
        center: GeoPoint {
            lat: 39.059_811,
            lng: -105.311_104,
        },
    },
    UsState {
        name: "Connecticut",
        slug: "connecticut",
        center: GeoPoint {
            lat: 41.597_782,
            lng: -72.755_371,
        },
    },
    UsState {
        name: "Delaware",
        slug: "delaware",
        center: GeoPoint {
            lat: 39.318_523,
            lng: -75.507_141,
        },
    },
    UsState {
        name: "District of Columbia",
        slug: "district-of-columbia",
        center: GeoPoint {
            lat: 38.907_192,
            lng: -77.036_873,
        },
    },
    UsState {
        name: "Florida",
        slug: "florida",
        center: GeoPoint {
            lat: 27.766_279,
            lng: -81.686_783,
        },
    },
    UsState {
        name: "Georgia",
        slug: "georgia",
        center: GeoPoint {
            lat: 33.040_619,
            lng: -83.643_074,
        },
    },
    UsState {
        name: "Hawaii",
        slug: "hawaii",
        center: GeoPoint {
            lat: 21.094_318,
            lng: -157.498_337,
        },
    },
    UsState {
        name: "Idaho",
        slug: "idaho",
        center: GeoPoint {
            lat: 44.240_459,
            lng: -114.478_828,
        },
    },
    UsState {
        name: "Illinois",
        slug: "illinois",
        center: GeoPoint {
            lat: 40.349_457,
            lng: -88.986_137,
        },
    },
    UsState {
        name: "Indiana",
        slug: "indiana",
        center: GeoPoint {
            lat: 39.849_426,
            lng: -86.258_278,
        },
    },
    UsState {
        name: "Iowa",
        slug: "iowa",
        center: GeoPoint {
            lat: 42.011_539,
            lng: -93.210_526,
        },
    },
    UsState {
        name: "Kansas",
        slug: "kansas",
        center: GeoPoint {
            lat: 38.526_600,
            lng: -96.726_486,
        },
    },
    UsState {
        name: "Kentucky",
        slug: "kentucky",
        center: GeoPoint {
            lat: 37.668_140,
            lng: -84.670_067,
        },
    },
    UsState {
        name: "Louisiana",
        slug: "louisiana",
        center: GeoPoint {
            lat: 31.169_546,
            lng: -91.867_805,
        },
    },
    UsState {
        name: "Maine",
        slug: "maine",
        center: GeoPoint {
            lat: 44.693_947,
            lng: -69.381_927,
        },
    },
    UsState {
        name: "Maryland",
        slug: "maryland",
        center: GeoPoint {
            lat: 39.063_946,
            lng: -76.802_101,
        },
    },
    UsState {
        name: "Massachusetts",
        slug: "massachusetts",
        center: GeoPoint {
            lat: 42.230_171,
            lng: -71.530_106,
        },
    },
    UsState {
        name: "Michigan",
        slug: "michigan",
        center: GeoPoint {
            lat: 43.326_618,
            lng: -84.536_095,
        },
    },
    UsState {
        name: "Minnesota",
        slug: "minnesota",
        center: GeoPoint {
            lat: 45.694_454,
            lng: -93.900_192,
        },
    },
    UsState {
        name: "Mississippi",
        slug: "mississippi",
        center: GeoPoint {
            lat: 32.741_646,
            lng: -89.678_696,
        },
    },
    UsState {
        name: "Missouri",
        slug: "missouri",
        center: GeoPoint {
            lat: 38.456_085,
            lng: -92.288_368,
        },
    },
    UsState {
        name: "Montana",
        slug: "montana",
        center: GeoPoint {
            lat: 46.921_925,
            lng: -110.454_353,
        },
    },
    UsState {
        name: "Nebraska",
        slug: "nebraska",
        center: GeoPoint {
            lat: 41.492_537,
            lng: -99.901_813,
        },
    },
    UsState {
        name: "Nevada",
        slug: "nevada",
        center: GeoPoint {
            lat: 38.313_515,
            lng: -117.055_374,
        },
    },
    UsState {
        name: "New Hampshire",
        slug: "new-hampshire",
        center: GeoPoint {
            lat: 43.452_492,
            lng: -71.563_896,
        },
    },
    UsState {
        name: "New Jersey",
        slug: "new-jersey",
        center: GeoPoint {
            lat: 40.298_904,
            lng: -74.521_011,
        },
    },
    UsState {
        name: "New Mexico",
        slug: "new-mexico",
        center: GeoPoint {
            lat: 34.840_515,
            lng: -106.248_482,
        },
    },
    UsState {
        name: "New York",
        slug: "new-york",
        center: GeoPoint {
            lat: 42.165_726,
            lng: -74.948_051,
        },
    },
    UsState {
        name: "North Carolina",
        slug: "north-carolina",
        center: GeoPoint {
            lat: 35.630_066,
            lng: -79.806_419,
        },
    },
    UsState {
        name: "North Dakota",
        slug: "north-dakota",
        center: GeoPoint {
            lat: 47.528_912,
            lng: -99.784_012,
        },
    },
    UsState {
        name: "Ohio",
        slug: "ohio",
        center: GeoPoint {
            lat: 40.388_783,
            lng: -82.764_915,
        },
    },
    UsState {
        name: "Oklahoma",
        slug: "oklahoma",
        center: GeoPoint {
            lat: 35.565_342,
            lng: -96.928_917,
        },
    },
    UsState {
        name: "Oregon",
        slug: "oregon",
        center: GeoPoint {
            lat: 43.804_133,
            lng: -120.554_201,
        },
    },
    UsState {
        name: "Pennsylvania",
        slug: "pennsylvania",
        center: GeoPoint {
            lat: 40.590_752,
            lng: -77.209_755,
        },
    },
    UsState {
        name: "Rhode Island",
        slug: "rhode-island",
        center: GeoPoint {
            lat: 41.680_893,
            lng: -71.511_780,
        },
    },
    UsState {
        name: "South Carolina",
        slug: "south-carolina",
        center: GeoPoint {
            lat: 33.856_892,
            lng: -80.945_007,
        },
    },
    UsState {
        name: "South Dakota",
        slug: "south-dakota",
        center: GeoPoint {
            lat: 44.299_782,
            lng: -99.438_828,
        },
    },
    UsState {
        name: "Tennessee",
        slug: "tennessee",
        center: GeoPoint {
            lat: 35.747_845,
            lng: -86.692_345,
        },
    },
    UsState {
        name: "Texas",
        slug: "texas",
        center: GeoPoint {
            lat: 31.054_487,
            lng: -97.563_461,
        },
    },
    UsState {
        name: "Utah",
        slug: "utah",
        center: GeoPoint {
            lat: 40.150_032,
            lng: -111.862_434,
        },
    },
    UsState {
        name: "Vermont",
        slug: "vermont",
        center: GeoPoint {
            lat: 44.045_876,
            lng: -72.710_686,
        },
    },
    UsState {
        name: "Virginia",
        slug: "virginia",
        center: GeoPoint {
            lat: 37.769_337,
            lng: -78.169_968,
        },
    },
    UsState {
        name: "Washington",
        slug: "washington",
        center: GeoPoint {
            lat: 47.400_902,
            lng: -121.490_494,
        },
    },
    UsState {
        name: "West Virginia",
        slug: "west-virginia",
        center: GeoPoint {
            lat: 38.491_226,
            lng: -80.954_453,
        },
    },
    UsState {
        name: "Wisconsin",
        slug: "wisconsin",
        center: GeoPoint {
            lat: 43.784_440,
            lng: -88.787_868,
        },
    },
    UsState {
        name: "Wyoming",
        slug: "wyoming",
        center: GeoPoint {
            lat: 42.755_966,
            lng: -107.302_490,
        },
    },
];

/// Look up a state by its full name (exact, after trimming).
#[must_use]
pub fn state_by_name(name: &str) -> Option<&'static UsState> {
    let name = name.trim();
    US_STATES.iter().find(|s| s.name == name)
}

/// Look up a state by its routing slug, e.g. `"new-york"`.
#[must_use]
pub fn state_by_slug(slug: &str) -> Option<&'static UsState> {
    US_STATES.iter().find(|s| s.slug == slug)
}
