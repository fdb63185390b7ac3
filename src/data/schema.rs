//! Column names the dashboard relies on.

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const SMART_LOCATION: &str = "Smart Location";
pub const PRICE: &str = "Price";
pub const PROPERTY_TYPE: &str = "Property Type";
pub const REVIEW_SCORES_VALUE: &str = "Review Scores Value";
pub const NEIGHBOURHOOD_CLEANSED: &str = "Neighbourhood Cleansed";
pub const ROOM_TYPE: &str = "Room Type";
pub const FEATURES: &str = "Features";
pub const AMENITIES: &str = "Amenities";
pub const CITY: &str = "City";
pub const ZIPCODE: &str = "Zipcode";
pub const MARKET: &str = "Market";
pub const COUNTRY_CODE: &str = "Country Code";
pub const COUNTRY: &str = "Country";
pub const NAME: &str = "Name";

pub const FEATURES_COUNT: &str = "Features Count";
pub const AMENITIES_COUNT: &str = "Amenities Count";

/// Columns that must be present in every source file.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    LATITUDE,
    LONGITUDE,
    SMART_LOCATION,
    PRICE,
    PROPERTY_TYPE,
    REVIEW_SCORES_VALUE,
    NEIGHBOURHOOD_CLEANSED,
    ROOM_TYPE,
    FEATURES,
    AMENITIES,
    CITY,
    ZIPCODE,
    MARKET,
    COUNTRY_CODE,
    COUNTRY,
    NAME,
];

/// Header names under which a written-out dataframe index shows up.
pub const INDEX_ARTIFACTS: [&str; 3] = ["Unnamed: 0", "", "__index_level_0__"];

/// Numeric columns never offered on a chart axis.
pub const CONTINUOUS_EXCLUDED: [&str; 2] = [LATITUDE, LONGITUDE];

/// Free-text and identifier columns never offered as categories.
pub const CATEGORICAL_EXCLUDED: [&str; 8] = [
    NAME,
    CITY,
    ZIPCODE,
    MARKET,
    COUNTRY_CODE,
    FEATURES,
    AMENITIES,
    COUNTRY,
];
