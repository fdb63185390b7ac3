use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Pick from `(item, weight)` pairs.
    fn weighted<'a>(&mut self, items: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for &(item, weight) in items {
            if roll < weight {
                return item;
            }
            roll -= weight;
        }
        items[items.len() - 1].0
    }

    /// A random subset of `pool`, comma-joined in pool order.
    fn subset(&mut self, pool: &[&str], p: f64) -> String {
        pool.iter()
            .filter(|_| self.next_f64() < p)
            .copied()
            .collect::<Vec<_>>()
            .join(",")
    }
}

struct CityProfile {
    city: &'static str,
    market: &'static str,
    smart_location: &'static str,
    country_code: &'static str,
    country: &'static str,
    centre: (f64, f64),
    neighbourhoods: &'static [(&'static str, &'static str)],
    listings: usize,
    price_scale: f64,
}

const CITIES: [CityProfile; 2] = [
    CityProfile {
        city: "London",
        market: "London",
        smart_location: "London, United Kingdom",
        country_code: "GB",
        country: "United Kingdom",
        centre: (51.507, -0.128),
        neighbourhoods: &[
            ("Westminster", "SW1"),
            ("Camden", "NW1"),
            ("Hackney", "E8"),
            ("Lambeth", "SE11"),
            ("Islington", "N1"),
            ("Tower Hamlets", "E1"),
            ("Kensington and Chelsea", "SW3"),
        ],
        listings: 600,
        price_scale: 1.0,
    },
    CityProfile {
        city: "Paris",
        market: "Paris",
        smart_location: "Paris, France",
        country_code: "FR",
        country: "France",
        centre: (48.857, 2.352),
        neighbourhoods: &[
            ("Temple", "75003"),
            ("Louvre", "75001"),
            ("Buttes-Montmartre", "75018"),
            ("Popincourt", "75011"),
            ("Panthéon", "75005"),
            ("Batignolles-Monceau", "75017"),
        ],
        listings: 400,
        price_scale: 1.15,
    },
];

const PROPERTY_TYPES: [(&str, f64); 6] = [
    ("Apartment", 88.0),
    ("House", 6.0),
    ("Loft", 2.5),
    ("Townhouse", 1.5),
    ("Guesthouse", 1.0),
    ("Condominium", 1.0),
];

const ROOM_TYPES: [(&str, f64); 3] = [
    ("Entire home/apt", 75.0),
    ("Private room", 24.0),
    ("Shared room", 1.0),
];

const CANCELLATION: [(&str, f64); 3] = [("moderate", 45.0), ("flexible", 33.0), ("strict", 22.0)];

const AMENITIES: [&str; 10] = [
    "TV",
    "Wifi",
    "Kitchen",
    "Heating",
    "Washer",
    "Essentials",
    "Shampoo",
    "Hair dryer",
    "Iron",
    "Elevator",
];

const FEATURES: [&str; 5] = [
    "Host Is Superhost",
    "Host Has Profile Pic",
    "Host Identity Verified",
    "Is Location Exact",
    "Instant Bookable",
];

const NAME_WORDS: [&str; 8] = [
    "Cosy", "Bright", "Quiet", "Central", "Charming", "Spacious", "Modern", "Sunny",
];

#[derive(Default)]
struct Columns {
    name: Vec<String>,
    neighbourhood: Vec<String>,
    city: Vec<String>,
    zipcode: Vec<String>,
    market: Vec<String>,
    smart_location: Vec<String>,
    country_code: Vec<String>,
    country: Vec<String>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    property_type: Vec<String>,
    room_type: Vec<String>,
    accommodates: Vec<i64>,
    bathrooms: Vec<f64>,
    bedrooms: Vec<i64>,
    beds: Vec<i64>,
    amenities: Vec<String>,
    price: Vec<i64>,
    number_of_reviews: Vec<i64>,
    review_scores_value: Vec<f64>,
    cancellation_policy: Vec<String>,
    features: Vec<String>,
}

const HEADER: [&str; 23] = [
    "",
    "Name",
    "Neighbourhood Cleansed",
    "City",
    "Zipcode",
    "Market",
    "Smart Location",
    "Country Code",
    "Country",
    "Latitude",
    "Longitude",
    "Property Type",
    "Room Type",
    "Accommodates",
    "Bathrooms",
    "Bedrooms",
    "Beds",
    "Amenities",
    "Price",
    "Number of Reviews",
    "Review Scores Value",
    "Cancellation Policy",
    "Features",
];

fn generate(rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns::default();

    for profile in &CITIES {
        for _ in 0..profile.listings {
            let (neighbourhood, zipcode) = profile.neighbourhoods[rng.below(profile.neighbourhoods.len())];
            let property = rng.weighted(&PROPERTY_TYPES);
            let room = rng.weighted(&ROOM_TYPES);

            let accommodates = (rng.gauss(3.0, 1.5).round() as i64).clamp(1, 16);
            let bedrooms = ((accommodates + 1) / 2).max(1);
            let beds = (bedrooms + rng.below(2) as i64).min(accommodates);
            let bathrooms = 1.0 + 0.5 * rng.below(3) as f64;

            let base = 35.0 + 28.0 * accommodates as f64;
            let room_factor = match room {
                "Private room" => 0.5,
                "Shared room" => 0.3,
                _ => 1.0,
            };
            let price = (rng.gauss(base, base * 0.25) * room_factor * profile.price_scale)
                .round()
                .max(15.0) as i64;

            let rating = rng.gauss(9.3, 0.7).round().clamp(6.0, 10.0);

            cols.name.push(format!(
                "{} {} in {}",
                NAME_WORDS[rng.below(NAME_WORDS.len())],
                property.to_lowercase(),
                neighbourhood
            ));
            cols.neighbourhood.push(neighbourhood.to_string());
            cols.city.push(profile.city.to_string());
            cols.zipcode.push(zipcode.to_string());
            cols.market.push(profile.market.to_string());
            cols.smart_location.push(profile.smart_location.to_string());
            cols.country_code.push(profile.country_code.to_string());
            cols.country.push(profile.country.to_string());
            cols.latitude.push(profile.centre.0 + rng.gauss(0.0, 0.03));
            cols.longitude.push(profile.centre.1 + rng.gauss(0.0, 0.05));
            cols.property_type.push(property.to_string());
            cols.room_type.push(room.to_string());
            cols.accommodates.push(accommodates);
            cols.bathrooms.push(bathrooms);
            cols.bedrooms.push(bedrooms);
            cols.beds.push(beds);
            cols.amenities.push(rng.subset(&AMENITIES, 0.6));
            cols.price.push(price);
            cols.number_of_reviews.push((rng.gauss(0.0, 40.0).abs()) as i64);
            cols.review_scores_value.push(rating);
            cols.cancellation_policy.push(rng.weighted(&CANCELLATION).to_string());
            cols.features.push(rng.subset(&FEATURES, 0.4));
        }
    }

    cols
}

fn write_csv(cols: &Columns, path: &str) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;

    for i in 0..cols.name.len() {
        writer.write_record([
            i.to_string(),
            cols.name[i].clone(),
            cols.neighbourhood[i].clone(),
            cols.city[i].clone(),
            cols.zipcode[i].clone(),
            cols.market[i].clone(),
            cols.smart_location[i].clone(),
            cols.country_code[i].clone(),
            cols.country[i].clone(),
            format!("{:.5}", cols.latitude[i]),
            format!("{:.5}", cols.longitude[i]),
            cols.property_type[i].clone(),
            cols.room_type[i].clone(),
            cols.accommodates[i].to_string(),
            format!("{:.1}", cols.bathrooms[i]),
            cols.bedrooms[i].to_string(),
            cols.beds[i].to_string(),
            cols.amenities[i].clone(),
            cols.price[i].to_string(),
            cols.number_of_reviews[i].to_string(),
            format!("{:.1}", cols.review_scores_value[i]),
            cols.cancellation_policy[i].clone(),
            cols.features[i].clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn text(values: &[String]) -> ArrayRef {
    Arc::new(StringArray::from(
        values.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    ))
}

/// Empty lists become nulls, the way pandas writes a missing string.
fn optional_text(values: &[String]) -> ArrayRef {
    Arc::new(StringArray::from(
        values
            .iter()
            .map(|s| (!s.is_empty()).then_some(s.as_str()))
            .collect::<Vec<_>>(),
    ))
}

fn write_parquet(cols: &Columns, path: &str) -> anyhow::Result<()> {
    let index: Vec<i64> = (0..cols.name.len() as i64).collect();

    let columns: Vec<(&str, DataType, bool, ArrayRef)> = vec![
        ("__index_level_0__", DataType::Int64, false, Arc::new(Int64Array::from(index))),
        ("Name", DataType::Utf8, false, text(&cols.name)),
        ("Neighbourhood Cleansed", DataType::Utf8, false, text(&cols.neighbourhood)),
        ("City", DataType::Utf8, false, text(&cols.city)),
        ("Zipcode", DataType::Utf8, false, text(&cols.zipcode)),
        ("Market", DataType::Utf8, false, text(&cols.market)),
        ("Smart Location", DataType::Utf8, false, text(&cols.smart_location)),
        ("Country Code", DataType::Utf8, false, text(&cols.country_code)),
        ("Country", DataType::Utf8, false, text(&cols.country)),
        ("Latitude", DataType::Float64, false, Arc::new(Float64Array::from(cols.latitude.clone()))),
        ("Longitude", DataType::Float64, false, Arc::new(Float64Array::from(cols.longitude.clone()))),
        ("Property Type", DataType::Utf8, false, text(&cols.property_type)),
        ("Room Type", DataType::Utf8, false, text(&cols.room_type)),
        ("Accommodates", DataType::Int64, false, Arc::new(Int64Array::from(cols.accommodates.clone()))),
        ("Bathrooms", DataType::Float64, false, Arc::new(Float64Array::from(cols.bathrooms.clone()))),
        ("Bedrooms", DataType::Int64, false, Arc::new(Int64Array::from(cols.bedrooms.clone()))),
        ("Beds", DataType::Int64, false, Arc::new(Int64Array::from(cols.beds.clone()))),
        ("Amenities", DataType::Utf8, true, optional_text(&cols.amenities)),
        ("Price", DataType::Int64, false, Arc::new(Int64Array::from(cols.price.clone()))),
        ("Number of Reviews", DataType::Int64, false, Arc::new(Int64Array::from(cols.number_of_reviews.clone()))),
        ("Review Scores Value", DataType::Float64, false, Arc::new(Float64Array::from(cols.review_scores_value.clone()))),
        ("Cancellation Policy", DataType::Utf8, false, text(&cols.cancellation_policy)),
        ("Features", DataType::Utf8, true, optional_text(&cols.features)),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, ty, nullable, _)| Field::new(*name, ty.clone(), *nullable))
            .collect::<Vec<_>>(),
    ));
    let arrays = columns.into_iter().map(|(_, _, _, array)| array).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let cols = generate(&mut rng);

    let csv_path = "airbnb-dataset.csv";
    write_csv(&cols, csv_path)?;

    let parquet_path = "airbnb-dataset.parquet";
    write_parquet(&cols, parquet_path)?;

    println!(
        "Wrote {} listings to {csv_path} and {parquet_path}",
        cols.name.len()
    );
    Ok(())
}
