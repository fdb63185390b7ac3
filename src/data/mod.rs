/// Data layer: core types, loading, preparation and filtering.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ListingsTable (kinds inferred)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  prepare  │  schema check, derived counts, integer ratings
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  columns  │  classify columns → OptionCatalog, Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  exact-match predicates → row indices
///   └──────────┘
/// ```

pub mod columns;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod prepare;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_support {
    use super::columns::Dataset;
    use super::loader::read_csv;
    use super::model::ListingsTable;
    use super::prepare::prepare;

    pub const HEADER: &str = ",Name,Neighbourhood Cleansed,City,Zipcode,Market,Smart Location,\
Country Code,Country,Latitude,Longitude,Property Type,Room Type,Accommodates,Bathrooms,\
Bedrooms,Beds,Amenities,Price,Number of Reviews,Review Scores Value,Cancellation Policy,Features";

    const ROWS: [&str; 4] = [
        r#"0,Cosy flat,Lambeth,London,SE11,London,"London, United Kingdom",GB,United Kingdom,51.49,-0.11,Apartment,Entire home/apt,2,1.0,1,1,"TV,Wifi,Kitchen",85,12,8.0,moderate,"Wifi,TV""#,
        r#"1,Loft Marais,Temple,Paris,75003,Paris,"Paris, France",FR,France,48.86,2.36,Loft,Private room,3,1.5,2,2,Wifi,120,40,9.5,strict,"Host Is Superhost,Is Location Exact,Instant Bookable""#,
        r#"2,Garden house,Hackney,London,E8,London,"London, United Kingdom",GB,United Kingdom,51.54,-0.06,House,Entire home/apt,6,2.0,3,4,"Wifi,Garden,Kitchen,Heating",210,3,10.0,flexible,"#,
        r#"3,Spare room,Lambeth,London,SW9,London,"London, United Kingdom",GB,United Kingdom,51.47,-0.12,Apartment,Private room,1,1.0,1,1,Wifi,40,55,9.0,moderate,Is Location Exact"#,
    ];

    /// Three London listings and one Paris listing, pandas-style index first.
    pub fn sample_csv() -> String {
        csv_with_rows(&[0, 1, 2, 3])
    }

    /// The first London listing and the Paris listing only.
    pub fn two_city_csv() -> String {
        csv_with_rows(&[0, 1])
    }

    fn csv_with_rows(rows: &[usize]) -> String {
        let mut out = String::from(HEADER);
        for &i in rows {
            out.push('\n');
            out.push_str(ROWS[i]);
        }
        out.push('\n');
        out
    }

    pub fn raw_table(csv: &str) -> ListingsTable {
        read_csv(csv.as_bytes()).expect("fixture CSV parses")
    }

    pub fn sample_table() -> ListingsTable {
        prepare(raw_table(&sample_csv())).expect("fixture CSV prepares")
    }

    pub fn sample_dataset() -> Dataset {
        Dataset::new(sample_table())
    }
}
