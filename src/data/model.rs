use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the listings table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// Used as a `HashMap` key and sorted downstream, so it must be `Eq` + `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so CellValue can be grouped and sorted --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

/// Missing values print as `nan`, the way a dataframe stringifies them.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            CellValue::Null => write!(f, "nan"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` for plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column kinds
// ---------------------------------------------------------------------------

/// Inferred storage kind of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Infer a kind from already-typed cells.
    ///
    /// * all non-null integers, no nulls → `Integer`
    /// * all non-null numbers (nulls allowed) → `Float`
    /// * all booleans, no nulls → `Bool`
    /// * anything else → `Text`
    pub fn infer<'a>(cells: impl Iterator<Item = &'a CellValue>) -> Self {
        let mut has_null = false;
        let mut all_int = true;
        let mut all_num = true;
        let mut all_bool = true;

        for cell in cells {
            match cell {
                CellValue::Null => has_null = true,
                CellValue::Integer(_) => all_bool = false,
                CellValue::Float(_) => {
                    all_int = false;
                    all_bool = false;
                }
                CellValue::Bool(_) => {
                    all_int = false;
                    all_num = false;
                }
                CellValue::Text(_) => {
                    all_int = false;
                    all_num = false;
                    all_bool = false;
                }
            }
        }

        if all_num && all_bool {
            // Only nulls (or nothing at all).
            return ColumnKind::Float;
        }
        if all_int && !has_null {
            ColumnKind::Integer
        } else if all_num {
            ColumnKind::Float
        } else if all_bool && !has_null {
            ColumnKind::Bool
        } else {
            ColumnKind::Text
        }
    }

    /// Convert a cell so it agrees with this column kind.
    pub fn normalize(self, cell: CellValue) -> CellValue {
        match (self, cell) {
            (_, CellValue::Null) => CellValue::Null,
            (ColumnKind::Float, CellValue::Integer(i)) => CellValue::Float(i as f64),
            (ColumnKind::Text, CellValue::Text(s)) => CellValue::Text(s),
            (ColumnKind::Text, other) => CellValue::Text(other.to_string()),
            (_, other) => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the table
// ---------------------------------------------------------------------------

/// A single rental listing (one row of the source table).
#[derive(Debug, Clone, Default)]
pub struct Listing {
    /// Column name → value.
    pub fields: BTreeMap<String, CellValue>,
}

impl Listing {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }
}

// ---------------------------------------------------------------------------
// ListingsTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with column order and inferred kinds.
#[derive(Debug, Clone, Default)]
pub struct ListingsTable {
    /// All listings (rows).
    pub listings: Vec<Listing>,
    /// Column names in source order.
    pub column_names: Vec<String>,
    /// Inferred kind of every column.
    pub column_kinds: BTreeMap<String, ColumnKind>,
}

impl ListingsTable {
    /// Build a table from row-major records whose cells line up with
    /// `column_names`. Column kinds are inferred and every cell is
    /// normalised to its column's kind.
    pub fn from_records(column_names: Vec<String>, records: Vec<Vec<CellValue>>) -> Self {
        let mut column_kinds = BTreeMap::new();
        for (idx, name) in column_names.iter().enumerate() {
            let kind = ColumnKind::infer(records.iter().filter_map(|r| r.get(idx)));
            column_kinds.insert(name.clone(), kind);
        }

        let listings = records
            .into_iter()
            .map(|record| {
                let mut fields = BTreeMap::new();
                for (idx, name) in column_names.iter().enumerate() {
                    let cell = record.get(idx).cloned().unwrap_or(CellValue::Null);
                    fields.insert(name.clone(), column_kinds[name].normalize(cell));
                }
                Listing { fields }
            })
            .collect();

        ListingsTable {
            listings,
            column_names,
            column_kinds,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_kinds.contains_key(column)
    }

    pub fn kind(&self, column: &str) -> Option<ColumnKind> {
        self.column_kinds.get(column).copied()
    }

    /// Cell at `row` / `column`, `None` when either is out of range.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.listings.get(row)?.get(column)
    }

    /// Every cell of a column in row order (empty if the column is unknown).
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
        self.listings.iter().filter_map(move |l| l.get(column))
    }

    /// Distinct values of a column in order of first appearance.
    pub fn distinct_values(&self, column: &str) -> Vec<CellValue> {
        self.value_counts(column)
            .into_iter()
            .map(|(value, _)| value)
            .collect()
    }

    /// Frequency of every distinct value (missing values included), in
    /// order of first appearance.
    pub fn value_counts(&self, column: &str) -> Vec<(CellValue, usize)> {
        let mut slots: HashMap<&CellValue, usize> = HashMap::new();
        let mut counts: Vec<(CellValue, usize)> = Vec::new();
        for value in self.column_values(column) {
            match slots.get(value) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(value, counts.len());
                    counts.push((value.clone(), 1));
                }
            }
        }
        counts
    }

    /// Append a derived column. `values` must hold one cell per row.
    pub fn push_column(&mut self, name: &str, values: Vec<CellValue>) {
        let kind = ColumnKind::infer(values.iter());
        for (listing, value) in self.listings.iter_mut().zip(values) {
            listing.fields.insert(name.to_string(), kind.normalize(value));
        }
        if !self.has_column(name) {
            self.column_names.push(name.to_string());
        }
        self.column_kinds.insert(name.to_string(), kind);
    }

    /// Remove a column; returns whether it existed.
    pub fn drop_column(&mut self, name: &str) -> bool {
        if self.column_kinds.remove(name).is_none() {
            return false;
        }
        self.column_names.retain(|c| c != name);
        for listing in &mut self.listings {
            listing.fields.remove(name);
        }
        true
    }

    /// Replace every cell of an existing column and record its new kind.
    pub fn replace_column(&mut self, name: &str, kind: ColumnKind, values: Vec<CellValue>) {
        for (listing, value) in self.listings.iter_mut().zip(values) {
            listing.fields.insert(name.to_string(), value);
        }
        self.column_kinds.insert(name.to_string(), kind);
    }
}
