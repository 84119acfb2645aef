use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Cruise;
use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Price,
    Duration,
    #[default]
    DepartureDate,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Price, SortField::Duration, SortField::DepartureDate];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Price => "Price",
            SortField::Duration => "Duration",
            SortField::DepartureDate => "Departure Date",
        }
    }

    /// Query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Duration => "duration",
            SortField::DepartureDate => "departureDate",
        }
    }
}

/// Accepts the query-string values `price`, `duration` and `departureDate`,
/// ignoring ASCII case.
impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownSortOption(s.to_string()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn text(self) -> &'static str {
        match self {
            SortDirection::Asc => "Low to High",
            SortDirection::Desc => "High to Low",
        }
    }
}

/// Accepts `asc` and `desc`, ignoring ASCII case.
impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [SortDirection::Asc, SortDirection::Desc]
            .into_iter()
            .find(|direction| direction.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownSortOption(s.to_string()))
    }
}

/// Active sort selection. Defaults to earliest departure first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header-style selection: the active field flips direction, any other
    /// field starts ascending.
    pub fn toggle(self, field: SortField) -> Self {
        if field == self.field {
            Self::new(field, self.direction.reversed())
        } else {
            Self::new(field, SortDirection::Asc)
        }
    }

    /// e.g. "Price: Low to High".
    pub fn label(&self) -> String {
        format!("{}: {}", self.field.label(), self.direction.text())
    }

    /// Total order over records for this selection.
    ///
    /// Records whose departure date does not parse sort after every dated
    /// record in both directions.
    pub fn compare(&self, a: &Cruise, b: &Cruise) -> Ordering {
        match self.field {
            SortField::Price => self.directed(a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)),
            SortField::Duration => self.directed(a.duration.cmp(&b.duration)),
            SortField::DepartureDate => match (a.departure_millis(), b.departure_millis()) {
                (Some(x), Some(y)) => self.directed(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Entry of the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SortOption {
    pub order: SortOrder,
    pub label: &'static str,
}

pub const SORT_OPTIONS: [SortOption; 6] = [
    SortOption { order: SortOrder { field: SortField::Price, direction: SortDirection::Asc }, label: "Price: Low to High" },
    SortOption { order: SortOrder { field: SortField::Price, direction: SortDirection::Desc }, label: "Price: High to Low" },
    SortOption { order: SortOrder { field: SortField::Duration, direction: SortDirection::Asc }, label: "Duration: Shortest First" },
    SortOption { order: SortOrder { field: SortField::Duration, direction: SortDirection::Desc }, label: "Duration: Longest First" },
    SortOption { order: SortOrder { field: SortField::DepartureDate, direction: SortDirection::Asc }, label: "Date: Earliest First" },
    SortOption { order: SortOrder { field: SortField::DepartureDate, direction: SortDirection::Desc }, label: "Date: Latest First" },
];

/// Returns a sorted copy of `cruises`. The sort is stable, so equal keys keep
/// their source order.
pub fn sort_cruises(cruises: &[Cruise], order: SortOrder) -> Vec<Cruise> {
    let mut sorted = cruises.to_vec();
    sorted.sort_by(|a, b| order.compare(a, b));
    sorted
}
