use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::AppError;

/// One of the twelve first-level administrative regions shown on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum City {
    Berat,
    Durres,
    Elbasan,
    Fier,
    Gjirokaster,
    Korce,
    Kukes,
    Lezhe,
    Diber,
    Shkoder,
    Tirane,
    Vlore,
}

// (region id on the map, canonical city id, display name)
static TABLE: [(City, &str, &str, &str); 12] = [
    (City::Berat, "AL01", "berat", "Berat"),
    (City::Durres, "AL02", "durres", "Durres"),
    (City::Elbasan, "AL03", "elbasan", "Elbasan"),
    (City::Fier, "AL04", "fier", "Fier"),
    (City::Gjirokaster, "AL05", "gjirokaster", "Gjirokaster"),
    (City::Korce, "AL06", "korce", "Korce"),
    (City::Kukes, "AL07", "kukes", "Kukes"),
    (City::Lezhe, "AL08", "lezhe", "Lezhe"),
    (City::Diber, "AL09", "diber", "Diber"),
    (City::Shkoder, "AL10", "shkoder", "Shkoder"),
    (City::Tirane, "AL11", "tirane", "Tirane"),
    (City::Vlore, "AL12", "vlore", "Vlore"),
];

impl City {
    /// All cities in region-code order.
    pub const ALL: [City; 12] = [
        City::Berat,
        City::Durres,
        City::Elbasan,
        City::Fier,
        City::Gjirokaster,
        City::Korce,
        City::Kukes,
        City::Lezhe,
        City::Diber,
        City::Shkoder,
        City::Tirane,
        City::Vlore,
    ];

    fn entry(self) -> &'static (City, &'static str, &'static str, &'static str) {
        // TABLE is ordered like the enum
        &TABLE[self as usize]
    }

    /// Map element identifier, e.g. `AL11`.
    pub fn region_id(self) -> &'static str {
        self.entry().1
    }

    /// Stable lowercase key, e.g. `tirane`.
    pub fn id(self) -> &'static str {
        self.entry().2
    }

    /// Name sent to the weather API and shown to the user.
    pub fn display_name(self) -> &'static str {
        self.entry().3
    }

    /// Exact lookup of a map element identifier.
    pub fn from_region_id(id: &str) -> Option<City> {
        TABLE
            .iter()
            .find(|(_, region, _, _)| *region == id)
            .map(|(city, _, _, _)| *city)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for City {
    type Err = AppError;

    /// Accepts a city id, a display name (any case) or a region code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        TABLE
            .iter()
            .find(|(_, region, id, name)| {
                *region == needle
                    || id.eq_ignore_ascii_case(needle)
                    || name.eq_ignore_ascii_case(needle)
            })
            .map(|(city, _, _, _)| *city)
            .ok_or_else(|| AppError::UnresolvedCity(needle.to_string()))
    }
}

/// Resolve a click to a city.
///
/// `candidates` are the identifiers of the clicked element and its ancestors,
/// innermost first. The first identifier found in the region table wins.
/// Returns `None` when the chain is exhausted without a match.
pub fn resolve_region<I, S>(candidates: I) -> Option<City>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for candidate in candidates {
        let id = candidate.as_ref();
        if id.is_empty() {
            continue;
        }
        if let Some(city) = City::from_region_id(id) {
            debug!("Clicked on: {}", city.id());
            return Some(city);
        }
    }

    warn!("No city found for the clicked element");
    None
}
