//! Region classification by national dex number.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Kanto,
    Johto,
    Hoenn,
    Sinnoh,
    Unova,
    Kalos,
    Alola,
    Galar,
    Paldea,
    Unknown,
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum RegionError {
    #[error("dex number must be positive, got {0}")]
    NonPositiveId(i64),
}

/// Inclusive upper bound of each region's dex range, ascending.
const REGION_BANDS: [(i64, Region); 9] = [
    (151, Region::Kanto),
    (251, Region::Johto),
    (386, Region::Hoenn),
    (493, Region::Sinnoh),
    (649, Region::Unova),
    (721, Region::Kalos),
    (809, Region::Alola),
    (905, Region::Galar),
    (1025, Region::Paldea),
];

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Kanto => "Kanto",
            Region::Johto => "Johto",
            Region::Hoenn => "Hoenn",
            Region::Sinnoh => "Sinnoh",
            Region::Unova => "Unova",
            Region::Kalos => "Kalos",
            Region::Alola => "Alola",
            Region::Galar => "Galar",
            Region::Paldea => "Paldea",
            Region::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn region_for_id(id: i64) -> Result<Region, RegionError> {
    if id <= 0 {
        return Err(RegionError::NonPositiveId(id));
    }
    Ok(REGION_BANDS
        .iter()
        .find(|(upper, _)| id <= *upper)
        .map(|(_, region)| *region)
        .unwrap_or(Region::Unknown))
}
