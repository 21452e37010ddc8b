use std::{fmt, str::FromStr};

use strum::{EnumIter, IntoEnumIterator};

pub const ECONOMY_IMAGE_BASE: &str = "https://community.cloudflare.steamstatic.com/economy/image/";
pub const ASSETID_PLACEHOLDER: &str = "%assetid%";
pub const OWNER_PLACEHOLDER: &str = "%owner_steamid%";

/// Exterior of a skin, ordered the way steam lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Wear {
    FactoryNew,
    MinimalWear,
    FieldTested,
    WellWorn,
    BattleScarred,
}

impl Wear {
    /// Short code used in the rows, e.g. `FT`.
    pub fn code(&self) -> &'static str {
        match self {
            Wear::FactoryNew => "FN",
            Wear::MinimalWear => "MW",
            Wear::FieldTested => "FT",
            Wear::WellWorn => "WW",
            Wear::BattleScarred => "BS",
        }
    }

    /// Exterior as written inside a market name, without the parentheses.
    pub fn phrase(&self) -> &'static str {
        match self {
            Wear::FactoryNew => "Factory New",
            Wear::MinimalWear => "Minimal Wear",
            Wear::FieldTested => "Field-Tested",
            Wear::WellWorn => "Well-Worn",
            Wear::BattleScarred => "Battle-Scarred",
        }
    }

    /// First exterior whose `(Phrase)` appears in `name`.
    pub fn find_in(name: &str) -> Option<Wear> {
        Wear::iter().find(|w| name.contains(&format!("({})", w.phrase())))
    }
}

impl fmt::Display for Wear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Wear {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        Wear::iter()
            .find(|w| w.code().eq_ignore_ascii_case(s) || w.phrase().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("{} is not a valid exterior.", s))
    }
}

/// (De)serializes `Option<Wear>` as its code, with `""` for no exterior.
pub mod wear_code {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::Wear;

    pub fn serialize<S: Serializer>(wear: &Option<Wear>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(wear.map(|w| w.code()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Wear>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        Wear::from_str(&s).map(Some).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_exterior_in_name() {
        assert_eq!(Wear::find_in("AK-47 | Redline (Field-Tested)"), Some(Wear::FieldTested));
        assert_eq!(Wear::find_in("★ Karambit | Fade (Factory New)"), Some(Wear::FactoryNew));
        assert_eq!(Wear::find_in("Sticker | Titan | Katowice 2014"), None);
        // Without parentheses it is part of the name, not an exterior
        assert_eq!(Wear::find_in("Well-Worn Sticker"), None);
    }

    #[test]
    fn parses_codes_and_phrases() {
        assert_eq!("bs".parse::<Wear>(), Ok(Wear::BattleScarred));
        assert_eq!("Minimal Wear".parse::<Wear>(), Ok(Wear::MinimalWear));
        assert!("Brand New".parse::<Wear>().is_err());
    }
}
