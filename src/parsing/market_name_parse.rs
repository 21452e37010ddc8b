use std::sync::LazyLock;

use regex::Regex;

use crate::models::{
    item_metadata::{Wear, ASSETID_PLACEHOLDER, OWNER_PLACEHOLDER},
    steam::{RawAction, RawDescription},
};

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pattern #(\d{1,4})").expect("pattern regex is valid")
});

static WEAR_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\((Factory New|Minimal Wear|Field-Tested|Well-Worn|Battle-Scarred)\)\s*")
        .expect("wear regex is valid")
});

/// market_hash_name, then market_name, then name. First one that isn't empty.
pub fn market_identifier(desc: &RawDescription) -> &str {
    [&desc.market_hash_name, &desc.market_name, &desc.name]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(|s| s.as_str())
        .unwrap_or("")
}

pub fn display_name(desc: &RawDescription) -> &str {
    if desc.name.is_empty() { market_identifier(desc) } else { &desc.name }
}

/// `"AK-47 | Redline (Field-Tested)"` -> `"AK-47 | Redline"`
pub fn name_without_wear(name: &str) -> String {
    WEAR_SUFFIX.replace_all(name, " ").trim().to_string()
}

/// `"... Pattern #317"` -> `"#317"`, empty when the name carries no pattern.
pub fn pattern_label(name: &str) -> String {
    PATTERN.captures(name)
        .and_then(|c| c.get(1))
        .map(|m| format!("#{}", m.as_str()))
        .unwrap_or_default()
}

pub fn image_url(desc: &RawDescription, base: &str) -> String {
    let icon = if !desc.icon_url_large.is_empty() { &desc.icon_url_large } else { &desc.icon_url };
    if icon.is_empty() { String::new() } else { format!("{}{}", base, icon) }
}

/// Fills the first action link that has an `%assetid%` slot.
///
/// `%owner_steamid%` is only replaced when the owner is known, otherwise it is left as is.
pub fn inspect_link(actions: Option<&[RawAction]>, asset_id: &str, owner: Option<u64>) -> String {
    let Some(template) = actions
        .unwrap_or_default()
        .iter()
        .find(|a| a.link.contains(ASSETID_PLACEHOLDER))
    else {
        return String::new();
    };

    let link = template.link.replace(ASSETID_PLACEHOLDER, asset_id);
    match owner {
        Some(steamid) => link.replace(OWNER_PLACEHOLDER, &steamid.to_string()),
        None => link,
    }
}

pub fn wear_of(desc: &RawDescription) -> Option<Wear> {
    Wear::find_in(market_identifier(desc)).or_else(|| Wear::find_in(display_name(desc)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSGO_INSPECT: &str = "steam://rungame/730/76561202255233023/+csgo_econ_action_preview%20S%owner_steamid%A%assetid%D9279926981479153949";

    fn desc(hash: &str, market: &str, name: &str) -> RawDescription {
        RawDescription {
            market_hash_name: hash.into(),
            market_name: market.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn identifier_falls_back_in_order() {
        assert_eq!(market_identifier(&desc("a", "b", "c")), "a");
        assert_eq!(market_identifier(&desc("", "b", "c")), "b");
        assert_eq!(market_identifier(&desc("", "", "c")), "c");
        assert_eq!(market_identifier(&desc("", "", "")), "");
        assert_eq!(display_name(&desc("AWP | Asiimov (Field-Tested)", "", "")), "AWP | Asiimov (Field-Tested)");
    }

    #[test]
    fn strips_wear_from_name() {
        assert_eq!(name_without_wear("AK-47 | Redline (Field-Tested)"), "AK-47 | Redline");
        assert_eq!(name_without_wear("StatTrak™ M4A4 | Howl (Minimal Wear)"), "StatTrak™ M4A4 | Howl");
        assert_eq!(name_without_wear("Sticker | Crown (Foil)"), "Sticker | Crown (Foil)");
        assert_eq!(name_without_wear("  Operation Breakout Weapon Case "), "Operation Breakout Weapon Case");
    }

    #[test]
    fn pattern_is_case_insensitive() {
        assert_eq!(pattern_label("Five-SeveN | Case Hardened Pattern #317"), "#317");
        assert_eq!(pattern_label("karambit | case hardened PATTERN #661"), "#661");
        assert_eq!(pattern_label("AK-47 | Redline (Field-Tested)"), "");
        assert_eq!(pattern_label("Pattern #"), "");
    }

    #[test]
    fn image_prefers_large_icon() {
        let mut d = desc("x", "", "");
        assert_eq!(image_url(&d, "https://cdn/"), "");

        d.icon_url = "small".into();
        assert_eq!(image_url(&d, "https://cdn/"), "https://cdn/small");

        d.icon_url_large = "large".into();
        assert_eq!(image_url(&d, "https://cdn/"), "https://cdn/large");
    }

    #[test]
    fn inspect_link_substitutes_asset_and_owner() {
        let actions = vec![
            RawAction { link: "https://wiki.example/item".into(), name: "Wiki".into() },
            RawAction { link: CSGO_INSPECT.into(), name: "Inspect in Game...".into() },
        ];

        let anon = inspect_link(Some(&actions), "999", None);
        assert!(anon.contains("A999D"));
        assert!(anon.contains(OWNER_PLACEHOLDER));

        let owned = inspect_link(Some(&actions), "999", Some(76561198389123475));
        assert!(owned.contains("S76561198389123475A999D"));

        assert_eq!(inspect_link(Some(&actions[..1]), "999", None), "");
        assert_eq!(inspect_link(None, "999", None), "");
    }

    #[test]
    fn wear_checks_identifier_then_display_name() {
        assert_eq!(wear_of(&desc("AK-47 | Redline (Field-Tested)", "", "")), Some(Wear::FieldTested));
        assert_eq!(wear_of(&desc("Souvenir Package", "", "Thing (Well-Worn)")), Some(Wear::WellWorn));
        assert_eq!(wear_of(&desc("Clutch Case", "", "Clutch Case")), None);
    }
}
