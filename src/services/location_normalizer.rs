use crate::models::location::{LocationEntry, LocationKind};
use crate::services::text_cleaner;
use once_cell::sync::Lazy;
use regex::Regex;

/// Region -> members. Declaration order is semantic: a country listed in two
/// regions (Brazil sits in both Americas and LATAM) resolves to the first one.
/// Members that are themselves regions (EMEA -> Europe) stay regions when
/// expanded, one level deep.
const REGION_MAPPINGS: &[(&str, &[&str])] = &[
    ("EMEA", &["Europe", "Middle East", "Africa"]),
    (
        "Europe",
        &[
            "Austria", "Belgium", "Bulgaria", "Croatia", "Cyprus", "Czech Republic", "Denmark",
            "Estonia", "Finland", "France", "Germany", "Greece", "Hungary", "Ireland", "Italy",
            "Latvia", "Lithuania", "Luxembourg", "Malta", "Netherlands", "Poland", "Portugal",
            "Romania", "Slovakia", "Slovenia", "Spain", "Sweden", "UK", "United Kingdom",
            "Norway", "Switzerland", "Iceland", "Ukraine", "Georgia",
        ],
    ),
    (
        "Americas",
        &[
            "USA", "United States", "Canada", "Mexico", "Brazil", "Argentina", "Chile",
            "Colombia", "Peru", "Venezuela", "Uruguay", "Paraguay", "Northern America",
            "South America",
        ],
    ),
    (
        "Asia",
        &[
            "China", "Japan", "India", "Singapore", "South Korea", "Thailand", "Vietnam",
            "Malaysia", "Indonesia", "Philippines", "Pakistan", "Bangladesh",
        ],
    ),
    ("APAC", &["Asia", "Australia", "New Zealand"]),
    (
        "LATAM",
        &[
            "Brazil", "Argentina", "Chile", "Colombia", "Peru", "Mexico", "Venezuela", "Uruguay",
        ],
    ),
    (
        "Middle East",
        &[
            "United Arab Emirates", "Saudi Arabia", "Qatar", "Kuwait", "Israel", "Turkey",
        ],
    ),
    ("Africa", &["South Africa", "Nigeria", "Kenya", "Egypt", "Morocco"]),
];

const COUNTRY_SYNONYMS: &[(&str, &str)] = &[
    ("UK", "United Kingdom"),
    ("USA", "United States"),
    ("U.S.", "United States"),
    ("U.S.A.", "United States"),
    ("UAE", "United Arab Emirates"),
];

const VAGUE_TERMS: &[&str] = &["worldwide", "remote", "flexible", "global", "anywhere"];

static TIMEZONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(CET|EST|PST|GMT|UTC|timezone)").unwrap());
static EUROPE_TZ_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)CET|GMT|UTC").unwrap());
static AMERICAS_TZ_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)EST|PST|CST").unwrap());
static PART_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[,&]|\s+and\s+").unwrap());

/// Parse a free-text location string into canonical location entries.
///
/// Decision order: empty -> Worldwide; vague wording -> Worldwide; timezone
/// wording -> a single timezone entry with a best-guess region; otherwise the
/// string is split into parts and each part resolved as region or country.
pub fn normalize(raw: Option<&str>) -> Vec<LocationEntry> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => text_cleaner::clean_text(s),
        _ => return vec![LocationEntry::worldwide()],
    };

    if is_vague(&raw) {
        return vec![LocationEntry::worldwide()];
    }

    if TIMEZONE_RE.is_match(&raw) {
        return vec![timezone_entry(&raw)];
    }

    let mut entries: Vec<LocationEntry> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for part in PART_SPLIT_RE.split(&raw) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        for entry in normalize_part(part) {
            if !seen.contains(&entry.name) {
                seen.push(entry.name.clone());
                entries.push(entry);
            }
        }
    }

    if entries.is_empty() {
        return vec![LocationEntry::worldwide()];
    }
    entries
}

fn is_vague(location: &str) -> bool {
    let lower = location.to_lowercase();
    VAGUE_TERMS.iter().any(|term| lower.contains(term))
}

fn timezone_entry(location: &str) -> LocationEntry {
    let name = if EUROPE_TZ_RE.is_match(location) {
        "Europe"
    } else if AMERICAS_TZ_RE.is_match(location) {
        "Americas"
    } else {
        "Worldwide"
    };
    LocationEntry {
        name: name.to_string(),
        kind: LocationKind::Timezone,
        region_parent: None,
        timezone_based: true,
    }
}

fn normalize_part(part: &str) -> Vec<LocationEntry> {
    let name = COUNTRY_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == part)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(part);

    if let Some(members) = region_members(name) {
        let mut result = vec![LocationEntry {
            name: name.to_string(),
            kind: LocationKind::Region,
            region_parent: None,
            timezone_based: false,
        }];
        for member in members {
            let kind = if region_members(member).is_some() {
                LocationKind::Region
            } else {
                LocationKind::Country
            };
            result.push(LocationEntry {
                name: member.to_string(),
                kind,
                region_parent: Some(name.to_string()),
                timezone_based: false,
            });
        }
        return result;
    }

    vec![LocationEntry {
        name: name.to_string(),
        kind: LocationKind::Country,
        region_parent: region_for_country(name).map(str::to_string),
        timezone_based: false,
    }]
}

fn region_members(name: &str) -> Option<&'static [&'static str]> {
    REGION_MAPPINGS
        .iter()
        .find(|(region, _)| *region == name)
        .map(|(_, members)| *members)
}

/// First region whose member list contains the country, in declaration order.
fn region_for_country(country: &str) -> Option<&'static str> {
    REGION_MAPPINGS
        .iter()
        .find(|(_, members)| members.contains(&country))
        .map(|(region, _)| *region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_worldwide() {
        assert_eq!(normalize(None), vec![LocationEntry::worldwide()]);
        assert_eq!(normalize(Some("")), vec![LocationEntry::worldwide()]);
        assert_eq!(normalize(Some("   ")), vec![LocationEntry::worldwide()]);
    }

    #[test]
    fn vague_terms_are_worldwide() {
        for input in ["Remote", "Anywhere", "Fully remote (global)", "Flexible / Worldwide"] {
            let entries = normalize(Some(input));
            assert_eq!(entries, vec![LocationEntry::worldwide()], "input {:?}", input);
        }
    }

    #[test]
    fn vague_term_wins_over_other_content() {
        assert_eq!(
            normalize(Some("Remote - France")),
            vec![LocationEntry::worldwide()]
        );
    }

    #[test]
    fn timezone_locations_guess_a_region() {
        let cet = normalize(Some("CET +/- 2 hours"));
        assert_eq!(cet.len(), 1);
        assert_eq!(cet[0].name, "Europe");
        assert_eq!(cet[0].kind, LocationKind::Timezone);
        assert!(cet[0].timezone_based);

        let est = normalize(Some("EST working hours"));
        assert_eq!(est[0].name, "Americas");
        assert!(est[0].timezone_based);
    }

    #[test]
    fn country_pair_resolves_region_parents() {
        let entries = normalize(Some("France, Germany"));
        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert_eq!(entry.kind, LocationKind::Country);
            assert_eq!(entry.region_parent.as_deref(), Some("Europe"));
        }
        assert_eq!(entries[0].name, "France");
        assert_eq!(entries[1].name, "Germany");
    }

    #[test]
    fn splits_on_ampersand_and_the_word_and() {
        let entries = normalize(Some("France & Germany and Spain"));
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["France", "Germany", "Spain"]);
    }

    #[test]
    fn emea_expands_to_sub_regions_not_countries() {
        let entries = normalize(Some("EMEA"));
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["EMEA", "Europe", "Middle East", "Africa"]);
        assert_eq!(entries[0].kind, LocationKind::Region);
        for sub in &entries[1..] {
            assert_eq!(sub.kind, LocationKind::Region, "{} stays a region", sub.name);
            assert_eq!(sub.region_parent.as_deref(), Some("EMEA"));
        }
    }

    #[test]
    fn region_expands_members_to_countries() {
        let entries = normalize(Some("LATAM"));
        assert_eq!(entries[0].name, "LATAM");
        assert_eq!(entries[0].kind, LocationKind::Region);
        let brazil = entries.iter().find(|e| e.name == "Brazil").unwrap();
        assert_eq!(brazil.kind, LocationKind::Country);
        assert_eq!(brazil.region_parent.as_deref(), Some("LATAM"));
    }

    #[test]
    fn synonyms_normalize_before_lookup() {
        let entries = normalize(Some("UK"));
        assert_eq!(entries[0].name, "United Kingdom");
        assert_eq!(entries[0].region_parent.as_deref(), Some("Europe"));

        let entries = normalize(Some("USA"));
        assert_eq!(entries[0].name, "United States");
        assert_eq!(entries[0].region_parent.as_deref(), Some("Americas"));
    }

    #[test]
    fn first_region_in_declaration_order_wins() {
        // Brazil appears in both Americas and LATAM; Americas is declared first.
        let entries = normalize(Some("Brazil"));
        assert_eq!(entries[0].region_parent.as_deref(), Some("Americas"));
    }

    #[test]
    fn unknown_country_has_no_parent() {
        let entries = normalize(Some("Paris"));
        assert_eq!(entries[0].name, "Paris");
        assert_eq!(entries[0].kind, LocationKind::Country);
        assert_eq!(entries[0].region_parent, None);
    }

    #[test]
    fn duplicate_names_are_dropped_first_wins() {
        let entries = normalize(Some("Europe, France"));
        // Europe's expansion already contains France; the second part adds nothing.
        let count = entries.iter().filter(|e| e.name == "France").count();
        assert_eq!(count, 1);
        let france = entries.iter().find(|e| e.name == "France").unwrap();
        assert_eq!(france.region_parent.as_deref(), Some("Europe"));
    }

    #[test]
    fn only_empty_parts_falls_back_to_worldwide() {
        assert_eq!(normalize(Some(", ,")), vec![LocationEntry::worldwide()]);
    }
}
