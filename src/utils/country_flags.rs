/// Country name -> flag emoji, for the country filter options. Synonyms that
/// survive normalization (UK, USA, UAE) are listed alongside the full names.
const COUNTRY_FLAGS: &[(&str, &str)] = &[
    // North America
    ("United States", "🇺🇸"),
    ("USA", "🇺🇸"),
    ("Canada", "🇨🇦"),
    ("Mexico", "🇲🇽"),
    // Europe
    ("United Kingdom", "🇬🇧"),
    ("UK", "🇬🇧"),
    ("Germany", "🇩🇪"),
    ("France", "🇫🇷"),
    ("Spain", "🇪🇸"),
    ("Italy", "🇮🇹"),
    ("Netherlands", "🇳🇱"),
    ("Belgium", "🇧🇪"),
    ("Switzerland", "🇨🇭"),
    ("Austria", "🇦🇹"),
    ("Sweden", "🇸🇪"),
    ("Norway", "🇳🇴"),
    ("Denmark", "🇩🇰"),
    ("Finland", "🇫🇮"),
    ("Poland", "🇵🇱"),
    ("Portugal", "🇵🇹"),
    ("Greece", "🇬🇷"),
    ("Ireland", "🇮🇪"),
    ("Czech Republic", "🇨🇿"),
    ("Romania", "🇷🇴"),
    ("Hungary", "🇭🇺"),
    ("Bulgaria", "🇧🇬"),
    ("Croatia", "🇭🇷"),
    ("Slovakia", "🇸🇰"),
    ("Slovenia", "🇸🇮"),
    ("Estonia", "🇪🇪"),
    ("Latvia", "🇱🇻"),
    ("Lithuania", "🇱🇹"),
    ("Luxembourg", "🇱🇺"),
    ("Malta", "🇲🇹"),
    ("Cyprus", "🇨🇾"),
    ("Iceland", "🇮🇸"),
    // Asia
    ("China", "🇨🇳"),
    ("Japan", "🇯🇵"),
    ("India", "🇮🇳"),
    ("South Korea", "🇰🇷"),
    ("Singapore", "🇸🇬"),
    ("Thailand", "🇹🇭"),
    ("Vietnam", "🇻🇳"),
    ("Malaysia", "🇲🇾"),
    ("Indonesia", "🇮🇩"),
    ("Philippines", "🇵🇭"),
    ("Taiwan", "🇹🇼"),
    ("Hong Kong", "🇭🇰"),
    ("Pakistan", "🇵🇰"),
    ("Bangladesh", "🇧🇩"),
    ("Israel", "🇮🇱"),
    ("United Arab Emirates", "🇦🇪"),
    ("UAE", "🇦🇪"),
    ("Saudi Arabia", "🇸🇦"),
    ("Turkey", "🇹🇷"),
    // Oceania
    ("Australia", "🇦🇺"),
    ("New Zealand", "🇳🇿"),
    // South America
    ("Brazil", "🇧🇷"),
    ("Argentina", "🇦🇷"),
    ("Chile", "🇨🇱"),
    ("Colombia", "🇨🇴"),
    ("Peru", "🇵🇪"),
    ("Uruguay", "🇺🇾"),
    ("Venezuela", "🇻🇪"),
    // Africa
    ("South Africa", "🇿🇦"),
    ("Nigeria", "🇳🇬"),
    ("Kenya", "🇰🇪"),
    ("Egypt", "🇪🇬"),
    ("Morocco", "🇲🇦"),
    ("Ghana", "🇬🇭"),
];

pub fn flag_for(country: &str) -> Option<&'static str> {
    COUNTRY_FLAGS
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, flag)| *flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_countries_have_flags() {
        assert_eq!(flag_for("France"), Some("🇫🇷"));
        assert_eq!(flag_for("United States"), flag_for("USA"));
    }

    #[test]
    fn unknown_countries_have_none() {
        assert_eq!(flag_for("Atlantis"), None);
    }
}
