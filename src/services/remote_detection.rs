const REMOTE_KEYWORDS: &[&str] = &[
    "remote",
    "work from home",
    "wfh",
    "work from anywhere",
    "distributed",
    "telecommute",
    "home office",
    "remote-first",
    "remote first",
    "fully remote",
    "100% remote",
    "anywhere",
    "worldwide",
    "remote work",
    "remote position",
    "remote role",
    "remote opportunity",
];

const HYBRID_KEYWORDS: &[&str] = &[
    "hybrid",
    "flexible location",
    "remote/office",
    "office/remote",
    "remote and office",
    "office and remote",
    "flexible work",
];

fn contains_any(location: Option<&str>, description: Option<&str>, keywords: &[&str]) -> bool {
    let text = format!(
        "{} {}",
        location.unwrap_or_default(),
        description.unwrap_or_default()
    )
    .to_lowercase();
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Whether the posting reads as remote, from its location string and description.
pub fn is_remote(location: Option<&str>, description: Option<&str>) -> bool {
    contains_any(location, description, REMOTE_KEYWORDS)
}

pub fn is_hybrid(location: Option<&str>, description: Option<&str>) -> bool {
    contains_any(location, description, HYBRID_KEYWORDS)
}
