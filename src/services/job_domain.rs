/// Domain slug -> display label.
const DOMAINS: &[(&str, &str)] = &[
    ("software-development", "Software Development"),
    ("data-analysis", "Data Analysis"),
    ("design", "Design"),
    ("marketing", "Marketing"),
    ("sales-business", "Sales / Business"),
    ("product", "Product"),
    ("customer-service", "Customer Service"),
    ("devops-sysadmin", "DevOps / Sysadmin"),
    ("project-management", "Project Management"),
    ("qa", "QA"),
    ("writing", "Writing"),
    ("finance-legal", "Finance / Legal"),
    ("human-resources", "Human Resources"),
    ("other", "Other"),
];

/// Domain -> keywords, checked in order. More specific domains come first so
/// e.g. "ml engineer" lands in data-analysis, not software-development.
const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "data-analysis",
        &[
            "data scientist", "data analyst", "data engineer", "analytics",
            "business intelligence", "bi analyst", "statistician", "quantitative",
            "data analytics", "sql analyst", "data warehouse", "etl",
            "machine learning", "ml engineer", "deep learning", "neural network",
            "computer vision", "nlp", "natural language", "llm", "gpt",
            "pytorch", "tensorflow", "ai engineer", "ai/ml", "research scientist",
        ],
    ),
    (
        "devops-sysadmin",
        &[
            "devops", "sre", "site reliability", "system administrator", "sysadmin",
            "infrastructure engineer", "platform engineer", "cloud engineer",
            "kubernetes", "docker", "infrastructure", "systems engineer",
        ],
    ),
    (
        "qa",
        &[
            "qa engineer", "quality assurance", "test engineer", "sdet",
            "software tester", "qa analyst", "test automation", "testing engineer",
        ],
    ),
    (
        "product",
        &[
            "product manager", "product owner", "product lead", "product director",
            "product strategy", "technical product manager", "tpm", "program manager",
            "product marketing",
        ],
    ),
    (
        "project-management",
        &[
            "project manager", "scrum master", "agile coach", "delivery manager",
            "project coordinator", "program coordinator",
        ],
    ),
    (
        "design",
        &[
            "designer", "ux designer", "ui designer", "product designer",
            "user experience", "user interface", "visual designer",
            "interaction designer", "design lead", "graphic designer", "ui/ux",
        ],
    ),
    (
        "marketing",
        &[
            "marketing manager", "content marketing", "digital marketing",
            "marketing director", "seo", "growth marketing", "marketing analyst",
            "marketing coordinator", "brand manager", "demand generation",
        ],
    ),
    (
        "sales-business",
        &[
            "sales", "account executive", "business development", "sales engineer",
            "account manager", "sales manager", "business analyst", "strategy",
            "partnerships", "sales director",
        ],
    ),
    (
        "customer-service",
        &[
            "customer success", "customer support", "technical support",
            "customer experience", "support engineer", "customer service",
            "customer operations", "success manager", "support specialist",
        ],
    ),
    (
        "finance-legal",
        &[
            "finance", "financial analyst", "accountant", "controller",
            "legal", "lawyer", "counsel", "compliance", "risk", "treasury",
        ],
    ),
    (
        "human-resources",
        &[
            "human resources", "hr manager", "recruiter", "talent acquisition",
            "people operations", "people partner", "hr specialist", "recruiting",
        ],
    ),
    (
        "writing",
        &[
            "content writer", "technical writer", "copywriter", "editor",
            "documentation", "content creator", "blog writer", "communication specialist",
        ],
    ),
    (
        "software-development",
        &[
            "software engineer", "developer", "backend", "frontend", "full stack",
            "full-stack", "web developer", "mobile developer", "programmer",
            "software development", "technical lead", "architect", "engineering",
        ],
    ),
];

/// Detect the domain slug for a posting. First matching table entry wins;
/// postings with no match land in "other".
pub fn detect_domain(title: &str, description: Option<&str>) -> &'static str {
    let text = format!("{} {}", title, description.unwrap_or_default()).to_lowercase();

    for (domain, keywords) in DOMAIN_KEYWORDS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return domain;
        }
    }

    "other"
}

pub fn domain_label(slug: &str) -> Option<&'static str> {
    DOMAINS.iter().find(|(s, _)| *s == slug).map(|(_, l)| *l)
}

pub fn domains() -> &'static [(&'static str, &'static str)] {
    DOMAINS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_data_analysis_before_software_development() {
        assert_eq!(detect_domain("Machine Learning Engineer", None), "data-analysis");
        assert_eq!(detect_domain("ML Engineer", Some("Python, PyTorch")), "data-analysis");
    }

    #[test]
    fn detects_devops() {
        assert_eq!(detect_domain("Site Reliability Engineer", None), "devops-sysadmin");
    }

    #[test]
    fn falls_back_to_software_development_for_generic_engineering() {
        assert_eq!(detect_domain("Backend Developer", None), "software-development");
    }

    #[test]
    fn unmatched_titles_land_in_other() {
        assert_eq!(detect_domain("Office Receptionist", None), "other");
    }

    #[test]
    fn labels_resolve() {
        assert_eq!(domain_label("data-analysis"), Some("Data Analysis"));
        assert_eq!(domain_label("nope"), None);
    }
}
