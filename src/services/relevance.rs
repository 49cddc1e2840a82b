use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Keywords that mark a posting as LLM/GenAI-related. Phrases match as plain
/// substrings; the short acronyms listed in [`ACRONYMS`] match on word
/// boundaries only.
const KEYWORDS: &[&str] = &[
    // Prompt engineering
    "prompt engineering",
    "prompt engineer",
    "prompt designer",
    "prompt design",
    // LLM & language models
    "LLM",
    "large language model",
    "language model engineer",
    // Generative AI
    "generative AI",
    "GenAI",
    "generative artificial intelligence",
    // Standalone acronyms (word-boundary matched)
    "AI",
    "ML",
    "NLP",
    "GPT",
    // Companies & products
    "GPT-3",
    "GPT-4",
    "GPT-3.5",
    "ChatGPT",
    "Claude AI",
    "Claude",
    "Anthropic",
    "OpenAI",
    "Gemini AI",
    "Bard",
    "LLaMA",
    "Llama 2",
    "Llama 3",
    "Mistral AI",
    "Cohere",
    // Techniques
    "fine-tuning LLM",
    "fine tuning language model",
    "RLHF",
    "retrieval augmented generation",
    "retrieval-augmented generation",
    "vector database",
    "vector embeddings",
    "embeddings",
    "transformer model",
    "attention mechanism",
    // Conversational AI
    "conversational AI",
    "chatbot AI",
    "dialogue system",
    "voice AI",
    // NLP roles
    "NLP engineer",
    "natural language processing engineer",
    "NLP specialist",
    // Tools & frameworks
    "LangChain",
    "LlamaIndex",
    "Hugging Face",
    "vLLM",
    "Ollama",
    "LangSmith",
    // Roles
    "AI engineer",
    "ML engineer",
    "machine learning engineer",
    "MLOps engineer",
];

/// Category slug -> keywords that put a posting in that category. A posting
/// may land in zero, one, or several categories.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "prompt_engineering",
        &[
            "prompt engineering",
            "prompt engineer",
            "prompt designer",
            "prompt design",
        ],
    ),
    (
        "llm_engineering",
        &[
            "LLM",
            "large language model",
            "language model engineer",
            "GPT-3",
            "GPT-4",
            "GPT-3.5",
            "ChatGPT",
            "Claude AI",
            "Claude",
            "LLaMA",
            "Llama 2",
            "Llama 3",
            "transformer model",
        ],
    ),
    (
        "genai",
        &["generative AI", "GenAI", "generative artificial intelligence"],
    ),
    (
        "ml_engineer",
        &["ML engineer", "machine learning engineer", "MLOps engineer"],
    ),
];

const BADGE_LABELS: &[(&str, &str)] = &[
    ("prompt_engineering", "\u{1F3AF} Prompt Engineering"),
    ("llm_engineering", "\u{1F916} LLM Engineering"),
    ("genai", "\u{26A1} GenAI"),
    ("ml_engineer", "\u{1F527} ML Engineer"),
];

/// Short acronyms that must not match inside longer words ("ai" in "domain").
const ACRONYMS: &[&str] = &["llm", "ai", "ml", "nlp", "gpt", "genai"];

static ACRONYM_PATTERNS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    ACRONYMS
        .iter()
        .map(|acr| (*acr, Regex::new(&format!(r"\b{}\b", acr)).unwrap()))
        .collect()
});

/// Match one keyword against lowercased text, with word boundaries for the
/// short acronyms.
pub(crate) fn keyword_in_text(text_lower: &str, keyword: &str) -> bool {
    let keyword_lower = keyword.to_lowercase();
    match ACRONYM_PATTERNS.get(keyword_lower.as_str()) {
        Some(pattern) => pattern.is_match(text_lower),
        None => text_lower.contains(&keyword_lower),
    }
}

/// Whether a posting is on-topic for the board. Short-circuits on the first
/// keyword hit.
pub fn is_relevant(title: &str, description: &str) -> bool {
    let text = format!("{} {}", title, description).to_lowercase();
    KEYWORDS.iter().any(|keyword| keyword_in_text(&text, keyword))
}

/// Distinct category slugs whose keyword lists matched the posting.
pub fn detect_categories(title: &str, description: &str) -> Vec<String> {
    let text = format!("{} {}", title, description).to_lowercase();
    CATEGORIES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| keyword_in_text(&text, k)))
        .map(|(slug, _)| slug.to_string())
        .collect()
}

pub fn category_label(slug: &str) -> Option<&'static str> {
    BADGE_LABELS
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, label)| *label)
}

/// All category slug -> label pairs, for the filter dictionaries.
pub fn category_labels() -> &'static [(&'static str, &'static str)] {
    BADGE_LABELS
}
