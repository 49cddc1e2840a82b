use crate::error::Result;
use sqlx::PgPool;

/// Lowercase a title into a URL-safe slug: ASCII alphanumerics kept, every
/// other run of characters collapsed to a single dash.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_dash = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash && !slug.is_empty() {
            slug.push('-');
            last_dash = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

#[derive(Clone)]
pub struct SlugAssigner {
    pool: PgPool,
}

impl SlugAssigner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Generate a slug unique within the company's listings. On collision the
    /// base slug gets a numeric suffix: ml-engineer, ml-engineer-2, ...
    pub async fn generate(&self, title: &str, company: &str) -> Result<String> {
        let base = slugify(title);
        let mut candidate = base.clone();
        let mut counter = 2;

        while self.exists(company, &candidate).await? {
            candidate = format!("{}-{}", base, counter);
            counter += 1;
        }

        Ok(candidate)
    }

    async fn exists(&self, company: &str, slug: &str) -> Result<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM job_listings WHERE company = $1 AND slug = $2)",
        )
        .bind(company)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_dashes() {
        assert_eq!(slugify("ML Engineer"), "ml-engineer");
        assert_eq!(slugify("Senior Prompt Engineer (LLM)"), "senior-prompt-engineer-llm");
    }

    #[test]
    fn slugify_collapses_separator_runs() {
        assert_eq!(slugify("C++ / Rust -- Engineer"), "c-rust-engineer");
        assert_eq!(slugify("  spaced   title  "), "spaced-title");
    }

    #[test]
    fn slugify_handles_empty_and_symbol_only_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
