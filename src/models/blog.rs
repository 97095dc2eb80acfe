use crate::database::Collection;
use crate::error::AppResult;
use crate::models::document::{ensure_slug, require_text, Document, Publishable};
use crate::models::Publication;
use serde::{Deserialize, Serialize};

/// Characters kept when an excerpt is derived from the content
const EXCERPT_CHARS: usize = 160;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub publication: Publication,
}

impl BlogPost {
    fn derive_excerpt(&self) -> String {
        let text = self.content.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.chars().count() <= EXCERPT_CHARS {
            return text;
        }
        let cut: String = text.chars().take(EXCERPT_CHARS).collect();
        // Break on the last whole word
        match cut.rfind(' ') {
            Some(idx) => format!("{}…", &cut[..idx]),
            None => format!("{}…", cut),
        }
    }
}

impl Document for BlogPost {
    const COLLECTION: Collection = Collection::Blogs;
    const LABEL: &'static str = "Blog post";
    const PROTECTED_FIELDS: &'static [&'static str] = &["publication"];

    fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        ensure_slug(&mut self.slug, &self.title);

        let mut tags: Vec<String> = self
            .tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        self.tags = tags;

        if self.excerpt.as_deref().map_or(true, |e| e.trim().is_empty()) {
            self.excerpt = Some(self.derive_excerpt());
        }
        self.publication.normalize();
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn validate(&self) -> AppResult<()> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)?;
        require_text("slug", &self.slug)
    }
}

impl Publishable for BlogPost {
    fn publication(&self) -> &Publication {
        &self.publication
    }

    fn publication_mut(&mut self) -> &mut Publication {
        &mut self.publication
    }
}
