//! Search-engine metadata composition.
//!
//! Every page hands a small [`PageMetadata`] to [`compose`], which expands it
//! into a complete [`HeadDocument`]: the branded title, canonical URL, robots
//! directive, Open Graph and Twitter tags, and the JSON-LD records. The
//! document is rendered into `<head>` by [`render_head`].
//!
//! ## Rules
//!
//! - **Title**: `"{title} | {site name}"`, unless the title already contains
//!   the site name (case-sensitive), in which case it is used as is.
//! - **Canonical URL**: `base_url + canonical_path`; pages without a path are
//!   not canonicalized.
//! - **Share image**: the page's image, or the site default. Site-relative
//!   images are made absolute.
//! - **Robots**: `noindex, nofollow` for `no_index` pages, otherwise a
//!   permissive directive allowing large previews.
//! - **Structured data**: one Organization record on every page, a WebSite
//!   record on the root page only, then the page's own records in order.
//!
//! Composition is pure. Identical input produces byte-identical output:
//! JSON objects serialize with sorted keys.
//!
//! ## Rejections
//!
//! Empty titles and descriptions are contract violations, not something to
//! paper over with empty tags. So are canonical paths that are not
//! site-relative, and page records claiming the reserved `Organization` or
//! `WebSite` types.

use crate::config::SiteConfig;
use maud::{Markup, PreEscaped, html};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SeoError {
    #[error("page title must not be empty")]
    EmptyTitle,
    #[error("page description must not be empty")]
    EmptyDescription,
    #[error("canonical path must be site-relative (start with a single '/'): {0}")]
    InvalidCanonicalPath(String),
    #[error("structured data type '{0}' is reserved for site-wide records")]
    ReservedSchemaType(String),
}

/// Robots directive for pages excluded from indexing.
pub const ROBOTS_NOINDEX: &str = "noindex, nofollow";
/// Robots directive for every other page.
pub const ROBOTS_INDEX: &str =
    "index, follow, max-image-preview:large, max-snippet:-1, max-video-preview:-1";

const SCHEMA_CONTEXT: &str = "https://schema.org";
const RESERVED_TYPES: &[&str] = &["Organization", "WebSite"];
const OG_IMAGE_WIDTH: &str = "1200";
const OG_IMAGE_HEIGHT: &str = "630";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OgType {
    #[default]
    Website,
    Article,
}

impl OgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

/// Page-level metadata input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    /// Site-relative path, e.g. `/about`.
    pub canonical_path: Option<String>,
    pub og_image: Option<String>,
    pub og_type: OgType,
    /// Only emitted for [`OgType::Article`].
    pub article_published_time: Option<String>,
    /// Only emitted for [`OgType::Article`].
    pub article_author: Option<String>,
    pub no_index: bool,
    /// Page-specific JSON-LD records.
    pub structured_data: Vec<Value>,
}

impl PageMetadata {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn canonical(mut self, path: impl Into<String>) -> Self {
        self.canonical_path = Some(path.into());
        self
    }

    pub fn og_image(mut self, image: impl Into<String>) -> Self {
        self.og_image = Some(image.into());
        self
    }

    pub fn article(mut self, published_time: Option<String>, author: Option<String>) -> Self {
        self.og_type = OgType::Article;
        self.article_published_time = published_time;
        self.article_author = author;
        self
    }

    pub fn no_index(mut self) -> Self {
        self.no_index = true;
        self
    }

    pub fn with_structured_data(mut self, record: Value) -> Self {
        self.structured_data.push(record);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKind {
    /// `<meta name=...>`
    Name,
    /// `<meta property=...>`
    Property,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub kind: MetaKind,
    pub key: String,
    pub content: String,
}

impl MetaTag {
    fn name(key: &str, content: impl Into<String>) -> Self {
        Self {
            kind: MetaKind::Name,
            key: key.to_string(),
            content: content.into(),
        }
    }

    fn property(key: &str, content: impl Into<String>) -> Self {
        Self {
            kind: MetaKind::Property,
            key: key.to_string(),
            content: content.into(),
        }
    }
}

/// Fully composed `<head>` metadata for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadDocument {
    pub full_title: String,
    pub description: String,
    pub canonical_url: Option<String>,
    pub robots: &'static str,
    pub og: Vec<MetaTag>,
    pub twitter: Vec<MetaTag>,
    /// author, publisher, theme-color
    pub extra: Vec<MetaTag>,
    pub json_ld: Vec<Value>,
}

impl HeadDocument {
    /// Look up a tag's content by key across all tag groups.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.og
            .iter()
            .chain(&self.twitter)
            .chain(&self.extra)
            .find(|t| t.key == key)
            .map(|t| t.content.as_str())
    }

    /// Top-level `@type` of every JSON-LD record, in output order.
    pub fn schema_types(&self) -> Vec<&str> {
        self.json_ld.iter().filter_map(schema_type).collect()
    }
}

/// Append the site name unless the title already carries it.
pub fn full_title(title: &str, site_name: &str) -> String {
    if title.contains(site_name) {
        title.to_string()
    } else {
        format!("{title} | {site_name}")
    }
}

fn schema_type(record: &Value) -> Option<&str> {
    record.get("@type").and_then(Value::as_str)
}

fn is_site_relative(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}

/// Organization record published on every page.
pub fn organization_schema(site: &SiteConfig) -> Value {
    let org = &site.organization;
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Organization",
        "name": site.site.name,
        "url": site.site.base_url,
        "logo": site.absolute_url(&site.site.logo),
        "description": site.site.description,
        "contactPoint": {
            "@type": "ContactPoint",
            "telephone": org.telephone,
            "contactType": org.contact_type,
            "email": org.email,
        },
        "sameAs": org.same_as,
    })
}

/// WebSite record with a sitelinks search box, root page only.
pub fn website_schema(site: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": site.site.name,
        "url": site.site.base_url,
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{}/projects?search={{search_term_string}}", site.site.base_url),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

/// An optional field counts only when it has non-blank text.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

/// Compose the head document for a page.
pub fn compose(site: &SiteConfig, meta: &PageMetadata) -> Result<HeadDocument, SeoError> {
    if meta.title.trim().is_empty() {
        return Err(SeoError::EmptyTitle);
    }
    if meta.description.trim().is_empty() {
        return Err(SeoError::EmptyDescription);
    }
    if let Some(path) = &meta.canonical_path {
        if !is_site_relative(path) {
            return Err(SeoError::InvalidCanonicalPath(path.clone()));
        }
    }
    for record in &meta.structured_data {
        if let Some(ty) = schema_type(record) {
            if RESERVED_TYPES.contains(&ty) {
                return Err(SeoError::ReservedSchemaType(ty.to_string()));
            }
        }
    }

    let site_name = &site.site.name;
    let full_title = full_title(&meta.title, site_name);
    let canonical_url = meta
        .canonical_path
        .as_ref()
        .map(|path| format!("{}{}", site.site.base_url, path));
    let image = site.absolute_url(
        present(&meta.og_image).unwrap_or(site.site.default_og_image.as_str()),
    );

    let mut og = vec![
        MetaTag::property("og:type", meta.og_type.as_str()),
        MetaTag::property("og:site_name", site_name.as_str()),
        MetaTag::property("og:title", full_title.as_str()),
        MetaTag::property("og:description", meta.description.as_str()),
        MetaTag::property("og:image", image.as_str()),
        MetaTag::property("og:image:width", OG_IMAGE_WIDTH),
        MetaTag::property("og:image:height", OG_IMAGE_HEIGHT),
    ];
    if let Some(url) = &canonical_url {
        og.push(MetaTag::property("og:url", url.as_str()));
    }
    og.push(MetaTag::property("og:locale", site.site.locale.as_str()));
    if meta.og_type == OgType::Article {
        if let Some(published) = present(&meta.article_published_time) {
            og.push(MetaTag::property("article:published_time", published));
        }
        if let Some(author) = present(&meta.article_author) {
            og.push(MetaTag::property("article:author", author));
        }
    }

    let twitter = vec![
        MetaTag::name("twitter:card", "summary_large_image"),
        MetaTag::name("twitter:title", full_title.as_str()),
        MetaTag::name("twitter:description", meta.description.as_str()),
        MetaTag::name("twitter:image", image.as_str()),
    ];

    let extra = vec![
        MetaTag::name("author", site.site.author.as_str()),
        MetaTag::name("publisher", site.site.author.as_str()),
        MetaTag::name("theme-color", site.theme.accent.as_str()),
    ];

    let mut json_ld = vec![organization_schema(site)];
    if meta.canonical_path.as_deref() == Some("/") {
        json_ld.push(website_schema(site));
    }
    json_ld.extend(meta.structured_data.iter().cloned());

    Ok(HeadDocument {
        full_title,
        description: meta.description.clone(),
        canonical_url,
        robots: if meta.no_index {
            ROBOTS_NOINDEX
        } else {
            ROBOTS_INDEX
        },
        og,
        twitter,
        extra,
        json_ld,
    })
}

/// Serialize a JSON-LD record for embedding in a `<script>` element.
///
/// `</` is escaped so record text can never close the script early.
pub fn json_ld_script(record: &Value) -> String {
    record.to_string().replace("</", "<\\/")
}

fn render_meta(tag: &MetaTag) -> Markup {
    html! {
        @match tag.kind {
            MetaKind::Name => { meta name=(tag.key) content=(tag.content); }
            MetaKind::Property => { meta property=(tag.key) content=(tag.content); }
        }
    }
}

/// Render the head document as `<head>` children.
pub fn render_head(doc: &HeadDocument) -> Markup {
    html! {
        title { (doc.full_title) }
        meta name="title" content=(doc.full_title);
        meta name="description" content=(doc.description);
        meta name="robots" content=(doc.robots);
        @if let Some(url) = &doc.canonical_url {
            link rel="canonical" href=(url);
        }
        @for tag in &doc.og {
            (render_meta(tag))
        }
        @for tag in &doc.twitter {
            (render_meta(tag))
        }
        @for tag in &doc.extra {
            (render_meta(tag))
        }
        @for record in &doc.json_ld {
            script type="application/ld+json" { (PreEscaped(json_ld_script(record))) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::default()
    }

    fn about() -> PageMetadata {
        PageMetadata::new("About", "Who we are.").canonical("/about")
    }

    #[test]
    fn appends_site_name_and_builds_canonical_url() {
        let doc = compose(&site(), &about()).unwrap();
        assert_eq!(doc.full_title, "About | Versavio Tech");
        assert_eq!(
            doc.canonical_url.as_deref(),
            Some("https://www.versaviotech.com/about")
        );
    }

    #[test]
    fn branded_title_is_not_suffixed_twice() {
        let meta = PageMetadata::new("Versavio Tech Home", "Home page.");
        let doc = compose(&site(), &meta).unwrap();
        assert_eq!(doc.full_title, "Versavio Tech Home");
    }

    #[test]
    fn site_name_check_is_case_sensitive() {
        assert_eq!(
            full_title("versavio tech blog", "Versavio Tech"),
            "versavio tech blog | Versavio Tech"
        );
    }

    #[test]
    fn no_canonical_path_means_no_canonical_url() {
        let doc = compose(&site(), &PageMetadata::new("Draft", "Draft page.")).unwrap();
        assert_eq!(doc.canonical_url, None);
        assert_eq!(doc.tag("og:url"), None);
        let html = render_head(&doc).into_string();
        assert!(!html.contains("rel=\"canonical\""));
    }

    #[test]
    fn root_page_has_organization_and_website() {
        let meta = PageMetadata::new("Home", "Home page.").canonical("/");
        let doc = compose(&site(), &meta).unwrap();
        assert_eq!(doc.schema_types(), vec!["Organization", "WebSite"]);
    }

    #[test]
    fn other_pages_have_only_organization() {
        let doc = compose(&site(), &about()).unwrap();
        assert_eq!(doc.schema_types(), vec!["Organization"]);
    }

    #[test]
    fn page_records_follow_fixed_records() {
        let meta = PageMetadata::new("Home", "Home page.")
            .canonical("/")
            .with_structured_data(json!({"@type": "ProfessionalService", "name": "x"}))
            .with_structured_data(json!({"@type": "FAQPage"}));
        let doc = compose(&site(), &meta).unwrap();
        assert_eq!(
            doc.schema_types(),
            vec!["Organization", "WebSite", "ProfessionalService", "FAQPage"]
        );
    }

    #[test]
    fn nested_organization_is_allowed() {
        let meta = about().with_structured_data(json!({
            "@type": "AboutPage",
            "mainEntity": {"@type": "Organization", "name": "Versavio Tech"}
        }));
        let doc = compose(&site(), &meta).unwrap();
        assert_eq!(doc.schema_types(), vec!["Organization", "AboutPage"]);
    }

    #[test]
    fn reserved_page_record_rejected() {
        let meta = about().with_structured_data(json!({"@type": "Organization"}));
        assert_eq!(
            compose(&site(), &meta),
            Err(SeoError::ReservedSchemaType("Organization".into()))
        );
        let meta = about().with_structured_data(json!({"@type": "WebSite"}));
        assert!(matches!(
            compose(&site(), &meta),
            Err(SeoError::ReservedSchemaType(_))
        ));
    }

    #[test]
    fn robots_directive_follows_no_index() {
        let doc = compose(&site(), &about().no_index()).unwrap();
        assert_eq!(doc.robots, "noindex, nofollow");
        let doc = compose(&site(), &about()).unwrap();
        assert_eq!(doc.robots, ROBOTS_INDEX);
    }

    #[test]
    fn empty_title_rejected() {
        let meta = PageMetadata::new("", "desc");
        assert_eq!(compose(&site(), &meta), Err(SeoError::EmptyTitle));
        let meta = PageMetadata::new("   ", "desc");
        assert_eq!(compose(&site(), &meta), Err(SeoError::EmptyTitle));
    }

    #[test]
    fn empty_description_rejected() {
        let meta = PageMetadata::new("Title", "");
        assert_eq!(compose(&site(), &meta), Err(SeoError::EmptyDescription));
    }

    #[test]
    fn absolute_canonical_path_rejected() {
        let meta = PageMetadata::new("T", "D").canonical("https://evil.example/about");
        assert!(matches!(
            compose(&site(), &meta),
            Err(SeoError::InvalidCanonicalPath(_))
        ));
        let meta = PageMetadata::new("T", "D").canonical("//evil.example/about");
        assert!(compose(&site(), &meta).is_err());
    }

    #[test]
    fn default_share_image_is_absolute() {
        let doc = compose(&site(), &about()).unwrap();
        assert_eq!(
            doc.tag("og:image"),
            Some("https://www.versaviotech.com/assets/og-default.png")
        );
        assert_eq!(doc.tag("twitter:image"), doc.tag("og:image"));
    }

    #[test]
    fn page_share_image_overrides_default() {
        let meta = about().og_image("https://cdn.example.com/a.jpg");
        let doc = compose(&site(), &meta).unwrap();
        assert_eq!(doc.tag("og:image"), Some("https://cdn.example.com/a.jpg"));
    }

    #[test]
    fn article_fields_only_for_articles() {
        let meta = about().article(Some("2025-02-12".into()), Some("Strategy Group".into()));
        let doc = compose(&site(), &meta).unwrap();
        assert_eq!(doc.tag("og:type"), Some("article"));
        assert_eq!(doc.tag("article:published_time"), Some("2025-02-12"));
        assert_eq!(doc.tag("article:author"), Some("Strategy Group"));

        let mut meta = about();
        meta.article_published_time = Some("2025-02-12".into());
        meta.article_author = Some("Strategy Group".into());
        let doc = compose(&site(), &meta).unwrap();
        assert_eq!(doc.tag("og:type"), Some("website"));
        assert_eq!(doc.tag("article:published_time"), None);
        assert_eq!(doc.tag("article:author"), None);
    }

    #[test]
    fn blank_optional_fields_are_treated_as_absent() {
        let fallback = compose(&site(), &about()).unwrap();
        let meta = about()
            .og_image("  ")
            .article(Some(String::new()), Some(" ".into()));
        let doc = compose(&site(), &meta).unwrap();
        assert_eq!(doc.tag("og:image"), fallback.tag("og:image"));
        assert_eq!(doc.tag("twitter:image"), fallback.tag("twitter:image"));
        assert_ne!(doc.tag("og:image"), Some(""));
        assert_eq!(doc.tag("article:published_time"), None);
        assert_eq!(doc.tag("article:author"), None);
    }

    #[test]
    fn social_tags_share_title_and_description() {
        let doc = compose(&site(), &about()).unwrap();
        assert_eq!(doc.tag("og:title"), Some("About | Versavio Tech"));
        assert_eq!(doc.tag("twitter:title"), Some("About | Versavio Tech"));
        assert_eq!(doc.tag("og:description"), Some("Who we are."));
        assert_eq!(doc.tag("twitter:card"), Some("summary_large_image"));
        assert_eq!(doc.tag("theme-color"), Some("#9d41be"));
    }

    #[test]
    fn organization_record_carries_site_facts() {
        let org = organization_schema(&site());
        assert_eq!(org["logo"], "https://www.versaviotech.com/assets/new_logo.png");
        assert_eq!(org["contactPoint"]["email"], "info@versaviotech.com");
        assert_eq!(org["sameAs"][0], "https://www.linkedin.com/company/versavio-tech/");
    }

    #[test]
    fn website_record_has_search_action() {
        let record = website_schema(&site());
        assert_eq!(
            record["potentialAction"]["target"]["urlTemplate"],
            "https://www.versaviotech.com/projects?search={search_term_string}"
        );
    }

    #[test]
    fn composition_is_deterministic() {
        let meta = PageMetadata::new("Home", "Home page.")
            .canonical("/")
            .with_structured_data(json!({"@type": "ProfessionalService", "b": 1, "a": 2}));
        let first = render_head(&compose(&site(), &meta).unwrap()).into_string();
        let second = render_head(&compose(&site(), &meta).unwrap()).into_string();
        assert_eq!(first, second);
    }

    #[test]
    fn render_head_emits_all_parts() {
        let meta = PageMetadata::new("Home", "Home page.").canonical("/");
        let html = render_head(&compose(&site(), &meta).unwrap()).into_string();
        assert!(html.contains("<title>Home | Versavio Tech</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://www.versaviotech.com/">"#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert_eq!(html.matches("application/ld+json").count(), 2);
    }

    #[test]
    fn json_ld_cannot_close_script() {
        let record = json!({"@type": "Thing", "name": "</script><script>alert(1)</script>"});
        let out = json_ld_script(&record);
        assert!(!out.contains("</script>"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let meta = PageMetadata::new("Tom & \"Jerry\"", "a < b");
        let html = render_head(&compose(&site(), &meta).unwrap()).into_string();
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
        assert!(html.contains("a &lt; b"));
    }
}
