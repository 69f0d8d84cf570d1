//! HTML site generation.
//!
//! Loads the content catalogue and static pages, composes each route's head
//! metadata, and writes the final static site.
//!
//! ## Generated Files
//!
//! - **Pages** (`/{route}/index.html`): one per route in
//!   [`routes::all_routes`], rendered in parallel
//! - **Sitemap** (`/sitemap.xml`): every route, with `lastmod` for posts
//! - **Robots** (`/robots.txt`): allow all, points at the sitemap
//! - **Assets** (`/static/*-<hash>.{css,js}`): fingerprinted by content
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── about/index.html
//! ├── services/index.html
//! ├── contact/index.html
//! ├── projects/
//! │   ├── index.html
//! │   └── jira-testing-automation/index.html
//! ├── blog/
//! │   ├── index.html
//! │   └── ai-native-erp-sap-2026/index.html
//! ├── static/
//! │   ├── site-3f9a1c0b7e.css
//! │   ├── reveal-91d2e4a0c3.js
//! │   └── filter-0b5e77d2a1.js
//! ├── assets/                  # copied from content/assets/
//! ├── sitemap.xml
//! └── robots.txt
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles (theme and reveal timing injected from config)
//! - `static/reveal.js`: viewport-gated reveal, fails open without observer support
//! - `static/filter.js`: project category and search filtering
//!
//! Reveal containers never change opacity. Without scripts a `<noscript>`
//! rule drops the offset, so text is always readable.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{
    BlogPost, Catalogue, ContentError, Project, Section, StaticPage, StaticPages, display_date,
};
use crate::pages::{self, PageError};
use crate::reveal::RevealSpec;
use crate::routes::{self, Route};
use crate::seo::{self, HeadDocument, SeoError};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("{route}: {source}")]
    Page { route: String, source: PageError },
    #[error("{route}: {source}")]
    Seo { route: String, source: SeoError },
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const REVEAL_JS: &str = include_str!("../static/reveal.js");
const FILTER_JS: &str = include_str!("../static/filter.js");

/// Hex characters kept from the SHA-256 digest in asset file names.
const FINGERPRINT_LEN: usize = 10;

/// Content-addressed CSS and JS served from `/static/`.
#[derive(Debug, Clone)]
pub struct SiteAssets {
    pub css: FingerprintedAsset,
    pub reveal_js: FingerprintedAsset,
    pub filter_js: FingerprintedAsset,
}

#[derive(Debug, Clone)]
pub struct FingerprintedAsset {
    /// File name under `static/`, e.g. `site-3f9a1c0b7e.css`.
    pub file_name: String,
    pub contents: String,
}

impl FingerprintedAsset {
    pub fn new(stem: &str, ext: &str, contents: String) -> Self {
        let file_name = format!("{stem}-{}.{ext}", fingerprint(contents.as_bytes()));
        Self {
            file_name,
            contents,
        }
    }

    pub fn href(&self) -> String {
        format!("/static/{}", self.file_name)
    }
}

impl SiteAssets {
    pub fn build(site: &SiteConfig) -> Self {
        let theme_css = config::generate_theme_css(&site.theme, &site.reveal);
        Self {
            css: FingerprintedAsset::new("site", "css", format!("{theme_css}\n\n{CSS_STATIC}")),
            reveal_js: FingerprintedAsset::new("reveal", "js", REVEAL_JS.to_string()),
            filter_js: FingerprintedAsset::new("filter", "js", FILTER_JS.to_string()),
        }
    }

    fn all(&self) -> [&FingerprintedAsset; 3] {
        [&self.css, &self.reveal_js, &self.filter_js]
    }
}

/// First [`FINGERPRINT_LEN`] hex characters of the SHA-256 digest.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hex = format!("{:x}", Sha256::digest(bytes));
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// One written page.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub route: Route,
    /// Relative to the output directory.
    pub output_file: PathBuf,
    pub full_title: String,
    pub schema_types: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub pages: Vec<GeneratedPage>,
    /// Fingerprinted asset file names under `static/`.
    pub assets: Vec<String>,
    pub sitemap_entries: usize,
    /// Files copied from `content/assets/`.
    pub copied_assets: usize,
    /// Collection redirect rules written to `404.html` and `_redirects`.
    pub redirect_rules: usize,
}

/// Inventory produced by [`check`].
#[derive(Debug, Clone)]
pub struct SiteInventory {
    pub posts: usize,
    pub projects: usize,
    pub categories: Vec<String>,
    pub pages: Vec<GeneratedPage>,
}

/// Everything a page renderer needs. Shared read-only across workers.
struct RenderContext<'a> {
    site: &'a SiteConfig,
    catalogue: &'a Catalogue,
    pages: &'a StaticPages,
    assets: &'a SiteAssets,
}

/// Build the whole site from `content_root` into `output_dir`.
pub fn generate(
    content_root: &Path,
    output_dir: &Path,
    site: &SiteConfig,
) -> Result<GenerateReport, GenerateError> {
    site.validate()?;
    let catalogue = Catalogue::load(content_root)?;
    let static_pages = StaticPages::load(content_root)?;
    let assets = SiteAssets::build(site);
    let ctx = RenderContext {
        site,
        catalogue: &catalogue,
        pages: &static_pages,
        assets: &assets,
    };

    fs::create_dir_all(output_dir.join("static"))?;
    for asset in assets.all() {
        fs::write(output_dir.join("static").join(&asset.file_name), &asset.contents)?;
    }

    let route_list = routes::all_routes(&catalogue);
    let pages = route_list
        .par_iter()
        .map(|route| -> Result<GeneratedPage, GenerateError> {
            let (head, markup) = render_route(&ctx, route)?;
            let output_file = route.output_file();
            let path = output_dir.join(&output_file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, markup.into_string())?;
            Ok(generated_page(route, output_file, &head))
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    let sitemap = Sitemap::from_routes(site, &catalogue, &route_list);
    let sitemap_entries = sitemap.urls.len();
    fs::write(output_dir.join("sitemap.xml"), sitemap.into_xml())?;
    fs::write(output_dir.join("robots.txt"), robots_txt(site))?;

    let not_found = render_not_found(&ctx)?;
    fs::write(output_dir.join(NOT_FOUND_FILE), not_found.into_string())?;
    fs::write(output_dir.join(REDIRECTS_FILE), redirects_file())?;

    let assets_src = content_root.join("assets");
    let copied_assets = if assets_src.is_dir() {
        let assets_dst = output_dir.join("assets");
        fs::create_dir_all(&assets_dst)?;
        copy_dir_recursive(&assets_src, &assets_dst)?
    } else {
        0
    };

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        pages,
        assets: assets.all().iter().map(|a| a.file_name.clone()).collect(),
        sitemap_entries,
        copied_assets,
        redirect_rules: routes::collection_redirects().len(),
    })
}

/// Load and compose every page without writing anything.
pub fn check(content_root: &Path, site: &SiteConfig) -> Result<SiteInventory, GenerateError> {
    site.validate()?;
    let catalogue = Catalogue::load(content_root)?;
    let static_pages = StaticPages::load(content_root)?;

    let pages = routes::all_routes(&catalogue)
        .iter()
        .map(|route| -> Result<GeneratedPage, GenerateError> {
            let head = compose_route(site, &catalogue, &static_pages, route)?;
            Ok(generated_page(route, route.output_file(), &head))
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    Ok(SiteInventory {
        posts: catalogue.posts().len(),
        projects: catalogue.projects().len(),
        categories: catalogue
            .project_categories()
            .into_iter()
            .map(String::from)
            .collect(),
        pages,
    })
}

fn generated_page(route: &Route, output_file: PathBuf, head: &HeadDocument) -> GeneratedPage {
    GeneratedPage {
        route: route.clone(),
        output_file,
        full_title: head.full_title.clone(),
        schema_types: head.schema_types().into_iter().map(String::from).collect(),
    }
}

fn compose_route(
    site: &SiteConfig,
    catalogue: &Catalogue,
    static_pages: &StaticPages,
    route: &Route,
) -> Result<HeadDocument, GenerateError> {
    let meta = pages::metadata_for(route, catalogue, static_pages, site).map_err(|source| {
        GenerateError::Page {
            route: route.path(),
            source,
        }
    })?;
    seo::compose(site, &meta).map_err(|source| GenerateError::Seo {
        route: route.path(),
        source,
    })
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Sitemap and robots
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    /// `YYYY-MM-DD`
    lastmod: Option<String>,
}

impl Sitemap {
    fn from_routes(site: &SiteConfig, catalogue: &Catalogue, routes: &[Route]) -> Self {
        let urls = routes
            .iter()
            .map(|route| UrlEntry {
                loc: site.absolute_url(&route.path()),
                lastmod: match route {
                    Route::Post(slug) => catalogue.post(slug).map(|p| p.date.clone()),
                    _ => None,
                },
            })
            .collect();
        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn robots_txt(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        site.absolute_url("/sitemap.xml")
    )
}

// ============================================================================
// Lookup misses
// ============================================================================
//
// Static hosts serve `404.html` for any missing file. Its script sends
// `/blog/<unknown>` and `/projects/<unknown>` to their index, matching
// `routes::resolve`. Hosts that read `_redirects` get the same table as
// rules; existing files take precedence there, so only misses redirect.

pub const NOT_FOUND_FILE: &str = "404.html";
pub const REDIRECTS_FILE: &str = "_redirects";

const NOT_FOUND_TITLE: &str = "Page Not Found";
const NOT_FOUND_DESCRIPTION: &str = "The page you are looking for does not exist or has moved.";

fn redirects_file() -> String {
    let mut out = String::from("# Unknown entries land on their collection index\n");
    for (segment, index) in routes::collection_redirects() {
        out.push_str(&format!("/{segment}/*  {index}  302\n"));
    }
    out
}

const REDIRECT_SCRIPT: &str = r#"(function () {
    var indexes = INDEXES;
    var segs = window.location.pathname.split('/').filter(Boolean);
    if (segs[segs.length - 1] === 'index.html') segs.pop();
    if (segs.length === 2 && Object.prototype.hasOwnProperty.call(indexes, segs[0])) {
        window.location.replace(indexes[segs[0]]);
    }
})();"#;

fn redirect_script() -> String {
    let indexes: serde_json::Map<String, serde_json::Value> = routes::collection_redirects()
        .iter()
        .map(|(segment, index)| (segment.to_string(), serde_json::Value::from(*index)))
        .collect();
    REDIRECT_SCRIPT.replace("INDEXES", &serde_json::Value::Object(indexes).to_string())
}

fn render_not_found(ctx: &RenderContext) -> Result<Markup, GenerateError> {
    let meta = seo::PageMetadata::new(NOT_FOUND_TITLE, NOT_FOUND_DESCRIPTION).no_index();
    let head = seo::compose(ctx.site, &meta).map_err(|source| GenerateError::Seo {
        route: format!("/{NOT_FOUND_FILE}"),
        source,
    })?;
    let content = html! {
        script { (PreEscaped(redirect_script())) }
        (RevealSpec::above_fold().render(&ctx.site.reveal, Some("hero"), html! {
            h1 { (NOT_FOUND_TITLE) }
            p.lead { (NOT_FOUND_DESCRIPTION) }
            p {
                a href="/" { "Home" } " · "
                a href="/projects" { "Projects" } " · "
                a href="/blog" { "Blog" }
            }
        }))
    };
    Ok(base_document(ctx, &head, "", content))
}

// ============================================================================
// HTML Components
// ============================================================================

fn render_route(ctx: &RenderContext, route: &Route) -> Result<(HeadDocument, Markup), GenerateError> {
    let head = compose_route(ctx.site, ctx.catalogue, ctx.pages, route)?;
    let missing = |kind: &'static str, key: &str| GenerateError::Page {
        route: route.path(),
        source: PageError::NotFound {
            kind,
            key: key.to_string(),
        },
    };

    let content = match route {
        Route::Home => render_static_page(
            ctx,
            static_page(ctx, route, "home")?,
            render_home_extras(ctx),
        ),
        Route::About => render_static_page(ctx, static_page(ctx, route, "about")?, html! {}),
        Route::Services => render_static_page(ctx, static_page(ctx, route, "services")?, html! {}),
        Route::Contact => {
            let page = static_page(ctx, route, "contact")?;
            render_static_page(ctx, page, render_contact_extras(ctx, page))
        }
        Route::Projects => render_projects_index(ctx),
        Route::Blog => render_blog_index(ctx),
        Route::Project(id) => {
            let project = ctx.catalogue.project(id).ok_or_else(|| missing("project", id))?;
            render_project_page(ctx, project)
        }
        Route::Post(slug) => {
            let post = ctx.catalogue.post(slug).ok_or_else(|| missing("post", slug))?;
            render_post_page(ctx, post)
        }
    };

    let markup = base_document(ctx, &head, &route.path(), content);
    Ok((head, markup))
}

fn static_page<'a>(
    ctx: &RenderContext<'a>,
    route: &Route,
    name: &'static str,
) -> Result<&'a StaticPage, GenerateError> {
    ctx.pages.get(name).ok_or_else(|| GenerateError::Page {
        route: route.path(),
        source: PageError::MissingStaticPage(name),
    })
}

/// Renders the base HTML document structure
fn base_document(ctx: &RenderContext, head: &HeadDocument, current_path: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-reveal-margin=(ctx.site.reveal.root_margin) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (seo::render_head(head))
                link rel="stylesheet" href=(ctx.assets.css.href());
                noscript {
                    style { ".reveal { transform: none; }" }
                }
                script src=(ctx.assets.reveal_js.href()) defer {}
            }
            body {
                (site_header(current_path))
                main { (content) }
                (site_footer(ctx.site))
            }
        }
    }
}

/// Renders the site header with logo, navigation and contact button
fn site_header(current_path: &str) -> Markup {
    html! {
        header.site-header {
            a.logo href="/" { "Versavio" span.logo-accent { "Tech" } }
            (render_nav(current_path))
            @let contact_active = routes::is_active("/contact", current_path);
            a.cta.current[contact_active] href="/contact" {
                "Contact Us"
            }
        }
    }
}

/// Renders the primary navigation (hamburger on small screens)
pub fn render_nav(current_path: &str) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" aria-label="Menu" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        nav.site-nav {
            ul {
                @for item in routes::navigation() {
                    @let is_current = routes::is_active(item.path, current_path);
                    li class=[is_current.then_some("current")] {
                        a href=(item.path) aria-current=[is_current.then_some("page")] { (item.label) }
                    }
                }
            }
        }
    }
}

fn site_footer(site: &SiteConfig) -> Markup {
    let org = &site.organization;
    html! {
        footer.site-footer {
            div.footer-brand {
                strong { (site.site.name) }
                p { (site.site.description) }
            }
            ul.footer-links {
                @for item in routes::navigation() {
                    li { a href=(item.path) { (item.label) } }
                }
                li { a href="/contact" { "Contact" } }
            }
            div.footer-contact {
                a href={ "mailto:" (org.email) } { (org.email) }
                a href={ "tel:" (tel_href(&org.telephone)) } { (org.telephone) }
                @for profile in &org.same_as {
                    a href=(profile) rel="noopener" target="_blank" { (profile_label(profile)) }
                }
            }
            p.copyright { "© " (site.site.name) ". All rights reserved." }
        }
    }
}

fn tel_href(telephone: &str) -> String {
    telephone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

fn profile_label(url: &str) -> &'static str {
    if url.contains("linkedin.com") {
        "LinkedIn"
    } else if url.contains("github.com") {
        "GitHub"
    } else {
        "Profile"
    }
}

fn markdown(source: &str) -> Markup {
    let parser = Parser::new_ext(source, Options::ENABLE_TABLES);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

fn render_section(section: &Section) -> Markup {
    html! {
        section.page-section {
            @if let Some(heading) = &section.heading {
                h2 { (heading) }
            }
            div.prose { (markdown(&section.markdown)) }
        }
    }
}

fn hero(ctx: &RenderContext, heading: &str, lead: Option<&str>) -> Markup {
    RevealSpec::above_fold().render(
        &ctx.site.reveal,
        Some("hero"),
        html! {
            h1 { (heading) }
            @if let Some(lead) = lead {
                p.lead { (lead) }
            }
        },
    )
}

fn project_card(ctx: &RenderContext, index: usize, project: &Project) -> Markup {
    // Newline separator: a search box cannot match across it
    let search_text = format!("{}\n{}", project.title, project.description).to_lowercase();
    pages::card_reveal(index).render(
        &ctx.site.reveal,
        Some("card"),
        html! {
            a.project-card href=(Route::Project(project.id.clone()).path())
                data-category=(project.category) data-search=(search_text) {
                img src=(project.image_url) alt=(project.title) loading="lazy";
                span.tag { (project.category) }
                h3 { (project.title) }
                p { (project.description) }
            }
        },
    )
}

fn post_card(ctx: &RenderContext, index: usize, post: &BlogPost) -> Markup {
    let date = display_date(&post.date).unwrap_or_else(|| post.date.clone());
    pages::card_reveal(index).render(
        &ctx.site.reveal,
        Some("card"),
        html! {
            a.post-card href=(Route::Post(post.slug.clone()).path()) {
                img src=(post.image_url) alt=(post.title) loading="lazy";
                span.tag { (post.category) }
                time datetime=(post.date) { (date) }
                h3 { (post.title) }
                p { (post.excerpt) }
            }
        },
    )
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_static_page(ctx: &RenderContext, page: &StaticPage, extras: Markup) -> Markup {
    html! {
        div class={ "page page-" (page.name) } {
            (hero(ctx, &page.heading, page.lead.as_deref()))
            @for planned in pages::sections_for(page) {
                (planned.reveal.render(&ctx.site.reveal, None, render_section(planned.section)))
            }
            (extras)
        }
    }
}

/// Featured case studies and latest insights below the home page copy
fn render_home_extras(ctx: &RenderContext) -> Markup {
    let reveal = &ctx.site.reveal;
    html! {
        @if !ctx.catalogue.projects().is_empty() {
            section.featured-projects {
                (RevealSpec::below_fold().render(reveal, None, html! { h2 { "Success Stories" } }))
                div.card-grid {
                    @for (i, project) in ctx.catalogue.projects().iter().take(3).enumerate() {
                        (project_card(ctx, i, project))
                    }
                }
                a.more href="/projects" { "View all projects" }
            }
        }
        @if !ctx.catalogue.posts().is_empty() {
            section.latest-posts {
                (RevealSpec::below_fold().render(reveal, None, html! { h2 { "Latest Insights" } }))
                div.card-grid {
                    @for (i, post) in ctx.catalogue.posts().iter().take(3).enumerate() {
                        (post_card(ctx, i, post))
                    }
                }
            }
        }
    }
}

fn render_contact_extras(ctx: &RenderContext, page: &StaticPage) -> Markup {
    let reveal = &ctx.site.reveal;
    let org = &ctx.site.organization;
    html! {
        (RevealSpec::below_fold().render(reveal, Some("contact-details"), html! {
            h2 { "Get in touch" }
            p { a href={ "mailto:" (org.email) } { (org.email) } }
            p { a href={ "tel:" (tel_href(&org.telephone)) } { (org.telephone) } }
        }))
        @if !page.faq.is_empty() {
            section.faq id="faq" {
                h2 { "Frequently Asked Questions" }
                @for (i, faq) in page.faq.iter().enumerate() {
                    (pages::card_reveal(i).render(reveal, Some("faq-item"), html! {
                        details {
                            summary { (faq.question) }
                            p { (faq.answer) }
                        }
                    }))
                }
            }
        }
    }
}

fn render_projects_index(ctx: &RenderContext) -> Markup {
    html! {
        div.page.page-projects {
            (hero(ctx, pages::PROJECTS_TITLE, Some(pages::PROJECTS_DESCRIPTION)))
            form.project-filter action="/projects" method="get" role="search" {
                input type="search" name="search" placeholder="Search projects" aria-label="Search projects";
                div.category-chips {
                    a.chip href="/projects" data-category="" { "All" }
                    @for category in ctx.catalogue.project_categories() {
                        a.chip href=(category_href(category)) data-category=(category) { (category) }
                    }
                }
            }
            div.card-grid {
                @for (i, project) in ctx.catalogue.projects().iter().enumerate() {
                    (project_card(ctx, i, project))
                }
            }
            p.empty-state hidden { "No projects match your search." }
            script src=(ctx.assets.filter_js.href()) defer {}
        }
    }
}

/// No-script link for a category chip.
fn category_href(category: &str) -> String {
    format!("/projects?category={}", urlencoding::encode(category))
}

fn render_blog_index(ctx: &RenderContext) -> Markup {
    html! {
        div.page.page-blog {
            (hero(ctx, pages::BLOG_TITLE, Some(pages::BLOG_DESCRIPTION)))
            div.card-grid {
                @for (i, post) in ctx.catalogue.posts().iter().enumerate() {
                    (post_card(ctx, i, post))
                }
            }
        }
    }
}

fn render_project_page(ctx: &RenderContext, project: &Project) -> Markup {
    let reveal = &ctx.site.reveal;
    let below = RevealSpec::below_fold;
    html! {
        article.project {
            (RevealSpec::above_fold().render(reveal, Some("hero"), html! {
                a.back href="/projects" { "← All Projects" }
                span.tag { (project.category) }
                h1 { (project.title) }
                p.lead { (project.description) }
            }))
            (below().render(reveal, None, html! {
                img.project-image src=(project.image_url) alt=(project.title);
            }))
            @for (heading, text) in [
                ("Overview", &project.overview),
                ("The Challenge", &project.challenge),
                ("Our Solution", &project.solution),
            ] {
                @if !text.is_empty() {
                    (below().render(reveal, None, html! {
                        section.page-section {
                            h2 { (heading) }
                            p { (text) }
                        }
                    }))
                }
            }
            @if !project.key_results.is_empty() {
                (below().render(reveal, Some("key-results"), html! {
                    h2 { "Key Results" }
                    ul {
                        @for result in &project.key_results {
                            li { (result) }
                        }
                    }
                }))
            }
            @if !project.technologies.is_empty() {
                (below().render(reveal, Some("technologies"), html! {
                    h2 { "Technologies" }
                    ul.tech-list {
                        @for tech in &project.technologies {
                            li { (tech) }
                        }
                    }
                }))
            }
        }
    }
}

fn render_post_page(ctx: &RenderContext, post: &BlogPost) -> Markup {
    let reveal = &ctx.site.reveal;
    let date = display_date(&post.date).unwrap_or_else(|| post.date.clone());
    html! {
        article.post {
            (RevealSpec::above_fold().render(reveal, Some("post-header"), html! {
                a.back href="/blog" { "← Back to Insights" }
                span.tag { (post.category) }
                h1 { (post.title) }
                p.byline {
                    time datetime=(post.date) { (date) }
                    " · "
                    span.author { (post.author) }
                }
            }))
            (RevealSpec::below_fold().render(reveal, Some("post-body"), html! {
                img.post-image src=(post.image_url) alt=(post.title);
                div.prose { (markdown(&post.body)) }
            }))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
