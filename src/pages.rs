//! Page assembly: what each route says about itself.
//!
//! [`metadata_for`] turns a [`Route`] plus the loaded content into the
//! [`PageMetadata`] handed to [`crate::seo::compose`], including the page's own
//! structured-data records:
//!
//! | Route        | og:type | JSON-LD                        |
//! |--------------|---------|--------------------------------|
//! | Home         | website | ProfessionalService            |
//! | About        | website | AboutPage                      |
//! | Services     | website | none                           |
//! | Contact      | website | ContactPage, FAQPage           |
//! | Projects     | website | CollectionPage                 |
//! | Project(id)  | website | CreativeWork, BreadcrumbList   |
//! | Blog         | website | CollectionPage                 |
//! | Post(slug)   | article | BlogPosting, BreadcrumbList    |
//!
//! [`sections_for`] and [`card_reveal`] decide how blocks reveal: the first
//! section of a page sits above the fold, everything after it is gated on the
//! viewport, and card grids stagger by [`CARD_STAGGER_SECS`] per card.

use crate::config::SiteConfig;
use crate::content::{BlogPost, Catalogue, Faq, Project, Section, StaticPage, StaticPages};
use crate::reveal::RevealSpec;
use crate::routes::Route;
use crate::seo::PageMetadata;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageError {
    #[error("no {kind} with key '{key}'")]
    NotFound { kind: &'static str, key: String },
    #[error("static page '{0}' is not loaded")]
    MissingStaticPage(&'static str),
}

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Delay added per card position in a grid.
pub const CARD_STAGGER_SECS: f64 = 0.1;

pub const PROJECTS_TITLE: &str = "Projects & Case Studies";
pub const PROJECTS_DESCRIPTION: &str = "Case studies of AI automation, SAP integration, and enterprise software delivered by Versavio Tech across finance, healthcare, e-commerce, and events.";
pub const BLOG_TITLE: &str = "Insights & Articles";
pub const BLOG_DESCRIPTION: &str = "Research and perspectives on AI-native ERP, SAP BTP, and workflow automation from the Versavio Tech team.";

/// Build the metadata for one route.
pub fn metadata_for(
    route: &Route,
    catalogue: &Catalogue,
    pages: &StaticPages,
    site: &SiteConfig,
) -> Result<PageMetadata, PageError> {
    let path = route.path();
    let url = site.absolute_url(&path);

    let meta = match route {
        Route::Home => {
            let page = static_page(pages, "home")?;
            page_meta(page, &path).with_structured_data(professional_service(site, page))
        }
        Route::About => {
            let page = static_page(pages, "about")?;
            page_meta(page, &path).with_structured_data(json!({
                "@context": SCHEMA_CONTEXT,
                "@type": "AboutPage",
                "name": page.title,
                "url": url,
                "mainEntity": {
                    "@type": "Organization",
                    "name": site.site.name,
                    "description": site.site.description,
                },
            }))
        }
        Route::Services => page_meta(static_page(pages, "services")?, &path),
        Route::Contact => {
            let page = static_page(pages, "contact")?;
            let org = &site.organization;
            let mut meta = page_meta(page, &path).with_structured_data(json!({
                "@context": SCHEMA_CONTEXT,
                "@type": "ContactPage",
                "name": page.title,
                "description": page.description,
                "url": url,
                "mainEntity": {
                    "@type": "Organization",
                    "name": site.site.name,
                    "url": site.site.base_url,
                    "email": org.email,
                    "telephone": org.telephone,
                    "contactPoint": {
                        "@type": "ContactPoint",
                        "telephone": org.telephone,
                        "contactType": org.contact_type,
                        "email": org.email,
                    },
                },
            }));
            if !page.faq.is_empty() {
                meta = meta.with_structured_data(faq_page(&page.faq));
            }
            meta
        }
        Route::Projects => PageMetadata::new(PROJECTS_TITLE, PROJECTS_DESCRIPTION)
            .canonical(&path)
            .with_structured_data(collection_page(
                site,
                PROJECTS_TITLE,
                PROJECTS_DESCRIPTION,
                &url,
                catalogue
                    .projects()
                    .iter()
                    .map(|p| (p.title.as_str(), Route::Project(p.id.clone()))),
            )),
        Route::Blog => PageMetadata::new(BLOG_TITLE, BLOG_DESCRIPTION)
            .canonical(&path)
            .with_structured_data(collection_page(
                site,
                BLOG_TITLE,
                BLOG_DESCRIPTION,
                &url,
                catalogue
                    .posts()
                    .iter()
                    .map(|p| (p.title.as_str(), Route::Post(p.slug.clone()))),
            )),
        Route::Project(id) => {
            let project = catalogue.project(id).ok_or_else(|| PageError::NotFound {
                kind: "project",
                key: id.clone(),
            })?;
            PageMetadata::new(&project.title, &project.description)
                .canonical(&path)
                .og_image(&project.image_url)
                .with_structured_data(creative_work(site, project, &url))
                .with_structured_data(breadcrumbs(site, route, &project.title))
        }
        Route::Post(slug) => {
            let post = catalogue.post(slug).ok_or_else(|| PageError::NotFound {
                kind: "post",
                key: slug.clone(),
            })?;
            PageMetadata::new(&post.meta_title, &post.meta_description)
                .canonical(&path)
                .og_image(&post.image_url)
                .article(Some(post.date.clone()), Some(post.author.clone()))
                .with_structured_data(blog_posting(site, post, &url))
                .with_structured_data(breadcrumbs(site, route, &post.title))
        }
    };
    Ok(meta)
}

fn static_page<'a>(pages: &'a StaticPages, name: &'static str) -> Result<&'a StaticPage, PageError> {
    pages.get(name).ok_or(PageError::MissingStaticPage(name))
}

fn page_meta(page: &StaticPage, path: &str) -> PageMetadata {
    PageMetadata::new(&page.title, &page.description).canonical(path)
}

fn professional_service(site: &SiteConfig, page: &StaticPage) -> Value {
    let org = &site.organization;
    let services: Vec<&str> = page
        .sections
        .iter()
        .filter_map(|s| s.heading.as_deref())
        .collect();
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ProfessionalService",
        "name": site.site.name,
        "description": site.site.description,
        "url": site.site.base_url,
        "image": site.absolute_url(&site.site.logo),
        "telephone": org.telephone,
        "email": org.email,
        "priceRange": "$$",
        "serviceType": services,
        "areaServed": { "@type": "Place", "name": "Worldwide" },
    })
}

fn faq_page(faq: &[Faq]) -> Value {
    let questions: Vec<Value> = faq
        .iter()
        .map(|f| {
            json!({
                "@type": "Question",
                "name": f.question,
                "acceptedAnswer": { "@type": "Answer", "text": f.answer },
            })
        })
        .collect();
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": questions,
    })
}

fn collection_page<'a>(
    site: &SiteConfig,
    name: &str,
    description: &str,
    url: &str,
    items: impl Iterator<Item = (&'a str, Route)>,
) -> Value {
    let elements: Vec<Value> = items
        .enumerate()
        .map(|(i, (title, route))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": title,
                "url": site.absolute_url(&route.path()),
            })
        })
        .collect();
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "CollectionPage",
        "name": name,
        "description": description,
        "url": url,
        "mainEntity": { "@type": "ItemList", "itemListElement": elements },
    })
}

fn creative_work(site: &SiteConfig, project: &Project, url: &str) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "CreativeWork",
        "name": project.title,
        "description": project.description,
        "image": site.absolute_url(&project.image_url),
        "genre": project.category,
        "keywords": project.technologies.join(", "),
        "url": url,
        "creator": { "@type": "Organization", "name": site.site.name },
    })
}

fn blog_posting(site: &SiteConfig, post: &BlogPost, url: &str) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.meta_description,
        "image": site.absolute_url(&post.image_url),
        "datePublished": post.date,
        "articleSection": post.category,
        "author": { "@type": "Organization", "name": post.author },
        "publisher": {
            "@type": "Organization",
            "name": site.site.name,
            "logo": { "@type": "ImageObject", "url": site.absolute_url(&site.site.logo) },
        },
        "mainEntityOfPage": { "@type": "WebPage", "@id": url },
    })
}

/// Home → collection index → current page.
fn breadcrumbs(site: &SiteConfig, route: &Route, title: &str) -> Value {
    let mut trail = vec![("Home".to_string(), Route::Home)];
    if let Some(parent) = route.parent() {
        let label = match parent {
            Route::Blog => "Blog",
            _ => "Projects",
        };
        trail.push((label.to_string(), parent));
    }
    trail.push((title.to_string(), route.clone()));

    let elements: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(i, (name, route))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": site.absolute_url(&route.path()),
            })
        })
        .collect();
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

// ============================================================================
// Reveal plans
// ============================================================================

/// A page section paired with its reveal parameters.
#[derive(Debug, Clone, Copy)]
pub struct PlannedSection<'a> {
    pub section: &'a Section,
    pub reveal: RevealSpec,
}

/// Reveal plan for a static page's body sections.
pub fn sections_for(page: &StaticPage) -> Vec<PlannedSection<'_>> {
    page.sections
        .iter()
        .enumerate()
        .map(|(i, section)| PlannedSection {
            section,
            reveal: if i == 0 {
                RevealSpec::above_fold()
            } else {
                RevealSpec::below_fold()
            },
        })
        .collect()
}

/// Reveal parameters for the `index`-th card in a grid.
pub fn card_reveal(index: usize) -> RevealSpec {
    RevealSpec::below_fold().with_delay_secs(index as f64 * CARD_STAGGER_SECS)
}
