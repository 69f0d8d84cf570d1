//! URL routing: path → page identity.
//!
//! The site has a fixed route table plus two keyed collections:
//!
//! | Path               | Route              |
//! |--------------------|--------------------|
//! | `/`                | `Home`             |
//! | `/about`           | `About`            |
//! | `/services`        | `Services`         |
//! | `/projects`        | `Projects`         |
//! | `/projects/{id}`   | `Project(id)`      |
//! | `/blog`            | `Blog`             |
//! | `/blog/{slug}`     | `Post(slug)`       |
//! | `/contact`         | `Contact`          |
//!
//! A keyed path whose key is not in the catalogue redirects to its collection
//! index instead of rendering an empty page. Anything else is not found.

use crate::content::Catalogue;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Services,
    Projects,
    Project(String),
    Blog,
    Post(String),
    Contact,
}

impl Route {
    /// Site-relative path without a trailing slash (`/` for home).
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Services => "/services".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::Project(id) => format!("/projects/{id}"),
            Route::Blog => "/blog".to_string(),
            Route::Post(slug) => format!("/blog/{slug}"),
            Route::Contact => "/contact".to_string(),
        }
    }

    /// Output file relative to the build directory.
    pub fn output_file(&self) -> PathBuf {
        let path = self.path();
        let dir = path.trim_start_matches('/');
        if dir.is_empty() {
            PathBuf::from("index.html")
        } else {
            PathBuf::from(dir).join("index.html")
        }
    }

    /// Collection index for keyed routes.
    pub fn parent(&self) -> Option<Route> {
        match self {
            Route::Project(_) => Some(Route::Projects),
            Route::Post(_) => Some(Route::Blog),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "Home"),
            Route::About => write!(f, "About"),
            Route::Services => write!(f, "Services"),
            Route::Projects => write!(f, "Projects"),
            Route::Project(id) => write!(f, "Project({id})"),
            Route::Blog => write!(f, "Blog"),
            Route::Post(slug) => write!(f, "Post({slug})"),
            Route::Contact => write!(f, "Contact"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(Route),
    /// Lookup miss on a keyed route; target is the collection index.
    Redirect(&'static str),
    NotFound,
}

/// Split a request path into its meaningful segments.
///
/// Query strings, fragments, repeated and trailing slashes, and a final
/// `index.html` are ignored. Returns `None` for dot segments.
fn segments(path: &str) -> Option<Vec<&str>> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segs: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segs.last() == Some(&"index.html") {
        segs.pop();
    }
    if segs.iter().any(|s| *s == "." || *s == "..") {
        return None;
    }
    Some(segs)
}

/// Resolve a request path against the route table and catalogue.
pub fn resolve(path: &str, catalogue: &Catalogue) -> Resolution {
    let Some(segs) = segments(path) else {
        return Resolution::NotFound;
    };
    match segs.as_slice() {
        [] => Resolution::Page(Route::Home),
        ["about"] => Resolution::Page(Route::About),
        ["services"] => Resolution::Page(Route::Services),
        ["projects"] => Resolution::Page(Route::Projects),
        ["projects", id] if catalogue.project(id).is_some() => {
            Resolution::Page(Route::Project(id.to_string()))
        }
        ["blog"] => Resolution::Page(Route::Blog),
        ["blog", slug] if catalogue.post(slug).is_some() => {
            Resolution::Page(Route::Post(slug.to_string()))
        }
        ["contact"] => Resolution::Page(Route::Contact),
        _ => match miss_target(&segs) {
            Some(index) => Resolution::Redirect(index),
            None => Resolution::NotFound,
        },
    }
}

/// Keyed collections as `(segment, index path)`. A path with exactly one
/// key under a collection segment that names no entry lands on the index.
const COLLECTIONS: [(&str, &str); 2] = [("projects", "/projects"), ("blog", "/blog")];

pub fn collection_redirects() -> &'static [(&'static str, &'static str)] {
    &COLLECTIONS
}

fn miss_target(segs: &[&str]) -> Option<&'static str> {
    match segs {
        [collection, _] => COLLECTIONS
            .iter()
            .find(|(segment, _)| segment == collection)
            .map(|(_, index)| *index),
        _ => None,
    }
}

/// Every renderable route: static pages, then projects, then posts.
pub fn all_routes(catalogue: &Catalogue) -> Vec<Route> {
    let mut routes = vec![
        Route::Home,
        Route::About,
        Route::Services,
        Route::Projects,
        Route::Blog,
        Route::Contact,
    ];
    routes.extend(
        catalogue
            .projects()
            .iter()
            .map(|p| Route::Project(p.id.clone())),
    );
    routes.extend(catalogue.posts().iter().map(|p| Route::Post(p.slug.clone())));
    routes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

const NAVIGATION: [NavItem; 5] = [
    NavItem { label: "Home", path: "/" },
    NavItem { label: "About Us", path: "/about" },
    NavItem { label: "Services", path: "/services" },
    NavItem { label: "Projects", path: "/projects" },
    NavItem { label: "Blog", path: "/blog" },
];

/// Primary navigation in display order. Contact is a separate call to action.
pub fn navigation() -> &'static [NavItem] {
    &NAVIGATION
}

/// Whether a nav entry is active for the current page.
///
/// Home is active only on `/`; other entries also cover their sub-pages.
pub fn is_active(nav_path: &str, current_path: &str) -> bool {
    if nav_path == "/" {
        return current_path == "/";
    }
    current_path == nav_path
        || current_path
            .strip_prefix(nav_path)
            .is_some_and(|rest| rest.starts_with('/'))
}
