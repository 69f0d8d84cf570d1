//! Shared test utilities for the versavio-site test suite.
//!
//! Provides fixture setup plus lookup helpers and bulk extractors over the
//! content catalogue (`Catalogue`, `BlogPost`, `Project`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalogue = Catalogue::load(tmp.path()).unwrap();
//!
//! let post = find_post(&catalogue, "ai-native-erp-sap-2026");
//! assert_eq!(post.category, "AI & ERP");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::{BlogPost, Catalogue, Project};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Catalogue lookups: panic with a clear message on miss
// =========================================================================

/// Find a blog post by slug. Panics if not found.
pub fn find_post<'a>(catalogue: &'a Catalogue, slug: &str) -> &'a BlogPost {
    catalogue.post(slug).unwrap_or_else(|| {
        let slugs = post_slugs(catalogue);
        panic!("post '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a project by id. Panics if not found.
pub fn find_project<'a>(catalogue: &'a Catalogue, id: &str) -> &'a Project {
    catalogue.project(id).unwrap_or_else(|| {
        let ids = project_ids(catalogue);
        panic!("project '{id}' not found. Available: {ids:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All post slugs in listing order.
pub fn post_slugs(catalogue: &Catalogue) -> Vec<&str> {
    catalogue.posts().iter().map(|p| p.slug.as_str()).collect()
}

/// All project ids in listing order.
pub fn project_ids(catalogue: &Catalogue) -> Vec<&str> {
    catalogue.projects().iter().map(|p| p.id.as_str()).collect()
}

/// Load the fixture catalogue and static pages from a fixture copy.
pub fn load_fixture_content(
    root: &Path,
) -> (Catalogue, crate::content::StaticPages) {
    let catalogue = Catalogue::load(root).unwrap();
    let pages = crate::content::StaticPages::load(root).unwrap();
    (catalogue, pages)
}
