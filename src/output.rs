//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each page is shown by
//! its route identity and positional index, with the file it was written to
//! and its composed metadata as indented context lines.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 Home → index.html
//!     Title: Versavio Tech | AI Solutions & Enterprise Software Development
//!     Schema: Organization, WebSite, ProfessionalService
//! 002 About → about/index.html
//!     Title: About Versavio Tech - Enterprise AI & Digital Transformation
//!     Schema: Organization, AboutPage
//!
//! Assets
//!     static/site-3f9a1c0b7e.css
//!     static/reveal-91d2e4a0c3.js
//!     assets/ (2 files)
//!
//! Generated 13 pages, 13 sitemap entries → dist
//! ```
//!
//! ## Check
//!
//! ```text
//! Content
//!     Blog posts: 3
//!     Projects: 4 (Enterprise, Healthcare, Events)
//!
//! Pages
//! 001 Home → index.html
//!     ...
//! ```
//!
//! ## Reveal
//!
//! ```text
//! Block: below fold, direction up, delay 0s, enters at 0.5s
//!  0.00s  hidden   x=0.0 y=20.0 opacity=1.0
//!  0.60s  visible  x=0.0 y=3.1 opacity=1.0
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::{self, GenerateReport, GeneratedPage, SiteInventory};
use crate::reveal::{FoldClass, RevealSpec, TimelineSample};
use crate::routes::Resolution;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

const TITLE_WIDTH: usize = 80;

/// Page header plus title and schema context lines.
///
/// ```text
/// 001 Home → index.html
///     Title: Versavio Tech | AI Solutions
///     Schema: Organization, WebSite
/// ```
fn page_lines(index: usize, page: &GeneratedPage) -> Vec<String> {
    vec![
        format!(
            "{} {} \u{2192} {}",
            format_index(index),
            page.route,
            page.output_file.display()
        ),
        format!("{}Title: {}", indent(1), truncate(&page.full_title, TITLE_WIDTH)),
        format!("{}Schema: {}", indent(1), page.schema_types.join(", ")),
    ]
}

fn pages_section(pages: &[GeneratedPage]) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in pages.iter().enumerate() {
        lines.extend(page_lines(i + 1, page));
    }
    lines
}

fn secs(d: Duration) -> String {
    format!("{:.2}s", d.as_secs_f64())
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = pages_section(&report.pages);

    lines.push(String::new());
    lines.push("Assets".to_string());
    for asset in &report.assets {
        lines.push(format!("{}static/{}", indent(1), asset));
    }
    if report.copied_assets > 0 {
        lines.push(format!(
            "{}assets/ ({} files)",
            indent(1),
            report.copied_assets
        ));
    }
    lines.push(format!(
        "{}{}, {} ({} redirect rules)",
        indent(1),
        generate::NOT_FOUND_FILE,
        generate::REDIRECTS_FILE,
        report.redirect_rules
    ));

    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, {} sitemap entries \u{2192} {}",
        report.pages.len(),
        report.sitemap_entries,
        report.output_dir.display()
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &GenerateReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(inventory: &SiteInventory, source_root: &Path) -> Vec<String> {
    let mut lines = vec![
        "Content".to_string(),
        format!("{}Source: {}", indent(1), source_root.display()),
        format!("{}Blog posts: {}", indent(1), inventory.posts),
    ];
    if inventory.categories.is_empty() {
        lines.push(format!("{}Projects: {}", indent(1), inventory.projects));
    } else {
        lines.push(format!(
            "{}Projects: {} ({})",
            indent(1),
            inventory.projects,
            inventory.categories.join(", ")
        ));
    }

    lines.push(String::new());
    lines.extend(pages_section(&inventory.pages));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(inventory: &SiteInventory, source_root: &Path) {
    for line in format_check_output(inventory, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve
// ============================================================================

pub fn format_resolution(path: &str, resolution: &Resolution) -> Vec<String> {
    let line = match resolution {
        Resolution::Page(route) => format!(
            "{} \u{2192} {} ({})",
            path,
            route,
            route.output_file().display()
        ),
        Resolution::Redirect(target) => format!("{} \u{2192} redirect {}", path, target),
        Resolution::NotFound => format!("{} \u{2192} not found", path),
    };
    vec![line]
}

/// Print a route resolution to stdout.
pub fn print_resolution(path: &str, resolution: &Resolution) {
    for line in format_resolution(path, resolution) {
        println!("{}", line);
    }
}

// ============================================================================
// Reveal timeline
// ============================================================================

pub fn format_timeline(
    spec: &RevealSpec,
    enter_at: Option<Duration>,
    samples: &[TimelineSample],
) -> Vec<String> {
    let fold = match spec.fold {
        FoldClass::AboveFold => "above fold",
        FoldClass::BelowFold => "below fold",
    };
    let entry = match (spec.fold, enter_at) {
        (FoldClass::AboveFold, _) => String::new(),
        (FoldClass::BelowFold, Some(at)) => format!(", enters at {}", secs(at)),
        (FoldClass::BelowFold, None) => ", never enters".to_string(),
    };
    let mut lines = vec![format!(
        "Block: {}, direction {}, delay {}{}",
        fold,
        spec.direction,
        secs(spec.delay),
        entry
    )];
    for sample in samples {
        lines.push(format!(
            "{:>6}  {:<8} x={:.1} y={:.1} opacity={:.1}",
            secs(sample.at),
            sample.state.to_string(),
            sample.frame.x,
            sample.frame.y,
            sample.frame.opacity
        ));
    }
    lines
}

/// Print a reveal timeline to stdout.
pub fn print_timeline(spec: &RevealSpec, enter_at: Option<Duration>, samples: &[TimelineSample]) {
    for line in format_timeline(spec, enter_at, samples) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::{Direction, RevealState, VisualFrame};
    use crate::routes::Route;
    use std::path::PathBuf;

    fn page(route: Route, title: &str, schema: &[&str]) -> GeneratedPage {
        GeneratedPage {
            output_file: route.output_file(),
            route,
            full_title: title.to_string(),
            schema_types: schema.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn report() -> GenerateReport {
        GenerateReport {
            output_dir: PathBuf::from("dist"),
            pages: vec![
                page(
                    Route::Home,
                    "Versavio Tech | AI Solutions",
                    &["Organization", "WebSite"],
                ),
                page(
                    Route::Post("ai-native-erp-sap-2026".into()),
                    "AI Native SAP Trends 2026 | Future of ERP | Versavio Tech",
                    &["Organization", "BlogPosting", "BreadcrumbList"],
                ),
            ],
            assets: vec!["site-0123456789.css".into(), "reveal-abcdef0123.js".into()],
            sitemap_entries: 2,
            copied_assets: 3,
            redirect_rules: 2,
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn indent_is_four_spaces_per_level() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("Trends 2025–2026", 12), "Trends 2025–...");
    }

    // =========================================================================
    // Build
    // =========================================================================

    #[test]
    fn build_output_lists_pages_with_context() {
        let lines = format_build_output(&report());
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "001 Home \u{2192} index.html");
        assert_eq!(lines[2], "    Title: Versavio Tech | AI Solutions");
        assert_eq!(lines[3], "    Schema: Organization, WebSite");
        assert_eq!(
            lines[4],
            "002 Post(ai-native-erp-sap-2026) \u{2192} blog/ai-native-erp-sap-2026/index.html"
        );
    }

    #[test]
    fn build_output_lists_assets_and_summary() {
        let lines = format_build_output(&report());
        assert!(lines.contains(&"    static/site-0123456789.css".to_string()));
        assert!(lines.contains(&"    assets/ (3 files)".to_string()));
        assert!(lines.contains(&"    404.html, _redirects (2 redirect rules)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 pages, 2 sitemap entries \u{2192} dist"
        );
    }

    #[test]
    fn build_output_omits_empty_asset_copy() {
        let mut r = report();
        r.copied_assets = 0;
        let lines = format_build_output(&r);
        assert!(!lines.iter().any(|l| l.contains("assets/ (")));
    }

    // =========================================================================
    // Check
    // =========================================================================

    #[test]
    fn check_output_shows_inventory() {
        let inventory = SiteInventory {
            posts: 3,
            projects: 4,
            categories: vec!["Enterprise".into(), "Healthcare".into()],
            pages: vec![page(Route::Contact, "Contact | Versavio Tech", &["Organization"])],
        };
        let lines = format_check_output(&inventory, Path::new("content"));
        assert_eq!(lines[0], "Content");
        assert_eq!(lines[1], "    Source: content");
        assert_eq!(lines[2], "    Blog posts: 3");
        assert_eq!(lines[3], "    Projects: 4 (Enterprise, Healthcare)");
        assert!(lines.contains(&"001 Contact \u{2192} contact/index.html".to_string()));
    }

    #[test]
    fn check_output_without_categories() {
        let inventory = SiteInventory {
            posts: 0,
            projects: 0,
            categories: vec![],
            pages: vec![],
        };
        let lines = format_check_output(&inventory, Path::new("content"));
        assert_eq!(lines[3], "    Projects: 0");
    }

    // =========================================================================
    // Resolve
    // =========================================================================

    #[test]
    fn resolution_lines() {
        assert_eq!(
            format_resolution("/about/", &Resolution::Page(Route::About)),
            vec!["/about/ \u{2192} About (about/index.html)"]
        );
        assert_eq!(
            format_resolution("/blog/missing", &Resolution::Redirect("/blog")),
            vec!["/blog/missing \u{2192} redirect /blog"]
        );
        assert_eq!(
            format_resolution("/careers", &Resolution::NotFound),
            vec!["/careers \u{2192} not found"]
        );
    }

    // =========================================================================
    // Reveal
    // =========================================================================

    #[test]
    fn timeline_header_and_rows() {
        let spec = RevealSpec::below_fold().with_direction(Direction::Left);
        let samples = vec![TimelineSample {
            at: Duration::ZERO,
            state: RevealState::Hidden,
            frame: VisualFrame {
                x: 20.0,
                y: 0.0,
                opacity: 1.0,
            },
        }];
        let lines = format_timeline(&spec, Some(Duration::from_millis(500)), &samples);
        assert_eq!(
            lines[0],
            "Block: below fold, direction left, delay 0.00s, enters at 0.50s"
        );
        assert_eq!(lines[1], " 0.00s  hidden   x=20.0 y=0.0 opacity=1.0");
    }

    #[test]
    fn timeline_header_for_above_fold_has_no_entry() {
        let spec = RevealSpec::above_fold();
        let lines = format_timeline(&spec, Some(Duration::from_secs(1)), &[]);
        assert_eq!(lines, vec!["Block: above fold, direction up, delay 0.00s"]);
    }

    #[test]
    fn timeline_header_when_never_entering() {
        let spec = RevealSpec::below_fold();
        let lines = format_timeline(&spec, None, &[]);
        assert!(lines[0].ends_with(", never enters"));
    }
}
