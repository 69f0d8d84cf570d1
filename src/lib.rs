//! # Versavio Site
//!
//! Static site generator for the Versavio Tech consultancy website. Content
//! lives in a directory of markdown and TOML files; the build turns it into
//! plain HTML with search metadata and scroll-triggered reveal transitions.
//!
//! # Architecture
//!
//! ```text
//! content/  ──load──▶  Catalogue + StaticPages + SiteConfig
//!                          │
//!            routes::all_routes ──▶ pages::metadata_for ──▶ seo::compose ──▶ <head>
//!                          │
//!            pages::sections_for / card_reveal ──▶ reveal::RevealSpec::render ──▶ <body>
//!                          │
//!                   generate (maud, rayon) ──▶ dist/
//! ```
//!
//! Two subsystems carry the interesting logic:
//!
//! - **Reveal scheduling** ([`reveal`]): whether and when each content block
//!   moves from its offset hidden state to its resting visible state. Blocks
//!   above the fold reveal on mount; blocks below wait for the viewport.
//!   Reveal is one-shot and never hides text.
//! - **Metadata composition** ([`seo`]): a pure function from page identity to
//!   the full head document (title, canonical URL, social tags, JSON-LD).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`reveal`] | Fold-driven reveal policy, easing, block scheduler with a pluggable viewport observer |
//! | [`seo`] | Head document composition and rendering |
//! | [`content`] | Blog post, project, and static page loading; catalogue queries |
//! | [`routes`] | Path resolution, route table, navigation |
//! | [`pages`] | Per-route metadata, structured data, and reveal plans |
//! | [`generate`] | HTML rendering, sitemap, robots, fingerprinted assets |
//! | [`config`] | `config.toml` loading, merging onto stock defaults, validation, CSS generation |
//! | [`naming`] | `NNN-slug` filename convention parser |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error, template variables are
//! Rust expressions, and all interpolation is auto-escaped.
//!
//! ## Reveal Without Hiding
//!
//! The hidden state is a translation, never a fade. A page whose script fails
//! to load, or a browser without intersection observers, still shows every
//! word. The reveal script treats observer failure as "show now".
//!
//! ## Deterministic Metadata
//!
//! Metadata composition has no clock and no I/O. JSON objects serialize with
//! sorted keys, so rebuilding unchanged content yields byte-identical pages.
//! Site-wide records (Organization, WebSite) are owned by the composer; pages
//! cannot supply them.

pub mod config;
pub mod content;
pub mod generate;
pub mod naming;
pub mod output;
pub mod pages;
pub mod reveal;
pub mod routes;
pub mod seo;

#[cfg(test)]
pub(crate) mod test_helpers;
