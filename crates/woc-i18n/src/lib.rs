#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::future_not_send)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Locale loading and language switching for the Wells of Change site.
//!
//! The crate is browser-agnostic: resources arrive through [`ResourceFetcher`]
//! and text is written through [`Page`], so the switch state machine runs the
//! same in wasm, in the preview CLI and in tests.
//!
//! Layout: `locale` (tags and display catalog), `config` (site settings and
//! resource URLs), `table` (parsed resources), `loader` (fetch and single-slot
//! cache), `slots` (slot table), `page` (page seam and in-memory page),
//! `rehydrate` (render pass), `gate` (readiness gate), `controller` (switch
//! state machine).

pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod gate;
pub mod loader;
pub mod locale;
pub mod page;
pub mod rehydrate;
pub mod slots;
pub mod table;

pub use config::{ResourceLocator, SiteConfig, SubpathRule, SwitchOrdering};
pub use controller::{SwitchController, SwitchOutcome, SwitchState};
pub use error::{ConfigError, FetchError, FetchResult, I18nError, I18nResult};
pub use fetch::ResourceFetcher;
pub use gate::ReadinessGate;
pub use loader::{LocaleLoader, Translate};
pub use locale::{LocaleCatalog, LocaleEntry, LocaleTag};
pub use page::{MemoryPage, Page, PageError, PageResult, SelectorState, SlotWrite};
pub use rehydrate::{RenderReport, Rehydrator};
pub use slots::{SITE_SLOTS, SlotBinding, SlotKind};
pub use table::TranslationTable;
