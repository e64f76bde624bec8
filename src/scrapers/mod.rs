//! Fetching and analyzing article pages.
//!
//! Processing one address is a two-phase affair:
//!
//! 1. **Fetching** ([`fetch`]): download the page through a [`PageSource`],
//!    decoding it with the declared charset ([`charset`])
//! 2. **Extraction** ([`extract`]): derive an [`ArticleRecord`] from the parsed
//!    document, guided by an [`ExtractionPolicy`] ([`policy`])
//!
//! Only the fetch phase can fail. Extraction degrades to sentinel values
//! when the page lacks the expected structure.
//!
//! [`ArticleRecord`]: crate::models::ArticleRecord

pub mod charset;
pub mod extract;
pub mod fetch;
pub mod policy;

pub use extract::extract_from_html;
pub use fetch::{HttpFetcher, PageSource};
pub use policy::{CompiledPolicy, ExtractionPolicy};
