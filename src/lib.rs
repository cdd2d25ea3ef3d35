//! Search adapter for the Nishith Desai Associates (NDA) legal research
//! site, built for use as a plugin inside a federated-search aggregator.
//!
//! The site exposes no API, so results come from scraping its search page:
//! [`NishithDesaiEngine::build_request`] produces the GET request,
//! [`NishithDesaiEngine::parse_response`] turns the returned HTML into
//! normalized [`ResultRecord`]s, and
//! [`NishithDesaiEngine::fetch_traits`] declares locale/region hints.

pub mod engine;
pub mod fetcher;
pub mod models;
pub mod parse;

pub use engine::{EngineConfig, NishithDesaiEngine, DEFAULT_BASE_URL};
pub use models::{ContentType, EngineTraits, RequestSpec, ResultRecord, SearchResponse};
