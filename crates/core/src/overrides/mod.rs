//! Override rule resolution.
//!
//! Administrators attach an ordered list of override rules to each
//! destination. Each rule pairs match criteria (genres, keywords, original
//! language) with the settings to apply. Given a media descriptor, every rule
//! is weighted and the heaviest non-zero rule wins; the earliest declared rule
//! wins ties.
//!
//! # Example
//!
//! ```
//! use routarr_core::overrides::{
//!     resolve_override, MatchRule, MediaDescriptor, OverridePayload, OverrideRule,
//! };
//!
//! let media = MediaDescriptor::new([16, 10765], [], "ja");
//! let rules = vec![OverrideRule::new(
//!     MatchRule {
//!         genres: Some(vec![16]),
//!         languages: Some(vec!["ja".to_string()]),
//!         ..Default::default()
//!     },
//!     OverridePayload {
//!         root_folder: Some("/tv/anime".to_string()),
//!         ..Default::default()
//!     },
//! )];
//!
//! let payload = resolve_override(&media, &rules).unwrap();
//! assert_eq!(payload.root_folder.as_deref(), Some("/tv/anime"));
//! ```

mod observer;
mod resolver;
mod types;
mod weight;

pub use observer::{ResolutionObserver, TracingObserver};
pub use resolver::{evaluate, resolve_override, OverrideResolver, Resolution};
pub use types::{MatchRule, MediaDescriptor, OverridePayload, OverrideRule};
pub use weight::compute_weight;
