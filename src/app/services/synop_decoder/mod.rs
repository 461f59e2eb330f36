//! FM-12 SYNOP decoding pipeline
//!
//! Turns one station's report inside a bulletin into physical quantities.
//! The pipeline is pure and synchronous: it performs no I/O and holds no
//! shared mutable state, so decodes may run concurrently without coordination.
//!
//! # Architecture
//!
//! - [`splitter`] - Bulletin normalisation, header parsing and station report splitting
//! - [`groups`] - Positional decoding of section 1 and section 3 groups
//! - [`extract`] - Conversion of decoded codes into physical values
//!
//! # Example Usage
//!
//! ```rust
//! use synop_processor::app::services::synop_decoder::{decode, split};
//!
//! let bulletin = "AAXX 15004\n78355 46912 70802 10251 20198 39850 40050=";
//! let sections = split(bulletin, 78355).unwrap();
//! let groups = decode(&sections);
//! assert_eq!(groups.temperature.as_deref(), Some("251"));
//! ```

pub mod extract;
pub mod groups;
pub mod splitter;

#[cfg(test)]
pub mod tests;

pub use extract::observation;
pub use groups::{DecodedGroups, GroupMatch, decode};
pub use splitter::{parse_bulletin, split, split_lines};
