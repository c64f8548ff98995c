//! Gerrit corporate signing flow: outcome resolution, navigation targets,
//! approval list normalization and debounced company search.

pub mod approval_list;
pub mod destination;
pub mod resolver;
pub mod search;

pub use destination::{Destination, GitService};
pub use resolver::{Resolution, SignatureStore, SigningStatusResolver};
pub use search::{DebouncedSearchFilter, FilterResult, filter_companies};
