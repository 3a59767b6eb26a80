mod assemble;
mod client;
mod links;
mod ordering;
mod provider;
mod types;


pub use client::{GitLabClient, DEFAULT_MAX_CONCURRENT_REQUESTS};
pub use ordering::{EnvironmentOrder, DEFAULT_ENVIRONMENT_ORDER};
pub use provider::{GitLabProvider, ListingOptions, DEFAULT_MIN_ACCESS_LEVEL, DEFAULT_PER_PAGE};
