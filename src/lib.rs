pub mod config;
pub mod document;
pub mod fetch;
pub mod identity;
pub mod liveness;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod placeholder;
pub mod ranking;

pub use config::{Config, RankColumn, SourceMode};
pub use document::{Document, RawCell, RawRow};
pub use identity::{Identity, IdentityTable};
pub use normalize::CanonicalRecord;
pub use pipeline::Standings;
pub use ranking::RankingMode;
