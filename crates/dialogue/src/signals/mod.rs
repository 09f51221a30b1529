//! Weekly account signal pooling across the extractor, curated quick briefs,
//! and the legacy history store.

pub mod domain;
pub mod import;
mod pool;
pub mod store;

pub use domain::{
    ConfidenceLabel, ExtractedSignal, HistoricalSignal, PooledSignal, QuickBrief, SignalOrigin,
};
pub use import::{SignalImportError, SignalStoreImporter};
pub use pool::{SignalPoolBuilder, StorePoolBuilder};
pub use store::{
    ExtractedSignalSource, InMemorySignalStore, QuickBriefSource, SignalHistorySource,
};
