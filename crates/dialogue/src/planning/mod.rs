//! Partner deal planning: the service-pack catalog and the recommendation engine
//! that ranks it against a deal's mode, trigger, vendor posture, and partner
//! capabilities.

pub mod catalog;
pub mod domain;
pub mod scoring;

pub use catalog::{CatalogError, ServicePackCatalog};
pub use domain::{
    CapabilityLevel, DealContext, DealTrigger, EngagementMode, PackTag, ProofAsset, ServicePack,
    VendorPosture,
};
pub use scoring::{
    CapabilityShortfall, PackBreakdown, ScoreComponent, ScoreFactor, ScoredPack, ScoringConfig,
    ScoringEngine,
};
