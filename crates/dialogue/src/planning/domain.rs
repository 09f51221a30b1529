use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Topic tags linking service packs to the scoring weight tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackTag {
    AiReadiness,
    AiGovernance,
    RagAgents,
    DataPlatform,
    SecurityIdentity,
    M365Copilot,
    Finops,
    AdoptionChange,
    CloudOps,
    AppModernization,
}

impl PackTag {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::AiReadiness,
            Self::AiGovernance,
            Self::RagAgents,
            Self::DataPlatform,
            Self::SecurityIdentity,
            Self::M365Copilot,
            Self::Finops,
            Self::AdoptionChange,
            Self::CloudOps,
            Self::AppModernization,
        ]
    }

    /// Wire key, matching the serialized form.
    pub const fn key(self) -> &'static str {
        match self {
            Self::AiReadiness => "ai_readiness",
            Self::AiGovernance => "ai_governance",
            Self::RagAgents => "rag_agents",
            Self::DataPlatform => "data_platform",
            Self::SecurityIdentity => "security_identity",
            Self::M365Copilot => "m365_copilot",
            Self::Finops => "finops",
            Self::AdoptionChange => "adoption_change",
            Self::CloudOps => "cloud_ops",
            Self::AppModernization => "app_modernization",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AiReadiness => "AI readiness",
            Self::AiGovernance => "AI governance",
            Self::RagAgents => "RAG & agents",
            Self::DataPlatform => "data platform",
            Self::SecurityIdentity => "security & identity",
            Self::M365Copilot => "Microsoft 365 Copilot",
            Self::Finops => "FinOps",
            Self::AdoptionChange => "adoption & change",
            Self::CloudOps => "cloud operations",
            Self::AppModernization => "app modernization",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ordered()
            .into_iter()
            .find(|tag| tag.key().eq_ignore_ascii_case(needle))
    }
}

/// Partner proficiency in a capability domain, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityLevel {
    None,
    Some,
    Recognized,
    Strong,
}

impl CapabilityLevel {
    pub const fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Some => 1,
            Self::Recognized => 2,
            Self::Strong => 3,
        }
    }

    pub const fn meets(self, minimum: CapabilityLevel) -> bool {
        self.rank() >= minimum.rank()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Some => "Some",
            Self::Recognized => "Recognized",
            Self::Strong => "Strong",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "some" => Some(Self::Some),
            "recognized" | "recognised" => Some(Self::Recognized),
            "strong" => Some(Self::Strong),
            _ => None,
        }
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stage or purpose of the current sales engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EngagementMode {
    #[serde(rename = "Discovery / Qualification")]
    Discovery,
    #[serde(rename = "Architecture & Technical Validation")]
    ArchitectureValidation,
    #[serde(rename = "Security / Governance Review")]
    SecurityGovernanceReview,
    #[serde(rename = "Commercial / Procurement")]
    CommercialProcurement,
    #[serde(rename = "Delivery / Adoption")]
    DeliveryAdoption,
    #[serde(rename = "Competitive Takeout / Defense")]
    CompetitiveTakeout,
}

impl EngagementMode {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Discovery,
            Self::ArchitectureValidation,
            Self::SecurityGovernanceReview,
            Self::CommercialProcurement,
            Self::DeliveryAdoption,
            Self::CompetitiveTakeout,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Discovery => "Discovery / Qualification",
            Self::ArchitectureValidation => "Architecture & Technical Validation",
            Self::SecurityGovernanceReview => "Security / Governance Review",
            Self::CommercialProcurement => "Commercial / Procurement",
            Self::DeliveryAdoption => "Delivery / Adoption",
            Self::CompetitiveTakeout => "Competitive Takeout / Defense",
        }
    }

    /// Unrecognized labels yield `None` so callers can degrade to "no boost".
    pub fn from_label(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ordered()
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(needle))
    }
}

/// Event that prompted the current engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DealTrigger {
    #[serde(rename = "Customer request")]
    CustomerRequest,
    #[serde(rename = "RFP / Tender")]
    RfpTender,
    #[serde(rename = "Competitive pressure")]
    CompetitivePressure,
    #[serde(rename = "Vendor push")]
    VendorPush,
    #[serde(rename = "Renewal / Expansion")]
    RenewalExpansion,
    #[serde(rename = "Incident / Risk")]
    IncidentRisk,
    #[serde(rename = "Internal growth target")]
    InternalGrowthTarget,
}

impl DealTrigger {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::CustomerRequest,
            Self::RfpTender,
            Self::CompetitivePressure,
            Self::VendorPush,
            Self::RenewalExpansion,
            Self::IncidentRisk,
            Self::InternalGrowthTarget,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CustomerRequest => "Customer request",
            Self::RfpTender => "RFP / Tender",
            Self::CompetitivePressure => "Competitive pressure",
            Self::VendorPush => "Vendor push",
            Self::RenewalExpansion => "Renewal / Expansion",
            Self::IncidentRisk => "Incident / Risk",
            Self::InternalGrowthTarget => "Internal growth target",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ordered()
            .into_iter()
            .find(|trigger| trigger.label().eq_ignore_ascii_case(needle))
    }
}

/// Platform-commitment stance of the customer organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VendorPosture {
    #[serde(rename = "Microsoft-first")]
    MicrosoftFirst,
    #[serde(rename = "Vendor-neutral")]
    VendorNeutral,
    #[serde(rename = "Mixed")]
    Mixed,
}

impl VendorPosture {
    pub const fn ordered() -> [Self; 3] {
        [Self::MicrosoftFirst, Self::VendorNeutral, Self::Mixed]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MicrosoftFirst => "Microsoft-first",
            Self::VendorNeutral => "Vendor-neutral",
            Self::Mixed => "Mixed",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ordered()
            .into_iter()
            .find(|posture| posture.label().eq_ignore_ascii_case(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProofAsset {
    pub title: &'static str,
    pub url: &'static str,
}

/// Sellable, pre-packaged consulting or delivery offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServicePack {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tags: Vec<PackTag>,
    pub delivery_model: &'static str,
    pub duration_band: Option<&'static str>,
    pub pricing_band: Option<&'static str>,
    pub proof_assets: Vec<ProofAsset>,
    pub required_capabilities: Vec<&'static str>,
}

impl ServicePack {
    pub fn has_tag(&self, tag: PackTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Deal context supplied by the caller for a recommendation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealContext {
    pub mode: Option<EngagementMode>,
    pub trigger: Option<DealTrigger>,
    pub vendor_posture: Option<VendorPosture>,
    pub partner_capabilities: BTreeMap<String, CapabilityLevel>,
    pub signal_tags: Vec<String>,
}

impl DealContext {
    /// Names match ignoring ASCII case and surrounding whitespace; missing entries read as `None`.
    pub fn capability(&self, domain: &str) -> CapabilityLevel {
        let domain = domain.trim();
        self.partner_capabilities
            .get(domain)
            .or_else(|| {
                self.partner_capabilities
                    .iter()
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case(domain))
                    .map(|(_, level)| level)
            })
            .copied()
            .unwrap_or(CapabilityLevel::None)
    }

    pub fn has_signal_tag(&self, tag: PackTag) -> bool {
        self.signal_tags
            .iter()
            .any(|candidate| candidate.trim().eq_ignore_ascii_case(tag.key()))
    }
}
