use super::domain::{PackTag, ProofAsset, ServicePack};
use std::collections::{BTreeSet, HashSet};

/// Seed data failed a shape check while the catalog was loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("service pack at position {position} has an empty id")]
    EmptyId { position: usize },
    #[error("service pack '{id}' is declared more than once")]
    DuplicateId { id: String },
    #[error("service pack '{id}' has an empty display name")]
    EmptyName { id: String },
    #[error("service pack '{id}' lists tag '{tag}' more than once")]
    DuplicateTag { id: String, tag: &'static str },
    #[error("service pack '{id}' lists a blank required capability")]
    BlankCapability { id: String },
    #[error("service pack '{id}' proof asset '{title}' has no URL")]
    ProofAssetWithoutUrl { id: String, title: String },
}

/// Read-only catalog of sellable service packs, kept in declaration order.
#[derive(Debug, Clone)]
pub struct ServicePackCatalog {
    packs: Vec<ServicePack>,
}

impl ServicePackCatalog {
    pub fn new(packs: Vec<ServicePack>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();

        for (position, pack) in packs.iter().enumerate() {
            if pack.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { position });
            }
            if !seen.insert(pack.id) {
                return Err(CatalogError::DuplicateId {
                    id: pack.id.to_string(),
                });
            }
            if pack.name.trim().is_empty() {
                return Err(CatalogError::EmptyName {
                    id: pack.id.to_string(),
                });
            }
            let mut tags = HashSet::new();
            if let Some(tag) = pack.tags.iter().copied().find(|tag| !tags.insert(*tag)) {
                return Err(CatalogError::DuplicateTag {
                    id: pack.id.to_string(),
                    tag: tag.key(),
                });
            }
            if pack
                .required_capabilities
                .iter()
                .any(|capability| capability.trim().is_empty())
            {
                return Err(CatalogError::BlankCapability {
                    id: pack.id.to_string(),
                });
            }
            if let Some(asset) = pack
                .proof_assets
                .iter()
                .find(|asset| asset.url.trim().is_empty())
            {
                return Err(CatalogError::ProofAssetWithoutUrl {
                    id: pack.id.to_string(),
                    title: asset.title.to_string(),
                });
            }
        }

        Ok(Self { packs })
    }

    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(standard_packs())
    }

    pub fn packs(&self) -> &[ServicePack] {
        &self.packs
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    pub fn pack(&self, id: &str) -> Option<&ServicePack> {
        self.packs.iter().find(|pack| pack.id == id)
    }

    pub fn packs_with_tag(&self, tag: PackTag) -> Vec<&ServicePack> {
        self.packs.iter().filter(|pack| pack.has_tag(tag)).collect()
    }

    pub fn packs_requiring(&self, capability: &str) -> Vec<&ServicePack> {
        self.packs
            .iter()
            .filter(|pack| {
                pack.required_capabilities
                    .iter()
                    .any(|required| required.eq_ignore_ascii_case(capability.trim()))
            })
            .collect()
    }

    /// Distinct capability domains referenced by any pack, sorted.
    pub fn capability_domains(&self) -> Vec<&'static str> {
        self.packs
            .iter()
            .flat_map(|pack| pack.required_capabilities.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn standard_packs() -> Vec<ServicePack> {
    vec![
        ServicePack {
            id: "ai-readiness-assessment",
            name: "AI Readiness Assessment",
            description: "Baseline the customer's data estate, skills, and use-case backlog and leave behind a prioritized AI roadmap.",
            tags: vec![PackTag::AiReadiness, PackTag::AdoptionChange],
            delivery_model: "Remote workshops with an on-site executive readout",
            duration_band: Some("2-3 weeks"),
            pricing_band: Some("Fixed fee, 15-25k"),
            proof_assets: vec![
                ProofAsset {
                    title: "Manufacturing readiness case study",
                    url: "https://partners.example.com/proof/ai-readiness-manufacturing",
                },
                ProofAsset {
                    title: "Readiness scorecard template",
                    url: "https://partners.example.com/proof/ai-readiness-scorecard",
                },
            ],
            required_capabilities: vec![],
        },
        ServicePack {
            id: "ai-governance-quickstart",
            name: "AI Governance Quickstart",
            description: "Stand up an AI policy, risk register, and access guardrails so pilots can pass security and compliance review.",
            tags: vec![PackTag::AiGovernance, PackTag::SecurityIdentity],
            delivery_model: "Hybrid advisory sprint",
            duration_band: Some("3-4 weeks"),
            pricing_band: Some("Fixed fee, 20-35k"),
            proof_assets: vec![
                ProofAsset {
                    title: "Responsible AI policy starter kit",
                    url: "https://partners.example.com/proof/ai-governance-policy-kit",
                },
                ProofAsset {
                    title: "Financial services governance reference",
                    url: "https://partners.example.com/proof/ai-governance-finserv",
                },
            ],
            required_capabilities: vec!["Governance & Risk", "Security & Identity"],
        },
        ServicePack {
            id: "rag-agent-pilot",
            name: "RAG & Agent Pilot",
            description: "Build a production-shaped retrieval-augmented assistant over one curated knowledge domain with evaluation harness.",
            tags: vec![PackTag::RagAgents, PackTag::DataPlatform],
            delivery_model: "Co-delivery pod with customer engineers",
            duration_band: Some("6-8 weeks"),
            pricing_band: Some("Time & materials, 60-90k"),
            proof_assets: vec![ProofAsset {
                title: "Field service knowledge agent demo",
                url: "https://partners.example.com/proof/rag-field-service",
            }],
            required_capabilities: vec!["Data Engineering", "AI Engineering"],
        },
        ServicePack {
            id: "data-platform-foundation",
            name: "Data Platform Foundation",
            description: "Land a governed lakehouse with ingestion patterns, catalog, and the first two curated data products.",
            tags: vec![PackTag::DataPlatform, PackTag::CloudOps],
            delivery_model: "Fixed-scope delivery team",
            duration_band: Some("8-12 weeks"),
            pricing_band: Some("Fixed fee, 80-120k"),
            proof_assets: vec![
                ProofAsset {
                    title: "Retail lakehouse migration",
                    url: "https://partners.example.com/proof/data-platform-retail",
                },
                ProofAsset {
                    title: "Reference architecture",
                    url: "https://partners.example.com/proof/data-platform-architecture",
                },
            ],
            required_capabilities: vec!["Data Engineering"],
        },
        ServicePack {
            id: "copilot-adoption-accelerator",
            name: "Copilot Adoption Accelerator",
            description: "Drive Microsoft 365 Copilot usage with champion networks, scenario libraries, and adoption telemetry.",
            tags: vec![PackTag::M365Copilot, PackTag::AdoptionChange],
            delivery_model: "Remote program with monthly steering",
            duration_band: Some("6 weeks"),
            pricing_band: Some("Fixed fee, 25-40k"),
            proof_assets: vec![ProofAsset {
                title: "Professional services adoption story",
                url: "https://partners.example.com/proof/copilot-adoption-proserv",
            }],
            required_capabilities: vec!["Modern Work"],
        },
        ServicePack {
            id: "zero-trust-identity-hardening",
            name: "Zero Trust Identity Hardening",
            description: "Close identity gaps with conditional access, privileged identity management, and phishing-resistant MFA.",
            tags: vec![PackTag::SecurityIdentity],
            delivery_model: "Remote engineering sprint",
            duration_band: Some("4 weeks"),
            pricing_band: Some("Fixed fee, 30-45k"),
            proof_assets: vec![
                ProofAsset {
                    title: "Healthcare identity uplift",
                    url: "https://partners.example.com/proof/zero-trust-healthcare",
                },
                ProofAsset {
                    title: "Conditional access baseline",
                    url: "https://partners.example.com/proof/zero-trust-baseline",
                },
            ],
            required_capabilities: vec!["Security & Identity"],
        },
        ServicePack {
            id: "finops-health-check",
            name: "FinOps Health Check",
            description: "Surface cloud waste, commitment coverage, and tagging gaps with a prioritized savings plan.",
            tags: vec![PackTag::Finops, PackTag::CloudOps],
            delivery_model: "Remote assessment",
            duration_band: Some("2 weeks"),
            pricing_band: None,
            proof_assets: vec![ProofAsset {
                title: "Savings plan sample report",
                url: "https://partners.example.com/proof/finops-sample-report",
            }],
            required_capabilities: vec![],
        },
        ServicePack {
            id: "app-modernization-sprint",
            name: "App Modernization Sprint",
            description: "Re-platform one line-of-business application onto managed containers with CI/CD and observability.",
            tags: vec![PackTag::AppModernization, PackTag::CloudOps],
            delivery_model: "Co-delivery pod",
            duration_band: Some("6-10 weeks"),
            pricing_band: Some("Time & materials, 50-80k"),
            proof_assets: vec![],
            required_capabilities: vec!["Application Development"],
        },
        ServicePack {
            id: "managed-landing-zone",
            name: "Managed Landing Zone",
            description: "Deploy a policy-driven landing zone with monitoring, backup, and an operations runbook handover.",
            tags: vec![PackTag::CloudOps],
            delivery_model: "Fixed-scope deployment plus managed service option",
            duration_band: Some("4-6 weeks"),
            pricing_band: Some("Fixed fee, 35-50k"),
            proof_assets: vec![ProofAsset {
                title: "Landing zone blueprint",
                url: "https://partners.example.com/proof/landing-zone-blueprint",
            }],
            required_capabilities: vec!["Cloud Operations"],
        },
        ServicePack {
            id: "change-enablement-clinic",
            name: "Change Enablement Clinic",
            description: "Short clinic that equips sponsors with a communication plan and training cadence for a new rollout.",
            tags: vec![PackTag::AdoptionChange],
            delivery_model: "Facilitated workshop",
            duration_band: None,
            pricing_band: None,
            proof_assets: vec![],
            required_capabilities: vec![],
        },
    ]
}
