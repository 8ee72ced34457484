use serde::{Deserialize, Serialize};

/// Deforestation risk tier of a producing jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub const fn deduction(self) -> u8 {
        match self {
            Self::High => 25,
            Self::Medium => 15,
            Self::Low => 5,
        }
    }
}

// Global Forest Watch / FAO hotspot classification, with the EU benchmarking low-risk list.
const COUNTRY_RISK: &[(&str, RiskTier)] = &[
    ("Brazil", RiskTier::High),
    ("Indonesia", RiskTier::High),
    ("Democratic Republic of Congo", RiskTier::High),
    ("Bolivia", RiskTier::High),
    ("Peru", RiskTier::High),
    ("Colombia", RiskTier::High),
    ("Cameroon", RiskTier::High),
    ("Myanmar", RiskTier::High),
    ("Ivory Coast", RiskTier::High),
    ("Ghana", RiskTier::High),
    ("Nigeria", RiskTier::High),
    ("Madagascar", RiskTier::High),
    ("Malaysia", RiskTier::Medium),
    ("Vietnam", RiskTier::Medium),
    ("Thailand", RiskTier::Medium),
    ("Laos", RiskTier::Medium),
    ("Cambodia", RiskTier::Medium),
    ("Papua New Guinea", RiskTier::Medium),
    ("Ecuador", RiskTier::Medium),
    ("Venezuela", RiskTier::Medium),
    ("Paraguay", RiskTier::Medium),
    ("Argentina", RiskTier::Medium),
    ("India", RiskTier::Medium),
    ("Tanzania", RiskTier::Medium),
    ("Mozambique", RiskTier::Medium),
    ("Zambia", RiskTier::Medium),
    ("Ethiopia", RiskTier::Medium),
    ("Austria", RiskTier::Low),
    ("Belgium", RiskTier::Low),
    ("Bulgaria", RiskTier::Low),
    ("Croatia", RiskTier::Low),
    ("Cyprus", RiskTier::Low),
    ("Czech Republic", RiskTier::Low),
    ("Denmark", RiskTier::Low),
    ("Estonia", RiskTier::Low),
    ("Finland", RiskTier::Low),
    ("France", RiskTier::Low),
    ("Germany", RiskTier::Low),
    ("Greece", RiskTier::Low),
    ("Hungary", RiskTier::Low),
    ("Ireland", RiskTier::Low),
    ("Italy", RiskTier::Low),
    ("Latvia", RiskTier::Low),
    ("Lithuania", RiskTier::Low),
    ("Luxembourg", RiskTier::Low),
    ("Malta", RiskTier::Low),
    ("Netherlands", RiskTier::Low),
    ("Poland", RiskTier::Low),
    ("Portugal", RiskTier::Low),
    ("Romania", RiskTier::Low),
    ("Slovakia", RiskTier::Low),
    ("Slovenia", RiskTier::Low),
    ("Spain", RiskTier::Low),
    ("Sweden", RiskTier::Low),
    ("Norway", RiskTier::Low),
    ("Switzerland", RiskTier::Low),
    ("United Kingdom", RiskTier::Low),
    ("United States", RiskTier::Low),
    ("Canada", RiskTier::Low),
    ("China", RiskTier::Low),
    ("Japan", RiskTier::Low),
    ("Australia", RiskTier::Low),
    ("New Zealand", RiskTier::Low),
];

/// Unlisted jurisdictions, including the literal "Other", are treated as high risk.
pub fn country_risk(country: &str) -> RiskTier {
    let country = country.trim();
    COUNTRY_RISK
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(country))
        .map(|(_, tier)| *tier)
        .unwrap_or(RiskTier::High)
}

/// Commodity row with its fixed deduction and the rationale quoted in gap findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommodityRisk {
    pub commodity: &'static str,
    pub deduction: u8,
    pub rationale: &'static str,
}

const FALLBACK_COMMODITY: CommodityRisk = CommodityRisk {
    commodity: "Other",
    deduction: 10,
    rationale: "Risk varies by specific commodity; requires individual assessment.",
};

const COMMODITY_RISK: &[CommodityRisk] = &[
    CommodityRisk {
        commodity: "Cattle",
        deduction: 30,
        rationale: "Leading driver of deforestation globally; complex indirect supply chains make traceability challenging.",
    },
    CommodityRisk {
        commodity: "Leather",
        deduction: 28,
        rationale: "Linked to cattle farming, major deforestation driver.",
    },
    CommodityRisk {
        commodity: "Soya",
        deduction: 25,
        rationale: "High risk of conversion from forests and savannahs, particularly in South America.",
    },
    CommodityRisk {
        commodity: "Oil Palm",
        deduction: 25,
        rationale: "Historical link to large-scale deforestation in Southeast Asia and emerging risks in Africa.",
    },
    CommodityRisk {
        commodity: "Palm Oil",
        deduction: 25,
        rationale: "Same as Oil Palm - major deforestation driver.",
    },
    CommodityRisk {
        commodity: "Wood",
        deduction: 25,
        rationale: "Direct forest degradation and illegal logging risks; complex supply chains.",
    },
    CommodityRisk {
        commodity: "Cocoa",
        deduction: 20,
        rationale: "Risk of expansion into protected forest areas, particularly in West Africa.",
    },
    CommodityRisk {
        commodity: "Coffee",
        deduction: 15,
        rationale: "Risk of encroachment into highland and cloud forests; shade coffee less risky.",
    },
    CommodityRisk {
        commodity: "Rubber",
        deduction: 15,
        rationale: "Emerging risk driver in Southeast Asia and Africa with plantation expansion.",
    },
    FALLBACK_COMMODITY,
];

/// Unlisted commodities resolve to the `Other` row.
pub fn commodity_risk(product: &str) -> CommodityRisk {
    let product = product.trim();
    COMMODITY_RISK
        .iter()
        .find(|row| row.commodity.eq_ignore_ascii_case(product))
        .copied()
        .unwrap_or(FALLBACK_COMMODITY)
}
