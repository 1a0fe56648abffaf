use serde::{Deserialize, Serialize};

/// Query parameters for sequence retrieval
#[derive(Debug, Deserialize, Default)]
pub struct SequenceQuery {
    #[serde(rename = "referenceName")]
    pub reference_name: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// One contig as listed by the contigs endpoint
#[derive(Debug, Serialize)]
pub struct ContigSummary {
    pub name: String,
    pub length: u64,
}

/// Service info response (GA4GH service-info spec)
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub id: String,
    pub name: String,
    pub r#type: ServiceType,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceType {
    pub group: String,
    pub artifact: String,
    pub version: String,
}
