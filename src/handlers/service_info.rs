use crate::types::{ServiceInfo, ServiceType};
use axum::Json;

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        id: "org.example.faidx-server".to_string(),
        name: "faidx-server".to_string(),
        r#type: ServiceType {
            group: "org.example".to_string(),
            artifact: "faidx".to_string(),
            version: "1.0.0".to_string(),
        },
        description: Some("Indexed FASTA subsequence retrieval".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
