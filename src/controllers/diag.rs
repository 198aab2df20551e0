use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use crate::{
    domain::diagnostics::{DiagnosticsService, DiagnosticsServiceApi, IpReport},
    infrastructure::http::cache_policy::{cache_headers, RouteClass},
};

pub struct DiagController {
    diagnostics_service: Arc<DiagnosticsService>,
}

impl DiagController {
    pub fn new(diagnostics_service: Arc<DiagnosticsService>) -> Self {
        Self { diagnostics_service }
    }

    /// GET /news-api/_diag/ip - Egress IP as seen by public lookup services
    pub async fn egress_ip(
        State(controller): State<Arc<DiagController>>,
    ) -> (HeaderMap, Json<IpReport>) {
        let report = controller.diagnostics_service.egress_ip().await;
        (cache_headers(RouteClass::Uncacheable, false), Json(report))
    }
}
