//! Liveness and readiness probes.

use actix_web::{get, http::header, web, HttpResponse};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Probe flags shared between the server bootstrap and the probe handlers.
///
/// The process starts live but not ready; the bootstrap marks it ready once
/// the listener is bound and the schema is in place.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness probes while the server drains.
    pub fn mark_draining(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

#[derive(Debug, Serialize)]
struct ProbeBody {
    status: &'static str,
}

fn probe_response(ok: bool, status: &'static str) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeBody { status })
}

/// 200 once the catalog store is reachable and the listener bound, 503 before.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let ok = state.is_ready();
    probe_response(ok, if ok { "ready" } else { "starting" })
}

/// 200 while the process is live, 503 once draining.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    let ok = state.is_alive();
    probe_response(ok, if ok { "alive" } else { "draining" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use rstest::rstest;
    use serde_json::Value;

    async fn probe(state: web::Data<HealthState>, path: &str) -> (u16, Option<String>, Value) {
        let app = test::init_service(App::new().app_data(state).service(ready).service(live)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        let status = res.status().as_u16();
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body: Value = test::read_body_json(res).await;
        (status, cache, body)
    }

    #[rstest]
    #[case(false, 503, "starting")]
    #[case(true, 200, "ready")]
    #[actix_web::test]
    async fn readiness_follows_the_ready_flag(
        #[case] marked: bool,
        #[case] expected: u16,
        #[case] label: &str,
    ) {
        let state = web::Data::new(HealthState::new());
        if marked {
            state.mark_ready();
        }
        let (status, cache, body) = probe(state, "/health/ready").await;
        assert_eq!(status, expected);
        assert_eq!(cache.as_deref(), Some("no-store"));
        assert_eq!(body["status"], label);
    }

    #[actix_web::test]
    async fn liveness_fails_once_draining() {
        let state = web::Data::new(HealthState::new());
        let (status, _, _) = probe(state.clone(), "/health/live").await;
        assert_eq!(status, 200);

        state.mark_draining();
        let (status, _, body) = probe(state, "/health/live").await;
        assert_eq!(status, 503);
        assert_eq!(body["status"], "draining");
    }
}
