//! `grpc.health.v1.Health` reporting.

use tonic_health::ServingStatus;
use tonic_health::pb::health_server::{Health, HealthServer};
use tonic_health::server::HealthReporter;
use tracing::info;

/// Wraps a [`HealthReporter`] so services flip between serving and
/// not-serving together with the empty service name (used by generic probes).
#[derive(Clone)]
pub struct GrpcHealth {
    reporter: HealthReporter,
}

impl GrpcHealth {
    pub fn service() -> (Self, HealthServer<impl Health>) {
        let (reporter, service) = tonic_health::server::health_reporter();
        (Self { reporter }, service)
    }

    pub async fn set_serving(&self, service_names: &[&str]) {
        self.set_all(service_names, ServingStatus::Serving).await;
        info!(services = ?service_names, "Services marked as serving");
    }

    pub async fn set_not_serving(&self, service_names: &[&str]) {
        self.set_all(service_names, ServingStatus::NotServing).await;
        info!(services = ?service_names, "Services marked as not serving");
    }

    async fn set_all(&self, service_names: &[&str], status: ServingStatus) {
        for service_name in service_names {
            self.reporter.set_service_status(*service_name, status).await;
        }
        self.reporter.set_service_status("", status).await;
    }
}
