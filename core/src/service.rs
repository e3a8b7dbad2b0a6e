//! Typed async access to the vehicle resource.
//!
//! Each operation is one `build_*`, one transport round-trip and one
//! `parse_*`. Nothing is retried, cached or validated here; every call
//! resolves exactly once.

use std::sync::Arc;

use tracing::debug;

use crate::client::VehicleClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Vehicle, VehicleStatus};

#[derive(Clone)]
pub struct VehicleService {
    client: VehicleClient,
    transport: Arc<dyn Transport>,
}

impl VehicleService {
    pub fn new(client: VehicleClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    /// Service over reqwest against `base_url`.
    pub fn connect(base_url: &str) -> Self {
        Self::new(VehicleClient::new(base_url), Arc::new(ReqwestTransport::new()))
    }

    pub fn client(&self) -> &VehicleClient {
        &self.client
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    pub async fn list_all(&self) -> Result<Vec<Vehicle>, ApiError> {
        let response = self.send(self.client.build_list_vehicles()).await?;
        self.client.parse_list_vehicles(response)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Vehicle, ApiError> {
        let response = self.send(self.client.build_get_vehicle(id)).await?;
        self.client.parse_get_vehicle(response)
    }

    pub async fn get_by_vin(&self, vin: &str) -> Result<Vehicle, ApiError> {
        let response = self.send(self.client.build_get_vehicle_by_vin(vin)).await?;
        self.client.parse_get_vehicle(response)
    }

    pub async fn list_by_make(&self, make: &str) -> Result<Vec<Vehicle>, ApiError> {
        let response = self.send(self.client.build_list_by_make(make)).await?;
        self.client.parse_list_vehicles(response)
    }

    pub async fn list_by_model(&self, model: &str) -> Result<Vec<Vehicle>, ApiError> {
        let response = self.send(self.client.build_list_by_model(model)).await?;
        self.client.parse_list_vehicles(response)
    }

    pub async fn list_by_status(&self, status: VehicleStatus) -> Result<Vec<Vehicle>, ApiError> {
        let response = self.send(self.client.build_list_by_status(status)).await?;
        self.client.parse_list_vehicles(response)
    }

    pub async fn create(&self, draft: &Vehicle) -> Result<Vehicle, ApiError> {
        let request = self.client.build_create_vehicle(draft)?;
        let response = self.send(request).await?;
        self.client.parse_create_vehicle(response)
    }

    pub async fn update(&self, id: i64, record: &Vehicle) -> Result<Vehicle, ApiError> {
        let request = self.client.build_update_vehicle(id, record)?;
        let response = self.send(request).await?;
        self.client.parse_update_vehicle(response)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_vehicle(id)).await?;
        self.client.parse_delete_vehicle(response)
    }

    pub async fn update_status(&self, id: i64, status: VehicleStatus) -> Result<Vehicle, ApiError> {
        let response = self.send(self.client.build_update_status(id, status)).await?;
        self.client.parse_update_status(response)
    }
}
