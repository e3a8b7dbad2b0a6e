//! View state for the vehicle admin screen.
//!
//! # Design
//! The controller owns four pieces of state: the cached list, an optional
//! working copy of the record being edited, the edit-mode flag and the
//! creation draft. The list is never patched locally; every successful
//! mutation is followed by a full reload. Failures are logged and leave all
//! state as it was.
//!
//! Handlers take `&mut self`, so one controller runs one action at a time.

use tracing::{debug, error, info};

use crate::service::VehicleService;
use crate::types::{Vehicle, VehicleStatus};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this vehicle?";

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

pub struct VehiclesController {
    service: VehicleService,
    confirm: Box<dyn Confirm>,
    vehicles: Vec<Vehicle>,
    selected_vehicle: Option<Vehicle>,
    is_editing: bool,
    new_vehicle: Vehicle,
}

impl VehiclesController {
    pub fn new(service: VehicleService, confirm: impl Confirm + 'static) -> Self {
        Self {
            service,
            confirm: Box::new(confirm),
            vehicles: Vec::new(),
            selected_vehicle: None,
            is_editing: false,
            new_vehicle: Vehicle::draft(),
        }
    }

    pub fn service(&self) -> &VehicleService {
        &self.service
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected_vehicle.as_ref()
    }

    /// Edits go to the working copy, never to the cached list.
    pub fn selected_vehicle_mut(&mut self) -> Option<&mut Vehicle> {
        self.selected_vehicle.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn new_vehicle(&self) -> &Vehicle {
        &self.new_vehicle
    }

    pub fn new_vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.new_vehicle
    }

    /// First activation of the screen.
    pub async fn init(&mut self) {
        self.load_vehicles().await;
    }

    pub async fn load_vehicles(&mut self) {
        match self.service.list_all().await {
            Ok(vehicles) => {
                debug!(count = vehicles.len(), "vehicles loaded");
                self.vehicles = vehicles;
            }
            Err(err) => error!(%err, "error loading vehicles"),
        }
    }

    /// Submits the draft. The draft is only reset once the server accepted it.
    pub async fn create_vehicle(&mut self) {
        match self.service.create(&self.new_vehicle).await {
            Ok(created) => {
                info!(id = ?created.id, vin = %created.vin, "vehicle created");
                self.load_vehicles().await;
                self.reset_form();
            }
            Err(err) => error!(%err, "error creating vehicle"),
        }
    }

    pub fn edit_vehicle(&mut self, vehicle: &Vehicle) {
        self.selected_vehicle = Some(vehicle.clone());
        self.is_editing = true;
    }

    /// No-op unless a persisted record is selected.
    pub async fn update_vehicle(&mut self) {
        let Some(selected) = self.selected_vehicle.as_ref() else {
            debug!("update requested with nothing selected");
            return;
        };
        let Some(id) = selected.id else {
            debug!("update requested for a record without id");
            return;
        };

        match self.service.update(id, selected).await {
            Ok(updated) => {
                info!(id, vin = %updated.vin, "vehicle updated");
                self.load_vehicles().await;
                self.cancel_edit();
            }
            Err(err) => error!(id, %err, "error updating vehicle"),
        }
    }

    pub async fn delete_vehicle(&mut self, id: i64) {
        if !self.confirm.confirm(DELETE_PROMPT) {
            debug!(id, "delete declined");
            return;
        }

        match self.service.delete(id).await {
            Ok(()) => {
                info!(id, "vehicle deleted");
                self.load_vehicles().await;
            }
            Err(err) => error!(id, %err, "error deleting vehicle"),
        }
    }

    pub async fn change_status(&mut self, id: i64, status: VehicleStatus) {
        match self.service.update_status(id, status).await {
            Ok(_) => {
                info!(id, %status, "vehicle status changed");
                self.load_vehicles().await;
            }
            Err(err) => error!(id, %status, %err, "error changing vehicle status"),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.selected_vehicle = None;
        self.is_editing = false;
    }

    pub fn reset_form(&mut self) {
        self.new_vehicle = Vehicle::draft();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::client::VehicleClient;
    use crate::error::ApiError;
    use crate::http::{HttpRequest, HttpResponse};
    use crate::transport::Transport;

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        }
    }

    fn offline() -> VehiclesController {
        let service = VehicleService::new(VehicleClient::default(), Arc::new(Unreachable));
        VehiclesController::new(service, |_: &str| true)
    }

    fn persisted(id: i64) -> Vehicle {
        Vehicle {
            id: Some(id),
            vin: format!("VIN{id}"),
            ..Vehicle::draft()
        }
    }

    #[test]
    fn starts_idle_with_a_fresh_draft() {
        let controller = offline();
        assert!(controller.vehicles().is_empty());
        assert!(controller.selected_vehicle().is_none());
        assert!(!controller.is_editing());
        assert_eq!(controller.new_vehicle(), &Vehicle::draft());
    }

    #[test]
    fn edit_takes_a_copy() {
        let mut controller = offline();
        let original = persisted(1);
        controller.edit_vehicle(&original);
        controller.selected_vehicle_mut().unwrap().color = "green".to_string();

        assert!(controller.is_editing());
        assert_eq!(controller.selected_vehicle().unwrap().color, "green");
        assert_eq!(original.color, "");
    }

    #[test]
    fn cancel_edit_returns_to_idle() {
        let mut controller = offline();
        controller.edit_vehicle(&persisted(2));
        controller.cancel_edit();
        assert!(controller.selected_vehicle().is_none());
        assert!(!controller.is_editing());
    }

    #[test]
    fn reset_form_restores_defaults() {
        let mut controller = offline();
        controller.new_vehicle_mut().vin = "V1".to_string();
        controller.new_vehicle_mut().status = "SHIPPED".to_string();
        controller.reset_form();
        assert_eq!(controller.new_vehicle(), &Vehicle::draft());
    }

    #[tokio::test]
    async fn failed_update_keeps_edit_state() {
        let mut controller = offline();
        controller.edit_vehicle(&persisted(5));
        controller.update_vehicle().await;
        assert!(controller.is_editing());
        assert_eq!(controller.selected_vehicle().unwrap().id, Some(5));
    }

    #[tokio::test]
    async fn failed_create_keeps_draft() {
        let mut controller = offline();
        controller.new_vehicle_mut().vin = "V1".to_string();
        controller.create_vehicle().await;
        assert_eq!(controller.new_vehicle().vin, "V1");
        assert!(controller.vehicles().is_empty());
    }
}
