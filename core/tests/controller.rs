//! Admin-screen workflows driven through a scripted transport.

mod support;

use std::sync::{Arc, Mutex};

use fleet_core::{
    HttpMethod, Vehicle, VehicleClient, VehicleService, VehicleStatus, VehiclesController,
    DELETE_PROMPT,
};
use pretty_assertions::assert_eq;
use support::ScriptedTransport;

const BASE_URL: &str = "http://api.test";

const TWO: &str = r#"[
    {"id":2,"vin":"B2","model":"Y","make":"Acme","year":2023,"color":"blue","type":"suv","status":"SHIPPED"},
    {"id":1,"vin":"A1","model":"X","make":"Acme","year":2024,"color":"red","type":"sedan","status":"IN_PRODUCTION"}
]"#;

fn controller(transport: &Arc<ScriptedTransport>, answer: bool) -> VehiclesController {
    let service = VehicleService::new(VehicleClient::new(BASE_URL), transport.clone());
    VehiclesController::new(service, move |_: &str| answer)
}

fn two_vehicles() -> Vec<Vehicle> {
    serde_json::from_str(TWO).unwrap()
}

fn calls(transport: &ScriptedTransport) -> Vec<(HttpMethod, String)> {
    transport
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect()
}

#[tokio::test]
async fn init_loads_list_exactly_as_returned() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(200, TWO);
    let mut controller = controller(&transport, true);

    controller.init().await;

    assert_eq!(controller.vehicles(), two_vehicles().as_slice());
    assert_eq!(calls(&transport), vec![(HttpMethod::Get, format!("{BASE_URL}/vehicles"))]);
}

#[tokio::test]
async fn failed_reload_keeps_previous_list() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(200, TWO).respond(500, "boom");
    let mut controller = controller(&transport, true);

    controller.load_vehicles().await;
    controller.load_vehicles().await;

    assert_eq!(controller.vehicles(), two_vehicles().as_slice());
}

#[tokio::test]
async fn create_reloads_and_resets_draft() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond(
            201,
            r#"{"id":3,"vin":"V1","model":"X","make":"Acme","year":2024,"color":"red","type":"sedan","status":"IN_PRODUCTION"}"#,
        )
        .respond(200, TWO);
    let mut controller = controller(&transport, true);

    let draft = controller.new_vehicle_mut();
    draft.vin = "V1".to_string();
    draft.make = "Acme".to_string();
    draft.model = "X".to_string();
    draft.year = 2024;
    draft.color = "red".to_string();
    draft.vehicle_type = "sedan".to_string();
    draft.status = "IN_PRODUCTION".to_string();

    controller.create_vehicle().await;

    assert_eq!(
        calls(&transport),
        vec![
            (HttpMethod::Post, format!("{BASE_URL}/vehicles")),
            (HttpMethod::Get, format!("{BASE_URL}/vehicles")),
        ]
    );
    let sent: serde_json::Value =
        serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(sent["vin"], "V1");
    assert_eq!(sent["type"], "sedan");
    assert!(sent.get("id").is_none());

    assert_eq!(controller.new_vehicle(), &Vehicle::draft());
    assert_eq!(controller.vehicles().len(), 2);
}

#[tokio::test]
async fn rejected_create_keeps_draft_and_list() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(200, TWO).respond(400, "VIN is required");
    let mut controller = controller(&transport, true);
    controller.init().await;

    controller.new_vehicle_mut().make = "Acme".to_string();
    controller.create_vehicle().await;

    assert_eq!(controller.new_vehicle().make, "Acme");
    assert_eq!(controller.vehicles(), two_vehicles().as_slice());
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn update_reloads_and_leaves_edit_mode() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond(
            200,
            r#"{"id":5,"vin":"V5","model":"X","make":"Acme","year":2024,"color":"black","type":"sedan","status":"IN_PRODUCTION"}"#,
        )
        .respond(200, TWO);
    let mut controller = controller(&transport, true);

    let record = Vehicle {
        id: Some(5),
        vin: "V5".to_string(),
        ..Vehicle::draft()
    };
    controller.edit_vehicle(&record);
    controller.selected_vehicle_mut().unwrap().color = "black".to_string();
    controller.update_vehicle().await;

    assert_eq!(
        calls(&transport),
        vec![
            (HttpMethod::Put, format!("{BASE_URL}/vehicles/5")),
            (HttpMethod::Get, format!("{BASE_URL}/vehicles")),
        ]
    );
    let sent: serde_json::Value =
        serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(sent["color"], "black");
    assert!(controller.selected_vehicle().is_none());
    assert!(!controller.is_editing());
}

#[tokio::test]
async fn update_without_selection_is_a_no_op() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut controller = controller(&transport, true);

    controller.update_vehicle().await;

    assert!(transport.requests().is_empty());
    assert!(!controller.is_editing());
}

#[tokio::test]
async fn update_of_unpersisted_record_is_a_no_op() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut controller = controller(&transport, true);

    controller.edit_vehicle(&Vehicle::draft());
    controller.update_vehicle().await;

    assert!(transport.requests().is_empty());
    assert!(controller.is_editing());
}

#[tokio::test]
async fn failed_update_preserves_edit_for_retry() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.fail();
    let mut controller = controller(&transport, true);

    let record = Vehicle {
        id: Some(5),
        ..Vehicle::draft()
    };
    controller.edit_vehicle(&record);
    controller.update_vehicle().await;

    assert!(controller.is_editing());
    assert_eq!(controller.selected_vehicle(), Some(&record));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(200, TWO);
    let mut controller = controller(&transport, false);
    controller.init().await;

    controller.delete_vehicle(7).await;

    assert_eq!(transport.requests().len(), 1);
    assert_eq!(controller.vehicles(), two_vehicles().as_slice());
}

#[tokio::test]
async fn accepted_delete_issues_one_delete_then_reloads() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(204, "").respond(200, "[]");
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let seen = prompts.clone();
    let service = VehicleService::new(VehicleClient::new(BASE_URL), transport.clone());
    let mut controller = VehiclesController::new(service, move |message: &str| {
        seen.lock().unwrap().push(message.to_string());
        true
    });

    controller.delete_vehicle(7).await;

    assert_eq!(
        calls(&transport),
        vec![
            (HttpMethod::Delete, format!("{BASE_URL}/vehicles/7")),
            (HttpMethod::Get, format!("{BASE_URL}/vehicles")),
        ]
    );
    assert_eq!(*prompts.lock().unwrap(), vec![DELETE_PROMPT.to_string()]);
    assert!(controller.vehicles().is_empty());
}

#[tokio::test]
async fn failed_delete_skips_reload() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(200, TWO).respond(404, "");
    let mut controller = controller(&transport, true);
    controller.init().await;

    controller.delete_vehicle(42).await;

    assert_eq!(transport.requests().len(), 2);
    assert_eq!(controller.vehicles(), two_vehicles().as_slice());
}

#[tokio::test]
async fn change_status_patches_then_reloads() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond(
            200,
            r#"{"id":1,"vin":"A1","model":"X","make":"Acme","year":2024,"color":"red","type":"sedan","status":"DELIVERED"}"#,
        )
        .respond(200, TWO);
    let mut controller = controller(&transport, true);

    controller.change_status(1, VehicleStatus::Delivered).await;

    assert_eq!(
        calls(&transport),
        vec![
            (HttpMethod::Patch, format!("{BASE_URL}/vehicles/1/status?status=DELIVERED")),
            (HttpMethod::Get, format!("{BASE_URL}/vehicles")),
        ]
    );
    assert!(transport.requests()[0].body.is_none());
}

#[tokio::test]
async fn cancel_edit_clears_state_unconditionally() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut controller = controller(&transport, true);

    controller.cancel_edit();
    assert!(!controller.is_editing());

    controller.edit_vehicle(&two_vehicles()[0]);
    controller.cancel_edit();
    assert!(controller.selected_vehicle().is_none());
    assert!(!controller.is_editing());
    assert!(transport.requests().is_empty());
}
