use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    InProduction,
    QualityCheck,
    ReadyForDelivery,
    Shipped,
    Delivered,
    InService,
    MaintenanceRequired,
    Retired,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub vin: String,
    pub model: String,
    pub make: String,
    pub year: i32,
    pub color: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub engine_type: Option<String>,
    pub transmission: Option<String>,
    pub price: Option<f64>,
    pub status: VehicleStatus,
    pub manufacturing_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of create and update. Required fields are optional here so a missing
/// one is reported as a validation failure instead of a JSON rejection.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    pub vin: Option<String>,
    pub model: Option<String>,
    pub make: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub engine_type: Option<String>,
    pub transmission: Option<String>,
    pub price: Option<f64>,
    pub status: Option<VehicleStatus>,
    pub manufacturing_date: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct StatusParam {
    pub status: VehicleStatus,
}

/// Fields every create and update must carry, already checked for blanks.
struct Validated {
    vin: String,
    model: String,
    make: String,
    year: i32,
    color: String,
    vehicle_type: String,
}

impl VehicleInput {
    fn validate(&self) -> Result<Validated, Rejection> {
        fn required(value: &Option<String>, name: &str) -> Result<String, Rejection> {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err((StatusCode::BAD_REQUEST, format!("{name} is required"))),
            }
        }

        Ok(Validated {
            vin: required(&self.vin, "VIN")?,
            model: required(&self.model, "Model")?,
            make: required(&self.make, "Make")?,
            year: self
                .year
                .ok_or((StatusCode::BAD_REQUEST, "Year is required".to_string()))?,
            color: required(&self.color, "Color")?,
            vehicle_type: required(&self.vehicle_type, "Type")?,
        })
    }
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    vehicles: BTreeMap<i64, Vehicle>,
}

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, String);

fn not_found(id: i64) -> Rejection {
    (StatusCode::NOT_FOUND, format!("Vehicle not found with id: {id}"))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let vehicles = Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/vehicles/{id}/status", patch(update_status))
        .route("/vehicles/vin/{vin}", get(get_by_vin))
        .route("/vehicles/make/{make}", get(list_by_make))
        .route("/vehicles/model/{model}", get(list_by_model))
        .route("/vehicles/status/{status}", get(list_by_status))
        .with_state(db);
    Router::new()
        .nest("/api", vehicles)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn filtered(store: &Store, keep: impl Fn(&Vehicle) -> bool) -> Vec<Vehicle> {
    store.vehicles.values().filter(|v| keep(v)).cloned().collect()
}

async fn list_vehicles(State(db): State<Db>) -> Json<Vec<Vehicle>> {
    let store = db.read().await;
    Json(store.vehicles.values().cloned().collect())
}

async fn create_vehicle(
    State(db): State<Db>,
    Json(input): Json<VehicleInput>,
) -> Result<(StatusCode, Json<Vehicle>), Rejection> {
    let fields = input.validate()?;
    let mut store = db.write().await;
    if store.vehicles.values().any(|v| v.vin == fields.vin) {
        return Err((
            StatusCode::CONFLICT,
            format!("Vehicle with VIN {} already exists", fields.vin),
        ));
    }

    info!(vin = %fields.vin, "creating vehicle");
    store.next_id += 1;
    let now = Local::now().naive_local();
    let vehicle = Vehicle {
        id: store.next_id,
        vin: fields.vin,
        model: fields.model,
        make: fields.make,
        year: fields.year,
        color: fields.color,
        vehicle_type: fields.vehicle_type,
        engine_type: input.engine_type,
        transmission: input.transmission,
        price: input.price,
        status: input.status.unwrap_or(VehicleStatus::InProduction),
        manufacturing_date: input.manufacturing_date,
        created_at: now,
        updated_at: now,
    };
    store.vehicles.insert(vehicle.id, vehicle.clone());
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn get_vehicle(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Vehicle>, Rejection> {
    let store = db.read().await;
    store.vehicles.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn get_by_vin(State(db): State<Db>, Path(vin): Path<String>) -> Result<Json<Vehicle>, StatusCode> {
    let store = db.read().await;
    store
        .vehicles
        .values()
        .find(|v| v.vin == vin)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_by_make(State(db): State<Db>, Path(make): Path<String>) -> Json<Vec<Vehicle>> {
    Json(filtered(&*db.read().await, |v| v.make == make))
}

async fn list_by_model(State(db): State<Db>, Path(model): Path<String>) -> Json<Vec<Vehicle>> {
    Json(filtered(&*db.read().await, |v| v.model == model))
}

async fn list_by_status(
    State(db): State<Db>,
    Path(status): Path<VehicleStatus>,
) -> Json<Vec<Vehicle>> {
    Json(filtered(&*db.read().await, |v| v.status == status))
}

/// Replaces every mutable field. VIN and id never change.
async fn update_vehicle(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<Vehicle>, Rejection> {
    let fields = input.validate()?;
    let mut store = db.write().await;
    let vehicle = store.vehicles.get_mut(&id).ok_or_else(|| not_found(id))?;

    info!(id, "updating vehicle");
    vehicle.model = fields.model;
    vehicle.make = fields.make;
    vehicle.year = fields.year;
    vehicle.color = fields.color;
    vehicle.vehicle_type = fields.vehicle_type;
    vehicle.engine_type = input.engine_type;
    vehicle.transmission = input.transmission;
    vehicle.price = input.price;
    if let Some(status) = input.status {
        vehicle.status = status;
    }
    vehicle.manufacturing_date = input.manufacturing_date;
    vehicle.updated_at = Local::now().naive_local();
    Ok(Json(vehicle.clone()))
}

async fn update_status(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Query(param): Query<StatusParam>,
) -> Result<Json<Vehicle>, Rejection> {
    let mut store = db.write().await;
    let vehicle = store.vehicles.get_mut(&id).ok_or_else(|| not_found(id))?;

    info!(id, status = ?param.status, "updating vehicle status");
    vehicle.status = param.status;
    vehicle.updated_at = Local::now().naive_local();
    Ok(Json(vehicle.clone()))
}

async fn delete_vehicle(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    info!(id, "deleting vehicle");
    store
        .vehicles
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(id))
}
