//! Plain-text rendering of controller state.

use std::fmt::Write;

use fleet_core::{Vehicle, VehiclesController};

const HEADER: [&str; 8] = ["ID", "VIN", "MAKE", "MODEL", "YEAR", "COLOR", "TYPE", "STATUS"];

fn row(vehicle: &Vehicle) -> [String; 8] {
    [
        vehicle.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
        vehicle.vin.clone(),
        vehicle.make.clone(),
        vehicle.model.clone(),
        vehicle.year.to_string(),
        vehicle.color.clone(),
        vehicle.vehicle_type.clone(),
        vehicle.status.clone(),
    ]
}

/// Column-aligned table, one line per vehicle, in list order.
pub fn table(vehicles: &[Vehicle]) -> String {
    if vehicles.is_empty() {
        return "(no vehicles)\n".to_string();
    }

    let rows: Vec<[String; 8]> = vehicles.iter().map(row).collect();
    let mut widths = HEADER.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut line = |cells: &[&str]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", padded.join("  ").trim_end());
    };
    line(&HEADER);
    for cells in &rows {
        line(&cells.each_ref().map(String::as_str));
    }
    out
}

/// Every field of one record, optionals included.
pub fn detail(vehicle: &Vehicle) -> String {
    fn or_dash<T: ToString>(value: &Option<T>) -> String {
        value.as_ref().map_or_else(|| "-".to_string(), ToString::to_string)
    }

    let fields = [
        ("id", or_dash(&vehicle.id)),
        ("vin", vehicle.vin.clone()),
        ("make", vehicle.make.clone()),
        ("model", vehicle.model.clone()),
        ("year", vehicle.year.to_string()),
        ("color", vehicle.color.clone()),
        ("type", vehicle.vehicle_type.clone()),
        ("engine", or_dash(&vehicle.engine_type)),
        ("transmission", or_dash(&vehicle.transmission)),
        ("price", or_dash(&vehicle.price)),
        ("status", vehicle.status.clone()),
        ("manufactured", or_dash(&vehicle.manufacturing_date)),
        ("created", or_dash(&vehicle.created_at)),
        ("updated", or_dash(&vehicle.updated_at)),
    ];
    fields
        .iter()
        .map(|(name, value)| format!("  {name:<13}{value}\n"))
        .collect()
}

/// The full screen: list, then the form currently in use.
pub fn screen(controller: &VehiclesController) -> String {
    let mut out = table(controller.vehicles());
    match controller.selected_vehicle() {
        Some(selected) if controller.is_editing() => {
            out.push_str("\nediting:\n");
            out.push_str(&detail(selected));
        }
        _ => {
            out.push_str("\nnew vehicle:\n");
            out.push_str(&detail(controller.new_vehicle()));
        }
    }
    out
}
