//! Console commands and form-field editing.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use fleet_core::{UnknownStatus, Vehicle, VehicleStatus};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("not a vehicle id: {0}")]
    BadId(String),
    #[error(transparent)]
    Status(#[from] UnknownStatus),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {value}")]
    BadValue { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Vin,
    Make,
    Model,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show(i64),
    Set { field: String, value: String },
    Create,
    Edit(i64),
    Save,
    Cancel,
    Delete(i64),
    Status(i64, VehicleStatus),
    Find(Lookup, String),
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
list                         reload and print all vehicles
show <id>                    print one vehicle as stored on the server
set <field> <value>          edit the draft, or the selected vehicle while editing
create                       submit the draft
edit <id>                    start editing a vehicle from the list
save                         submit the edited vehicle
cancel                       leave edit mode without saving
delete <id>                  delete a vehicle (asks for confirmation)
status <id> <STATUS>         change a vehicle's status
find vin|make|model|status <value>
reset                        restore the draft defaults
help                         show this text
quit                         exit

fields: vin model make year color type engine transmission price status manufactured
use `-` as the value to clear engine, transmission, price or manufactured";

fn parse_id(raw: Option<&str>, usage: &'static str) -> Result<i64, CommandError> {
    let raw = raw.ok_or(CommandError::Usage(usage))?;
    raw.parse().map_err(|_| CommandError::BadId(raw.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "show" => Command::Show(parse_id(args.next(), "show <id>")?),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage("set <field> <value>"))?;
                Command::Set {
                    field: field.to_ascii_lowercase(),
                    value: value.trim().to_string(),
                }
            }
            "create" | "new" => Command::Create,
            "edit" => Command::Edit(parse_id(args.next(), "edit <id>")?),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "delete" | "rm" => Command::Delete(parse_id(args.next(), "delete <id>")?),
            "status" => {
                let id = parse_id(args.next(), "status <id> <STATUS>")?;
                let status: VehicleStatus = args
                    .next()
                    .ok_or(CommandError::Usage("status <id> <STATUS>"))?
                    .parse()?;
                Command::Status(id, status)
            }
            "find" => {
                const USAGE: &str = "find vin|make|model|status <value>";
                let (by, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::Usage(USAGE))?;
                let by = match by.to_ascii_lowercase().as_str() {
                    "vin" => Lookup::Vin,
                    "make" => Lookup::Make,
                    "model" => Lookup::Model,
                    "status" => Lookup::Status,
                    _ => return Err(CommandError::Usage(USAGE)),
                };
                Command::Find(by, value.trim().to_string())
            }
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn optional(value: &str) -> Option<String> {
    (value != "-").then(|| value.to_string())
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Writes one form field. Strings are taken as typed; only `year`, `price`,
/// `manufactured` and a blank `status` are rejected locally.
pub fn apply_field(vehicle: &mut Vehicle, field: &str, value: &str) -> Result<(), CommandError> {
    let bad = |field: &'static str| CommandError::BadValue {
        field,
        value: value.to_string(),
    };

    match field {
        "vin" => vehicle.vin = value.to_string(),
        "model" => vehicle.model = value.to_string(),
        "make" => vehicle.make = value.to_string(),
        "color" => vehicle.color = value.to_string(),
        "type" => vehicle.vehicle_type = value.to_string(),
        "year" => vehicle.year = value.parse().map_err(|_| bad("year"))?,
        "engine" => vehicle.engine_type = optional(value),
        "transmission" => vehicle.transmission = optional(value),
        "price" => {
            vehicle.price = match optional(value) {
                Some(v) => Some(v.parse().map_err(|_| bad("price"))?),
                None => None,
            }
        }
        "status" => {
            if value.is_empty() {
                return Err(bad("status"));
            }
            vehicle.status = value.to_ascii_uppercase();
        }
        "manufactured" => {
            vehicle.manufacturing_date = match optional(value) {
                Some(v) => Some(parse_datetime(&v).ok_or_else(|| bad("manufactured"))?),
                None => None,
            }
        }
        other => return Err(CommandError::UnknownField(other.to_string())),
    }
    Ok(())
}
