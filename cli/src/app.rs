use std::io::{self, BufRead, Write};

use color_eyre::Result;
use fleet_core::{ApiError, Vehicle, VehicleService, VehiclesController};
use tracing::{error, warn};

use crate::command::{apply_field, Command, Lookup, HELP};
use crate::prompt::StdinConfirm;
use crate::view;

pub struct App {
    controller: VehiclesController,
}

impl App {
    pub fn new(service: VehicleService) -> Self {
        Self {
            controller: VehiclesController::new(service, StdinConfirm),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.controller.init().await;
        println!("{}", view::screen(&self.controller));

        let stdin = io::stdin();
        loop {
            print!("fleet> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command).await,
                Err(err) => println!("{err}"),
            }
        }
        Ok(())
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::List => self.controller.load_vehicles().await,
            Command::Show(id) => {
                match self.controller.service().get_by_id(id).await {
                    Ok(vehicle) => print!("{}", view::detail(&vehicle)),
                    Err(ApiError::NotFound) => println!("no vehicle with id {id}"),
                    Err(err) => error!(id, %err, "error fetching vehicle"),
                }
                return;
            }
            Command::Set { field, value } => {
                let target = if self.controller.is_editing() {
                    self.controller.selected_vehicle_mut()
                } else {
                    Some(self.controller.new_vehicle_mut())
                };
                if let Some(vehicle) = target {
                    if let Err(err) = apply_field(vehicle, &field, &value) {
                        println!("{err}");
                        return;
                    }
                }
            }
            Command::Create => self.controller.create_vehicle().await,
            Command::Edit(id) => {
                let Some(vehicle) = self.find_listed(id) else {
                    println!("vehicle {id} is not in the list");
                    return;
                };
                self.controller.edit_vehicle(&vehicle);
            }
            Command::Save => {
                if !self.controller.is_editing() {
                    warn!("save requested outside edit mode");
                }
                self.controller.update_vehicle().await;
            }
            Command::Cancel => self.controller.cancel_edit(),
            Command::Delete(id) => self.controller.delete_vehicle(id).await,
            Command::Status(id, status) => self.controller.change_status(id, status).await,
            Command::Find(by, value) => {
                self.find(by, &value).await;
                return;
            }
            Command::Reset => self.controller.reset_form(),
            Command::Help => {
                println!("{HELP}");
                return;
            }
            Command::Quit => return,
        }
        println!("{}", view::screen(&self.controller));
    }

    fn find_listed(&self, id: i64) -> Option<Vehicle> {
        self.controller
            .vehicles()
            .iter()
            .find(|v| v.id == Some(id))
            .cloned()
    }

    /// Lookups print their result and never touch the cached list.
    async fn find(&self, by: Lookup, value: &str) {
        let service = self.controller.service();
        let result = match by {
            Lookup::Vin => service.get_by_vin(value).await.map(|v| vec![v]),
            Lookup::Make => service.list_by_make(value).await,
            Lookup::Model => service.list_by_model(value).await,
            Lookup::Status => match value.parse() {
                Ok(status) => service.list_by_status(status).await,
                Err(err) => {
                    println!("{err}");
                    return;
                }
            },
        };
        match result {
            Ok(vehicles) => print!("{}", view::table(&vehicles)),
            Err(ApiError::NotFound) => println!("(no vehicles)"),
            Err(err) => error!(?by, value, %err, "lookup failed"),
        }
    }
}
