use clap::Parser;

use fleet_core::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(name = "fleet-admin", version, about = "Admin console for vehicle records")]
pub struct Args {
    /// Base URL of the vehicle API (the `/vehicles` collection lives under it)
    #[arg(long, env = "FLEET_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}
