//! Drivers: onboarded chauffeurs and their assigned vehicles.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiTransport;
use crate::error::FetchError;
use crate::resources::post_action;

/// Unfiltered listing endpoint.
pub const LIST_ENDPOINT: &str = "liste-chauffeurs";
/// Prefix for path-embedded free-text search.
pub const FILTER_PREFIX: &str = "utilisateur/filtre-driver";
/// Activation toggle endpoint.
pub const TOGGLE_ENDPOINT: &str = "utilisateur/toggle-river";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Driver {
    pub id: i64,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub vehicules: Vec<DriverVehicle>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverVehicle {
    #[serde(default)]
    pub matricule: Option<String>,
    #[serde(default)]
    pub statut: Option<String>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        match (&self.nom, &self.prenom) {
            (Some(nom), Some(prenom)) => format!("{nom} {prenom}"),
            (Some(nom), None) => nom.clone(),
            (None, Some(prenom)) => prenom.clone(),
            (None, None) => String::from("-"),
        }
    }

    /// Status of the primary assigned vehicle, if any.
    pub fn vehicle_status(&self) -> Option<&str> {
        self.vehicules.first().and_then(|v| v.statut.as_deref())
    }

    pub fn balance_xaf(&self) -> f64 {
        self.balance.unwrap_or(0.0)
    }
}

/// Flip a driver's activation state.
pub async fn toggle_activation(api: &dyn ApiTransport, car_id: i64) -> Result<(), FetchError> {
    post_action(api, TOGGLE_ENDPOINT, json!({ "car_id": car_id })).await
}
