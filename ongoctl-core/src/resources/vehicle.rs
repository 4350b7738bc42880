//! Vehicles: the cab fleet with category and assigned driver.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiTransport;
use crate::error::FetchError;
use crate::resources::post_action;

pub const LIST_ENDPOINT: &str = "vehicule/liste-vehicule-dash";
/// Activation toggle shared with driver-request approval.
pub const ACTIVATE_ENDPOINT: &str = "v2/vehicule/activate-or-desactivate-cab";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Vehicle {
    pub id: i64,
    #[serde(default)]
    pub matricule: Option<String>,
    #[serde(default)]
    pub modele: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub statut: Option<String>,
    // Backend serializes online state as 0/1
    #[serde(default)]
    pub is_online: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub categorie: Option<VehicleCategory>,
    #[serde(default)]
    pub chauffeur: Option<VehicleDriver>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleCategory {
    #[serde(default)]
    pub libelle: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleDriver {
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
}

impl Vehicle {
    pub fn online(&self) -> bool {
        self.is_online.unwrap_or(0) != 0
    }

    pub fn category_label(&self) -> &str {
        self.categorie
            .as_ref()
            .and_then(|c| c.libelle.as_deref())
            .unwrap_or("-")
    }

    pub fn driver_name(&self) -> String {
        match &self.chauffeur {
            Some(d) => match (&d.nom, &d.prenom) {
                (Some(nom), Some(prenom)) => format!("{nom} {prenom}"),
                (Some(nom), None) => nom.clone(),
                (None, Some(prenom)) => prenom.clone(),
                (None, None) => String::from("-"),
            },
            None => String::from("-"),
        }
    }
}

/// Activate or deactivate a cab.
pub async fn toggle_activation(api: &dyn ApiTransport, vehicule_id: i64) -> Result<(), FetchError> {
    post_action(api, ACTIVATE_ENDPOINT, json!({ "vehicule_id": vehicule_id })).await
}
