//! Driver-onboarding requests: accounts awaiting migration to driver
//! status. Approval activates the candidate's cab.

use serde::{Deserialize, Serialize};

use crate::client::ApiTransport;
use crate::error::FetchError;
use crate::resources::vehicle;

pub const LIST_ENDPOINT: &str = "utilisateur/become_driver-request";
pub const FILTER_PREFIX: &str = "utilisateur/become_driver-filter";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverRequest {
    pub id: i64,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub matricule: Option<String>,
    #[serde(default)]
    pub categorie_id: Option<i64>,
    #[serde(default)]
    pub chauffeur_id: Option<i64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl DriverRequest {
    pub fn full_name(&self) -> String {
        match (&self.nom, &self.prenom) {
            (Some(nom), Some(prenom)) => format!("{nom} {prenom}"),
            (Some(nom), None) => nom.clone(),
            (None, Some(prenom)) => prenom.clone(),
            (None, None) => String::from("-"),
        }
    }
}

/// Approve an onboarding request by activating the candidate's cab.
pub async fn approve(api: &dyn ApiTransport, vehicule_id: i64) -> Result<(), FetchError> {
    vehicle::toggle_activation(api, vehicule_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_decodes_location_fields() {
        let req: DriverRequest = serde_json::from_value(json!({
            "id": 31,
            "nom": "Fotso",
            "matricule": "LT-777-BB",
            "categorie_id": 2,
            "chauffeur_id": 19,
            "lat": 4.0511,
            "lng": 9.7679
        }))
        .unwrap();

        assert_eq!(req.full_name(), "Fotso");
        assert_eq!(req.lat, Some(4.0511));
    }
}
