//! Users: rider accounts, with the profile update endpoint.

use serde::{Deserialize, Serialize};

use crate::client::ApiTransport;
use crate::error::FetchError;
use crate::resources::put_action;

pub const LIST_ENDPOINT: &str = "utilisateur/liste-utilisateurs";

/// Profile update endpoint for one user.
pub fn update_endpoint(id: i64) -> String {
    format!("backend/utilisateur/{id}")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub role_id: Option<i64>,
    // 0/1 on the wire
    #[serde(default)]
    pub is_agence: Option<i64>,
}

impl User {
    pub fn full_name(&self) -> String {
        match (&self.nom, &self.prenom) {
            (Some(nom), Some(prenom)) => format!("{nom} {prenom}"),
            (Some(nom), None) => nom.clone(),
            (None, Some(prenom)) => prenom.clone(),
            (None, None) => String::from("-"),
        }
    }

    pub fn is_agency(&self) -> bool {
        self.is_agence.unwrap_or(0) != 0
    }
}

/// Partial profile update; unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom_utilisateur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

pub async fn update(api: &dyn ApiTransport, id: i64, update: &UserUpdate) -> Result<(), FetchError> {
    let body = serde_json::to_value(update)
        .map_err(|err| crate::error::ApiError::decode(update_endpoint(id), err))
        .map_err(FetchError::Connection)?;
    put_action(api, &update_endpoint(id), body).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_endpoint_embeds_id() {
        assert_eq!(update_endpoint(42), "backend/utilisateur/42");
    }

    #[test]
    fn test_user_update_skips_unset_fields() {
        let update = UserUpdate {
            nom_utilisateur: Some("mngono".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"nom_utilisateur": "mngono"})
        );
    }

    #[test]
    fn test_user_decodes_agency_flag() {
        let user: User =
            serde_json::from_value(json!({"id": 5, "nom": "Ngono", "is_agence": 1})).unwrap();
        assert!(user.is_agency());
        assert_eq!(user.full_name(), "Ngono");
    }
}
