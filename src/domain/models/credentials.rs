use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialField {
    Courriel,
    MotDePasse,
}

impl CredentialField {
    pub const ALL: [CredentialField; 2] = [CredentialField::Courriel, CredentialField::MotDePasse];

    pub fn label(&self) -> &'static str {
        match self {
            CredentialField::Courriel => return "Email",
            CredentialField::MotDePasse => return "Mot de passe",
        }
    }
}

/// Body of the login request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub courriel: String,
    pub mot_de_passe: String,
}

impl LoginCredentials {
    pub fn field(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Courriel => return &self.courriel,
            CredentialField::MotDePasse => return &self.mot_de_passe,
        }
    }

    pub fn with_field(&self, field: CredentialField, value: &str) -> LoginCredentials {
        let mut credentials = self.clone();
        match field {
            CredentialField::Courriel => credentials.courriel = value.to_string(),
            CredentialField::MotDePasse => credentials.mot_de_passe = value.to_string(),
        }

        return credentials;
    }

    pub fn missing_required(&self) -> Option<CredentialField> {
        return CredentialField::ALL
            .into_iter()
            .find(|field| return self.field(*field).is_empty());
    }
}
