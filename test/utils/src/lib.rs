use std::env;
use std::fs;
use std::path::PathBuf;

/// Path to `name` inside a fresh, empty directory under the system temp dir.
pub fn temp_path(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("mekody-admin-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    return dir.join(name);
}

/// Three contacts as the list endpoint returns them: a numeric id, a string
/// id, and a record with every optional field missing.
pub fn contacts_fixture() -> &'static str {
    return r#"[
  {
    "id": 1,
    "nom_complet": "Awa Diallo",
    "courriel": "awa@mekody.com",
    "entreprise": "Mekody",
    "service_interesse": "Formation",
    "message": "Bonjour, je souhaite un devis pour une formation",
    "date_creation": "2025-01-02"
  },
  {
    "id": "65a1f0c2e4b0a1b2c3d4e5f6",
    "nom_complet": "Kodjo Mensah",
    "courriel": "kodjo@kody.tg",
    "entreprise": "Kody SARL",
    "service_interesse": "Développement Web",
    "message": "Refonte de notre site",
    "date_creation": "2024-12-15T09:30:00.000Z"
  },
  {
    "id": 3,
    "nom_complet": "Fatou",
    "courriel": "fatou@x.com"
  }
]"#;
}
