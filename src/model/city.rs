use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CityRecord {
    #[schema(example = "836")]
    pub id: String,
    #[schema(example = "Medellín")]
    pub name: String,
}

/// Which upstream record fields hold the city id and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldMapping {
    #[schema(example = "id")]
    pub id_field: String,
    #[schema(example = "name_city")]
    pub name_field: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            id_field: "id".to_string(),
            name_field: "name_city".to_string(),
        }
    }
}
