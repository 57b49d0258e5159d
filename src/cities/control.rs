use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::city::CityRecord;

pub const PLACEHOLDER_LABEL: &str = "Seleccione una ciudad...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
        }
    }
}

/// A city selection control: its options and the selected value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectControl {
    pub options: Vec<SelectOption>,
    pub value: String,
}

impl SelectControl {
    /// Replaces the options with a placeholder followed by one option per
    /// city. The selection survives only if one of the new options has it.
    pub fn populate(&mut self, cities: &[CityRecord]) {
        self.options.clear();
        self.options.push(SelectOption::placeholder());
        self.options.extend(cities.iter().map(|c| SelectOption {
            value: c.id.clone(),
            label: c.name.clone(),
        }));

        if !self.has_option(&self.value) {
            self.value.clear();
        }
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// A city input, either still free text or turned into a select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CityField {
    FreeText { value: String },
    Select(SelectControl),
}

impl CityField {
    pub fn value(&self) -> &str {
        match self {
            CityField::FreeText { value } => value,
            CityField::Select(select) => &select.value,
        }
    }

    /// Turns the field into a populated select, keeping the current value
    /// when it matches a city. With no cities the field is left untouched.
    pub fn rehydrate(self, cities: &[CityRecord]) -> Self {
        if cities.is_empty() {
            return self;
        }
        let mut select = SelectControl {
            options: Vec::new(),
            value: self.value().to_string(),
        };
        select.populate(cities);
        CityField::Select(select)
    }

    /// Back to free text, carrying the selected value. Used before a reload.
    pub fn revert_to_text(self) -> Self {
        match self {
            CityField::Select(select) => CityField::FreeText {
                value: select.value,
            },
            text => text,
        }
    }
}
