//! Patient demographics sent with every vendor call.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use crate::{DxError, DxResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = DxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(DxError::InvalidInput(format!(
                "sex must be 'male' or 'female', got: '{}'",
                other
            ))),
        }
    }
}

/// The vendor only accepts ages in years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    #[default]
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Age {
    pub value: u32,
    #[serde(default)]
    pub unit: AgeUnit,
}

impl Age {
    pub fn years(value: u32) -> Self {
        Self {
            value,
            unit: AgeUnit::Year,
        }
    }
}

/// Sex and age of the patient; required before a diagnosis can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demographics {
    pub sex: Sex,
    pub age: Age,
}

impl Demographics {
    pub fn new(sex: Sex, age_years: u32) -> Self {
        Self {
            sex,
            age: Age::years(age_years),
        }
    }

    /// Builds demographics from raw form values, as entered by a user.
    ///
    /// # Errors
    ///
    /// Returns [`DxError::MissingDemographics`] if either value is blank, or
    /// [`DxError::InvalidInput`] if a value does not parse.
    pub fn from_form(sex: &str, age: &str) -> DxResult<Self> {
        if sex.trim().is_empty() || age.trim().is_empty() {
            return Err(DxError::MissingDemographics);
        }
        let sex = sex.parse::<Sex>()?;
        let age = age.trim().parse::<u32>().map_err(|_| {
            DxError::InvalidInput(format!("age must be a whole number of years, got: '{}'", age))
        })?;
        Ok(Self::new(sex, age))
    }
}
