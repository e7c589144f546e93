use serde::{Deserialize, Serialize};
use validator::Validate;

pub use vitals_log_data::models::Measurement;

/// Domain model for a vital-signs reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Unique identifier for the reading
    pub id: i64,

    /// Calendar date the reading was taken
    pub date: String,

    /// Clock time the reading was taken, empty when not recorded
    pub time: String,

    /// Systolic blood pressure (the higher number)
    pub systolic: Measurement,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: Measurement,

    /// Heart rate in beats per minute
    pub heart_rate: Option<Measurement>,

    /// Total cholesterol
    pub total_chol: Option<Measurement>,

    /// HDL cholesterol
    pub hdl: Option<Measurement>,

    /// LDL cholesterol
    pub ldl: Option<Measurement>,

    /// Triglycerides
    pub trig: Option<Measurement>,

    /// Serum creatinine
    pub creatinine: Option<Measurement>,
}

/// A numeric field as submitted by a client: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    /// Coerce the input to a measurement.
    ///
    /// Blank text counts as not supplied. Text that is not a finite number is
    /// an error naming the field.
    pub fn coerce(&self, field: &str) -> Result<Option<Measurement>, String> {
        let value = match self {
            NumberInput::Number(value) => *value,
            NumberInput::Text(text) if text.trim().is_empty() => return Ok(None),
            NumberInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{} must be a number", field))?,
        };

        Measurement::new(value)
            .map(Some)
            .ok_or_else(|| format!("{} must be a finite number", field))
    }
}

/// Coerce an optional input, treating a missing field as absent
fn coerce_optional(input: Option<&NumberInput>, field: &str) -> Result<Option<Measurement>, String> {
    match input {
        Some(input) => input.coerce(field),
        None => Ok(None),
    }
}

/// Request payload for recording a new reading
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingRequest {
    /// Client-chosen identifier, for clients that create readings offline
    pub id: Option<i64>,

    /// Calendar date of the reading
    #[validate(
        required(message = "date is required"),
        length(min = 1, message = "date must not be empty")
    )]
    pub date: Option<String>,

    /// Clock time of the reading
    pub time: Option<String>,

    /// Systolic blood pressure
    #[validate(required(message = "systolic is required"))]
    pub systolic: Option<NumberInput>,

    /// Diastolic blood pressure
    #[validate(required(message = "diastolic is required"))]
    pub diastolic: Option<NumberInput>,

    pub heart_rate: Option<NumberInput>,
    pub total_chol: Option<NumberInput>,
    pub hdl: Option<NumberInput>,
    pub ldl: Option<NumberInput>,
    pub trig: Option<NumberInput>,
    pub creatinine: Option<NumberInput>,
}

/// A validated, coerced reading that has not been given an identifier yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub requested_id: Option<i64>,
    pub date: String,
    pub time: String,
    pub systolic: Measurement,
    pub diastolic: Measurement,
    pub heart_rate: Option<Measurement>,
    pub total_chol: Option<Measurement>,
    pub hdl: Option<Measurement>,
    pub ldl: Option<Measurement>,
    pub trig: Option<Measurement>,
    pub creatinine: Option<Measurement>,
}

impl CreateReadingRequest {
    /// Coerce every numeric field and fill in defaults.
    ///
    /// Required fields that coerce to nothing (blank strings) are reported as
    /// missing.
    pub fn into_new_reading(self) -> Result<NewReading, String> {
        let date = self
            .date
            .filter(|date| !date.is_empty())
            .ok_or_else(|| "date is required".to_string())?;
        let systolic = coerce_optional(self.systolic.as_ref(), "systolic")?
            .ok_or_else(|| "systolic is required".to_string())?;
        let diastolic = coerce_optional(self.diastolic.as_ref(), "diastolic")?
            .ok_or_else(|| "diastolic is required".to_string())?;

        Ok(NewReading {
            requested_id: self.id,
            date,
            time: self.time.unwrap_or_default(),
            systolic,
            diastolic,
            heart_rate: coerce_optional(self.heart_rate.as_ref(), "heartRate")?,
            total_chol: coerce_optional(self.total_chol.as_ref(), "totalChol")?,
            hdl: coerce_optional(self.hdl.as_ref(), "hdl")?,
            ldl: coerce_optional(self.ldl.as_ref(), "ldl")?,
            trig: coerce_optional(self.trig.as_ref(), "trig")?,
            creatinine: coerce_optional(self.creatinine.as_ref(), "creatinine")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_request() -> CreateReadingRequest {
        CreateReadingRequest {
            date: Some("2024-01-01".to_string()),
            systolic: Some(NumberInput::Number(120.0)),
            diastolic: Some(NumberInput::Number(80.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_deserializes_numbers_and_numeric_strings() {
        let request: CreateReadingRequest = serde_json::from_value(json!({
            "date": "2024-01-01",
            "systolic": "118",
            "diastolic": 76,
            "heartRate": null,
            "totalChol": " 190.5 "
        }))
        .unwrap();

        let reading = request.into_new_reading().unwrap();
        assert_eq!(reading.systolic.value(), 118.0);
        assert_eq!(reading.diastolic.value(), 76.0);
        assert_eq!(reading.heart_rate, None);
        assert_eq!(reading.total_chol.map(Measurement::value), Some(190.5));
        assert_eq!(reading.time, "");
    }

    #[test]
    fn test_required_fields_validation() {
        assert!(base_request().validate().is_ok());

        let missing_date = CreateReadingRequest {
            date: None,
            ..base_request()
        };
        assert!(missing_date.validate().is_err());

        let empty_date = CreateReadingRequest {
            date: Some(String::new()),
            ..base_request()
        };
        assert!(empty_date.validate().is_err());

        let missing_pressure = CreateReadingRequest {
            systolic: None,
            diastolic: None,
            ..base_request()
        };
        let errors = missing_pressure.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("systolic"));
        assert!(fields.contains_key("diastolic"));
    }

    #[test]
    fn test_zero_pressure_is_present() {
        let request = CreateReadingRequest {
            systolic: Some(NumberInput::Number(0.0)),
            ..base_request()
        };

        assert!(request.validate().is_ok());
        assert_eq!(request.into_new_reading().unwrap().systolic.value(), 0.0);
    }

    #[test]
    fn test_blank_optional_string_is_absent() {
        let request = CreateReadingRequest {
            hdl: Some(NumberInput::Text("   ".to_string())),
            ..base_request()
        };

        assert_eq!(request.into_new_reading().unwrap().hdl, None);
    }

    #[test]
    fn test_blank_required_string_is_missing() {
        let request = CreateReadingRequest {
            diastolic: Some(NumberInput::Text(String::new())),
            ..base_request()
        };

        assert_eq!(request.into_new_reading().unwrap_err(), "diastolic is required");
    }

    #[test]
    fn test_non_numeric_text_is_rejected() {
        let request = CreateReadingRequest {
            heart_rate: Some(NumberInput::Text("fast".to_string())),
            ..base_request()
        };

        assert_eq!(request.into_new_reading().unwrap_err(), "heartRate must be a number");

        let request = CreateReadingRequest {
            ldl: Some(NumberInput::Text("inf".to_string())),
            ..base_request()
        };
        assert_eq!(request.into_new_reading().unwrap_err(), "ldl must be a finite number");
    }
}
