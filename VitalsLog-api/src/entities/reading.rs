use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use vitals_log_domain::entities::{Measurement, NumberInput};

/// Public representation of a vital-signs reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Unique identifier for the reading
    #[schema(example = 1704067200000i64)]
    pub id: i64,

    /// Calendar date the reading was taken
    #[schema(example = "2024-01-01")]
    pub date: String,

    /// Clock time the reading was taken, empty when not recorded
    #[schema(example = "08:30")]
    pub time: String,

    /// Systolic blood pressure (the higher number)
    #[schema(value_type = f64, example = 120)]
    pub systolic: Measurement,

    /// Diastolic blood pressure (the lower number)
    #[schema(value_type = f64, example = 80)]
    pub diastolic: Measurement,

    /// Heart rate in beats per minute
    #[schema(value_type = Option<f64>)]
    pub heart_rate: Option<Measurement>,

    /// Total cholesterol
    #[schema(value_type = Option<f64>)]
    pub total_chol: Option<Measurement>,

    /// HDL cholesterol
    #[schema(value_type = Option<f64>)]
    pub hdl: Option<Measurement>,

    /// LDL cholesterol
    #[schema(value_type = Option<f64>)]
    pub ldl: Option<Measurement>,

    /// Triglycerides
    #[schema(value_type = Option<f64>)]
    pub trig: Option<Measurement>,

    /// Serum creatinine
    #[schema(value_type = Option<f64>)]
    pub creatinine: Option<Measurement>,
}

/// Request payload for recording a new reading.
///
/// Numeric fields accept JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingRequest {
    /// Client-chosen identifier; generated from the clock when omitted
    pub id: Option<i64>,

    /// Calendar date of the reading (required)
    #[schema(example = "2024-01-01")]
    pub date: Option<String>,

    /// Clock time of the reading
    pub time: Option<String>,

    /// Systolic blood pressure (required)
    #[schema(value_type = Option<f64>, example = 120)]
    pub systolic: Option<NumberInput>,

    /// Diastolic blood pressure (required)
    #[schema(value_type = Option<f64>, example = 80)]
    pub diastolic: Option<NumberInput>,

    #[schema(value_type = Option<f64>)]
    pub heart_rate: Option<NumberInput>,

    #[schema(value_type = Option<f64>)]
    pub total_chol: Option<NumberInput>,

    #[schema(value_type = Option<f64>)]
    pub hdl: Option<NumberInput>,

    #[schema(value_type = Option<f64>)]
    pub ldl: Option<NumberInput>,

    #[schema(value_type = Option<f64>)]
    pub trig: Option<NumberInput>,

    #[schema(value_type = Option<f64>)]
    pub creatinine: Option<NumberInput>,
}

/// Response body for a successful delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletedReadingResponse {
    /// Identifier of the reading that was removed
    pub deleted: i64,
}
