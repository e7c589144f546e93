use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest magnitude at which every integer is exactly representable as an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A finite numeric measurement as stored in the readings document.
///
/// Whole values are written as JSON integers (`120`) and everything else as
/// JSON floats (`1.25`), so the document reads the same as one written by hand.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Measurement(f64);

impl Measurement {
    /// Wrap a value, rejecting NaN and infinities.
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    /// The raw value
    pub fn value(self) -> f64 {
        self.0
    }

    fn is_whole(self) -> bool {
        self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Measurement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Measurement::new(value)
            .ok_or_else(|| serde::de::Error::custom("measurement must be a finite number"))
    }
}

/// Storage model for one vital-signs reading.
///
/// Field order here is the field order in the persisted document. Optional
/// measurements are always written, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingRecord {
    /// Unique identifier within the collection
    pub id: i64,

    /// Calendar date of the reading
    pub date: String,

    /// Clock time of the reading, empty when not recorded
    #[serde(default)]
    pub time: String,

    /// Systolic blood pressure
    pub systolic: Measurement,

    /// Diastolic blood pressure
    pub diastolic: Measurement,

    #[serde(default)]
    pub heart_rate: Option<Measurement>,

    #[serde(default)]
    pub total_chol: Option<Measurement>,

    #[serde(default)]
    pub hdl: Option<Measurement>,

    #[serde(default)]
    pub ldl: Option<Measurement>,

    #[serde(default)]
    pub trig: Option<Measurement>,

    #[serde(default)]
    pub creatinine: Option<Measurement>,
}

impl ReadingRecord {
    /// Key the collection is ordered by: `"{date} {time}"`.
    pub fn sort_key(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}
