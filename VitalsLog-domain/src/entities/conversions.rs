use crate::entities::reading::{NewReading, Reading};
use vitals_log_data::models::ReadingRecord;

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Convert from data model to domain entity for a reading
pub fn convert_to_domain_reading(record: ReadingRecord) -> Reading {
    Reading {
        id: record.id,
        date: record.date,
        time: record.time,
        systolic: record.systolic,
        diastolic: record.diastolic,
        heart_rate: record.heart_rate,
        total_chol: record.total_chol,
        hdl: record.hdl,
        ldl: record.ldl,
        trig: record.trig,
        creatinine: record.creatinine,
    }
}

/// Convert a coerced new reading into the record that will be stored under `id`
pub fn convert_to_data_record(reading: NewReading, id: i64) -> ReadingRecord {
    ReadingRecord {
        id,
        date: reading.date,
        time: reading.time,
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        heart_rate: reading.heart_rate,
        total_chol: reading.total_chol,
        hdl: reading.hdl,
        ldl: reading.ldl,
        trig: reading.trig,
        creatinine: reading.creatinine,
    }
}

/// Convert from domain entity to data model for a reading
pub fn convert_to_data_reading(reading: Reading) -> ReadingRecord {
    ReadingRecord {
        id: reading.id,
        date: reading.date,
        time: reading.time,
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        heart_rate: reading.heart_rate,
        total_chol: reading.total_chol,
        hdl: reading.hdl,
        ldl: reading.ldl,
        trig: reading.trig,
        creatinine: reading.creatinine,
    }
}
