//! Health record transactions

use serde_json::Value;
use tracing::debug;

use super::args::expect_args;
use super::{ContractHandler, Function};
use crate::application::records::AddHealthRecordDto;
use crate::domain::{Capability, DomainError, HealthData};
use crate::shared::{parse_float, parse_int, DomainResult};

pub async fn handle_add_health_record(
    handler: &ContractHandler,
    args: &[String],
) -> DomainResult<Value> {
    let [record_id, device_hpbim, patient_id, doctor_id, heart_rate, blood_pressure, temperature, oxygen_level, notes] =
        expect_args::<9>(Function::AddHealthRecord, args)?;

    let dto = AddHealthRecordDto {
        record_id: record_id.to_string(),
        device_hpbim: device_hpbim.to_string(),
        patient_id: patient_id.to_string(),
        doctor_id: doctor_id.to_string(),
        data: HealthData {
            heart_rate: parse_int("heartRate", heart_rate)?,
            blood_pressure: blood_pressure.to_string(),
            temperature: parse_float("temperature", temperature)?,
            oxygen_level: parse_float("oxygenLevel", oxygen_level)?,
            notes: notes.to_string(),
        },
    };

    handler.records.add(dto).await?;
    Ok(Value::Null)
}

pub async fn handle_get_health_records_by_patient(
    handler: &ContractHandler,
    args: &[String],
) -> DomainResult<Value> {
    let [patient_id] = expect_args::<1>(Function::GetHealthRecordsByPatient, args)?;
    let views = handler.queries.by_patient(patient_id).await?;
    Ok(serde_json::to_value(views)?)
}

pub async fn handle_get_all_health_records(
    handler: &ContractHandler,
    args: &[String],
) -> DomainResult<Value> {
    expect_args::<0>(Function::GetAllHealthRecords, args)?;
    let views = handler.queries.all().await?;
    Ok(serde_json::to_value(views)?)
}

/// Records visible to the session's owner: everything for staff roles,
/// their own records for patients.
pub async fn handle_get_health_records_for_session(
    handler: &ContractHandler,
    args: &[String],
) -> DomainResult<Value> {
    let [session_id] = expect_args::<1>(Function::GetHealthRecordsForSession, args)?;

    let session = handler.sessions.validate(session_id).await?;
    let user = handler.identity.lookup_active(&session.user_id).await?;

    let views = if user.can(Capability::ViewAllHealthRecords) {
        handler.queries.all().await?
    } else if user.can(Capability::ViewOwnHealthRecords) {
        handler.queries.by_patient(&user.user_id).await?
    } else {
        return Err(DomainError::Forbidden(format!(
            "role {} may not view health records",
            user.role
        )));
    };

    debug!(user_id = %user.user_id, role = %user.role, count = views.len(), "Session record view");
    Ok(serde_json::to_value(views)?)
}
