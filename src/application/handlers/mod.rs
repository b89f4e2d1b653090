//! Contract transaction handlers
//!
//! Routes transaction names to their handlers. Each handler takes the raw
//! positional string arguments, parses what it needs and returns JSON.

use serde_json::Value;

use crate::shared::DomainResult;

mod args;
mod contract_handler;
mod function;
mod handle_assets;
mod handle_health_records;
mod handle_sessions;
mod handle_users;

pub use contract_handler::{ContractHandler, ContractSettings, ErrorEnvelope};
pub use function::Function;

use handle_assets::{
    handle_create_asset, handle_device_exists, handle_get_all_assets, handle_read_asset,
};
use handle_health_records::{
    handle_add_health_record, handle_get_all_health_records,
    handle_get_health_records_by_patient, handle_get_health_records_for_session,
};
use handle_sessions::{handle_create_session, handle_validate_session};
use handle_users::{handle_get_user, handle_register_user};

/// Routes a parsed function to its handler.
pub async fn action_matcher(
    handler: &ContractHandler,
    function: Function,
    args: &[String],
) -> DomainResult<Value> {
    match function {
        Function::RegisterUser => handle_register_user(handler, args).await,
        Function::GetUser => handle_get_user(handler, args).await,
        Function::CreateSession => handle_create_session(handler, args).await,
        Function::ValidateSession => handle_validate_session(handler, args).await,
        Function::CreateAsset => handle_create_asset(handler, args).await,
        Function::AddHealthRecord => handle_add_health_record(handler, args).await,
        Function::ReadAsset => handle_read_asset(handler, args).await,
        Function::DeviceExists => handle_device_exists(handler, args).await,
        Function::GetAllAssets => handle_get_all_assets(handler, args).await,
        Function::GetHealthRecordsByPatient => {
            handle_get_health_records_by_patient(handler, args).await
        }
        Function::GetAllHealthRecords => handle_get_all_health_records(handler, args).await,
        Function::GetHealthRecordsForSession => {
            handle_get_health_records_for_session(handler, args).await
        }
    }
}
