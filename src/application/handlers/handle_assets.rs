//! Device transactions: CreateAsset, ReadAsset, DeviceExists, GetAllAssets

use serde_json::Value;

use super::args::expect_args;
use super::{ContractHandler, Function};
use crate::shared::DomainResult;

pub async fn handle_create_asset(handler: &ContractHandler, args: &[String]) -> DomainResult<Value> {
    let [hpbim, pidm, registered_by] = expect_args::<3>(Function::CreateAsset, args)?;
    handler.devices.register(hpbim, pidm, registered_by).await?;
    Ok(Value::Null)
}

pub async fn handle_read_asset(handler: &ContractHandler, args: &[String]) -> DomainResult<Value> {
    let [hpbim] = expect_args::<1>(Function::ReadAsset, args)?;
    let device = handler.devices.read(hpbim).await?;
    Ok(serde_json::to_value(device)?)
}

pub async fn handle_device_exists(handler: &ContractHandler, args: &[String]) -> DomainResult<Value> {
    let [hpbim] = expect_args::<1>(Function::DeviceExists, args)?;
    Ok(Value::Bool(handler.devices.exists(hpbim).await?))
}

pub async fn handle_get_all_assets(handler: &ContractHandler, args: &[String]) -> DomainResult<Value> {
    expect_args::<0>(Function::GetAllAssets, args)?;
    let devices = handler.devices.list_all().await?;
    Ok(serde_json::to_value(devices)?)
}
