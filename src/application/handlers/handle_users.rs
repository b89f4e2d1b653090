//! RegisterUser / GetUser

use serde_json::Value;

use super::args::expect_args;
use super::{ContractHandler, Function};
use crate::shared::DomainResult;

pub async fn handle_register_user(handler: &ContractHandler, args: &[String]) -> DomainResult<Value> {
    let [user_id, role, name, email] = expect_args::<4>(Function::RegisterUser, args)?;
    handler.identity.register(user_id, role, name, email).await?;
    Ok(Value::Null)
}

pub async fn handle_get_user(handler: &ContractHandler, args: &[String]) -> DomainResult<Value> {
    let [user_id] = expect_args::<1>(Function::GetUser, args)?;
    let user = handler.identity.lookup(user_id).await?;
    Ok(serde_json::to_value(user)?)
}
