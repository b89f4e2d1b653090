//! CreateSession / ValidateSession

use serde_json::Value;

use super::args::expect_args;
use super::{ContractHandler, Function};
use crate::shared::DomainResult;

pub async fn handle_create_session(handler: &ContractHandler, args: &[String]) -> DomainResult<Value> {
    let [user_id] = expect_args::<1>(Function::CreateSession, args)?;
    let session = handler.sessions.create(user_id).await?;
    Ok(serde_json::to_value(session)?)
}

pub async fn handle_validate_session(
    handler: &ContractHandler,
    args: &[String],
) -> DomainResult<Value> {
    let [session_id] = expect_args::<1>(Function::ValidateSession, args)?;
    let session = handler.sessions.validate(session_id).await?;
    Ok(serde_json::to_value(session)?)
}
