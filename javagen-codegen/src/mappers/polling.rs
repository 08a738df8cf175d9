use eyre::Result;
use javagen_codemodel::{HttpMethod, LongRunning, Operation};
use javagen_ir::{IType, PollingDetails};

use super::{MapperContext, types::map_type};
use crate::runtime::RuntimeClass;

/// Polling details of a long-running operation.
///
/// The poll result falls back to `BinaryData`. The final result falls back to
/// `Void` for deletes, then to the success body, then to `BinaryData`.
pub fn map_polling(ctx: &MapperContext<'_>, op: &Operation, lro: &LongRunning) -> Result<PollingDetails> {
    let binary_data = || ctx.runtime.ty(RuntimeClass::BinaryData);

    let poll_result_type = match &lro.poll_result_type {
        Some(expr) => map_type(ctx, expr)?.client.as_nullable(),
        None => binary_data(),
    };

    let final_result_type = match (&lro.final_result_type, op.success_schema()) {
        (Some(expr), _) => map_type(ctx, expr)?.client.as_nullable(),
        (None, _) if op.request.method == HttpMethod::Delete => IType::boxed_void(),
        (None, Some(body)) => map_type(ctx, body)?.client.as_nullable(),
        (None, None) => binary_data(),
    };

    Ok(PollingDetails {
        poll_result_type,
        final_result_type,
        poll_interval_seconds: lro.poll_interval_seconds,
    })
}
