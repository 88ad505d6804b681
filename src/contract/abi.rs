//! JSON ABI calldata encoding and output decoding
//!
//! Arguments arrive as a JSON map keyed by ABI parameter name. Each value is
//! coerced into the parameter's Solidity type: strings and numbers go through
//! the Solidity literal parser, JSON arrays map onto arrays and tuples.

use crate::capabilities::{ArgumentMap, ContractValue};
use crate::{Error, Result};
use alloy::dyn_abi::{DynSolType, DynSolValue, FunctionExt, JsonAbiExt, Specifier};
use alloy::json_abi::{Function, JsonAbi};
use serde_json::Value;

/// Resolve `method` in `abi` and ABI-encode a call with `args`
pub fn encode_call(abi: &JsonAbi, method: &str, args: &ArgumentMap) -> Result<(Function, Vec<u8>)> {
    let overloads = abi
        .function(method)
        .ok_or_else(|| Error::Abi(format!("Method {} not found in ABI", method)))?;

    let function = overloads
        .iter()
        .find(|f| f.inputs.len() == args.len())
        .ok_or_else(|| {
            Error::Abi(format!(
                "No overload of {} takes {} argument(s)",
                method,
                args.len()
            ))
        })?;

    let mut values = Vec::with_capacity(function.inputs.len());
    for param in &function.inputs {
        let arg = args.get(&param.name).ok_or_else(|| {
            Error::Abi(format!("Missing argument '{}' for {}", param.name, method))
        })?;
        let ty: DynSolType = param
            .resolve()
            .map_err(|e| Error::Abi(format!("Unresolvable type for '{}': {}", param.name, e)))?;
        let value = coerce(&ty, arg)
            .map_err(|e| Error::Abi(format!("Argument '{}' of {}: {}", param.name, method, e)))?;
        values.push(value);
    }

    let calldata = function
        .abi_encode_input(&values)
        .map_err(|e| Error::Abi(format!("Failed to encode {}: {}", method, e)))?;

    Ok((function.clone(), calldata))
}

/// Decode the return data of `function`
pub fn decode_output(function: &Function, data: &[u8]) -> Result<ContractValue> {
    let mut outputs = function
        .abi_decode_output(data)
        .map_err(|e| Error::Abi(format!("Failed to decode {} output: {}", function.name, e)))?;

    let value = if outputs.len() == 1 {
        outputs.remove(0)
    } else {
        DynSolValue::Tuple(outputs)
    };
    Ok(ContractValue::new(value))
}

fn coerce(ty: &DynSolType, value: &Value) -> std::result::Result<DynSolValue, String> {
    match (ty, value) {
        (DynSolType::Array(inner), Value::Array(items)) => items
            .iter()
            .map(|item| coerce(inner, item))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(DynSolValue::Array),
        (DynSolType::FixedArray(inner, len), Value::Array(items)) => {
            if items.len() != *len {
                return Err(format!("expected {} elements, got {}", len, items.len()));
            }
            items
                .iter()
                .map(|item| coerce(inner, item))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(DynSolValue::FixedArray)
        }
        (DynSolType::Tuple(types), Value::Array(items)) => {
            if items.len() != types.len() {
                return Err(format!(
                    "expected {} tuple fields, got {}",
                    types.len(),
                    items.len()
                ));
            }
            types
                .iter()
                .zip(items)
                .map(|(ty, item)| coerce(ty, item))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(DynSolValue::Tuple)
        }
        (DynSolType::String, Value::String(s)) => Ok(DynSolValue::String(s.clone())),
        (_, Value::String(s)) => ty.coerce_str(s).map_err(|e| e.to_string()),
        (_, Value::Number(n)) => ty.coerce_str(&n.to_string()).map_err(|e| e.to_string()),
        (_, Value::Bool(b)) => ty
            .coerce_str(if *b { "true" } else { "false" })
            .map_err(|e| e.to_string()),
        (_, other) => Err(format!("cannot convert {} to {}", other, ty.sol_type_name())),
    }
}
