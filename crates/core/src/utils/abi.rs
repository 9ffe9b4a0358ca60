use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::primitives::{Address, B256, Bytes, I256, U256};
use eyre::{Result, eyre};
use serde_json::Value;

/// ABI-encode an ordered argument list against an ordered type-name list.
///
/// This is the single encoding path for everything the tooling submits:
/// the queue call, the execute command, and constructor arguments all go
/// through here so the representations cannot drift apart.
pub fn encode_params(types: &[String], values: &[Value]) -> Result<Bytes> {
    if types.len() != values.len() {
        return Err(eyre!(
            "parameter mismatch: {} types but {} values",
            types.len(),
            values.len()
        ));
    }

    let mut coerced = Vec::with_capacity(types.len());
    for (type_name, value) in types.iter().zip(values) {
        let ty = type_name
            .parse::<DynSolType>()
            .map_err(|e| eyre!("invalid ABI type {}: {}", type_name, e))?;
        coerced.push(coerce_value(&ty, value)?);
    }

    Ok(Bytes::from(DynSolValue::Tuple(coerced).abi_encode_params()))
}

/// Decode parameter bytes back into values. Used to verify that a replayed
/// command carries the arguments it claims to.
pub fn decode_params(types: &[String], data: &[u8]) -> Result<Vec<DynSolValue>> {
    let parsed = types
        .iter()
        .map(|t| {
            t.parse::<DynSolType>()
                .map_err(|e| eyre!("invalid ABI type {}: {}", t, e))
        })
        .collect::<Result<Vec<_>>>()?;

    match DynSolType::Tuple(parsed).abi_decode_params(data)? {
        DynSolValue::Tuple(values) => Ok(values),
        other => Ok(vec![other]),
    }
}

/// Extract the parameter type names from a Solidity function signature,
/// splitting on top-level commas only (tuple types contain nested commas).
pub fn signature_param_types(signature: &str) -> Result<Vec<String>> {
    let open = signature
        .find('(')
        .ok_or_else(|| eyre!("malformed function signature: {}", signature))?;
    let name = &signature[..open];
    if name.is_empty()
        || !signature.ends_with(')')
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(eyre!("malformed function signature: {}", signature));
    }

    let inner = &signature[open + 1..signature.len() - 1];
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| eyre!("unbalanced signature: {}", signature))?;
            }
            ',' if depth == 0 => {
                params.push(inner[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(eyre!("unbalanced signature: {}", signature));
    }
    params.push(inner[start..].trim().to_string());

    Ok(params)
}

fn coerce_value(ty: &DynSolType, value: &Value) -> Result<DynSolValue> {
    let coerced = match ty {
        DynSolType::Address => {
            let s = expect_str(value, "address")?;
            DynSolValue::Address(
                s.parse::<Address>()
                    .map_err(|_| eyre!("invalid address: {}", s))?,
            )
        }
        DynSolType::Bool => match value {
            Value::Bool(b) => DynSolValue::Bool(*b),
            other => return Err(eyre!("expected bool, got {}", other)),
        },
        DynSolType::Uint(size) => DynSolValue::Uint(parse_uint(value)?, *size),
        DynSolType::Int(size) => DynSolValue::Int(parse_int(value)?, *size),
        DynSolType::String => DynSolValue::String(expect_str(value, "string")?.to_string()),
        DynSolType::Bytes => DynSolValue::Bytes(parse_hex(value)?),
        DynSolType::FixedBytes(size) => {
            let bytes = parse_hex(value)?;
            if bytes.len() != *size {
                return Err(eyre!(
                    "expected bytes{}, got {} bytes",
                    size,
                    bytes.len()
                ));
            }
            let mut word = B256::ZERO;
            word[..*size].copy_from_slice(&bytes);
            DynSolValue::FixedBytes(word, *size)
        }
        DynSolType::Array(inner) => {
            let items = expect_array(value)?;
            let coerced = items
                .iter()
                .map(|item| coerce_value(inner, item))
                .collect::<Result<Vec<_>>>()?;
            DynSolValue::Array(coerced)
        }
        DynSolType::FixedArray(inner, len) => {
            let items = expect_array(value)?;
            if items.len() != *len {
                return Err(eyre!("expected {} array items, got {}", len, items.len()));
            }
            let coerced = items
                .iter()
                .map(|item| coerce_value(inner, item))
                .collect::<Result<Vec<_>>>()?;
            DynSolValue::FixedArray(coerced)
        }
        DynSolType::Tuple(inner) => {
            let items = expect_array(value)?;
            if items.len() != inner.len() {
                return Err(eyre!(
                    "expected {} tuple members, got {}",
                    inner.len(),
                    items.len()
                ));
            }
            let coerced = inner
                .iter()
                .zip(items)
                .map(|(member_ty, item)| coerce_value(member_ty, item))
                .collect::<Result<Vec<_>>>()?;
            DynSolValue::Tuple(coerced)
        }
        other => return Err(eyre!("unsupported ABI type: {}", other)),
    };

    Ok(coerced)
}

fn expect_str<'a>(value: &'a Value, ty: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| eyre!("expected {} as a string, got {}", ty, value))
}

fn expect_array(value: &Value) -> Result<&Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(eyre!("expected an array, got {}", other)),
    }
}

fn parse_uint(value: &Value) -> Result<U256> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| eyre!("numeric parameter out of range: {}", n)),
        Value::String(s) => {
            let s = s.trim();
            if let Some(hex_part) = s.strip_prefix("0x") {
                U256::from_str_radix(hex_part, 16).map_err(|_| eyre!("invalid uint: {}", s))
            } else {
                U256::from_str_radix(s, 10).map_err(|_| eyre!("invalid uint: {}", s))
            }
        }
        other => Err(eyre!("expected uint, got {}", other)),
    }
}

fn parse_int(value: &Value) -> Result<I256> {
    match value {
        Value::Number(n) => {
            let n = n
                .as_i64()
                .ok_or_else(|| eyre!("numeric parameter out of range: {}", n))?;
            I256::try_from(n).map_err(|_| eyre!("invalid int: {}", n))
        }
        Value::String(s) => s
            .trim()
            .parse::<I256>()
            .map_err(|_| eyre!("invalid int: {}", s)),
        other => Err(eyre!("expected int, got {}", other)),
    }
}

fn parse_hex(value: &Value) -> Result<Vec<u8>> {
    let s = expect_str(value, "bytes")?;
    hex::decode(s.trim_start_matches("0x")).map_err(|_| eyre!("invalid hex: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_static_words() {
        let encoded = encode_params(
            &["address".to_string(), "uint256".to_string()],
            &[
                json!("0x2d5408f2287bf9f9b05404794459a846651d0a59"),
                json!("500"),
            ],
        )
        .unwrap();

        let expected: Bytes = concat!(
            "0x",
            "0000000000000000000000002d5408f2287bf9f9b05404794459a846651d0a59",
            "00000000000000000000000000000000000000000000000000000000000001f4",
        )
        .parse()
        .unwrap();
        assert_eq!(encoded, expected);
    }

    #[test]
    fn worker_factor_tuples_survive_decoding() {
        let types = vec![
            "address[]".to_string(),
            "(bool,uint64,uint64,uint64)[]".to_string(),
        ];
        let values = vec![
            json!(["0x7affab8b3c25816891b58ed2a88ddef5ecf25c77"]),
            json!([[true, "7000", "8333", "11000"]]),
        ];

        let encoded = encode_params(&types, &values).unwrap();
        let decoded = decode_params(&types, &encoded).unwrap();

        assert_eq!(
            decoded[0],
            DynSolValue::Array(vec![DynSolValue::Address(
                "0x7affab8b3c25816891b58ed2a88ddef5ecf25c77".parse().unwrap()
            )])
        );
        assert_eq!(
            decoded[1],
            DynSolValue::Array(vec![DynSolValue::Tuple(vec![
                DynSolValue::Bool(true),
                DynSolValue::Uint(U256::from(7000u64), 64),
                DynSolValue::Uint(U256::from(8333u64), 64),
                DynSolValue::Uint(U256::from(11000u64), 64),
            ])])
        );
    }

    #[test]
    fn rejects_mismatched_inputs() {
        let err = encode_params(&["uint256".to_string()], &[]).unwrap_err();
        assert!(err.to_string().contains("parameter mismatch"));

        let err = encode_params(&["bool".to_string()], &[json!("yes")]).unwrap_err();
        assert!(err.to_string().contains("expected bool"));

        let err = encode_params(&["uint512".to_string()], &[json!("1")]).unwrap_err();
        assert!(err.to_string().contains("uint512"));
    }

    #[test]
    fn splits_signature_parameters_at_top_level() {
        assert_eq!(
            signature_param_types("setMaxKillBps(uint256)").unwrap(),
            vec!["uint256"]
        );
        assert_eq!(
            signature_param_types("setConfigs(address[],(bool,uint64,uint64,uint64)[])").unwrap(),
            vec!["address[]", "(bool,uint64,uint64,uint64)[]"]
        );
        assert_eq!(
            signature_param_types("poolLength()").unwrap(),
            Vec::<String>::new()
        );
        assert!(signature_param_types("no parens").is_err());
        assert!(signature_param_types("bad(uint256").is_err());
    }
}
