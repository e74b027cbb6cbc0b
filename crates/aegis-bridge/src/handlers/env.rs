//! `env`: read, set, or list process environment variables.

use aegis_common::{BridgeError, Payload};
use serde_json::{json, Map, Value};

/// `{name, value}` sets, `{name}` gets (`value` is null when unset), `{}`
/// lists everything under `env`.
pub fn env(payload: &Payload) -> Result<Value, BridgeError> {
    match (payload.str("name"), payload.get("value")) {
        (Some(name), Some(value)) => {
            check_name(name)?;
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            std::env::set_var(name, &value);
            Ok(json!({ "name": name, "value": value }))
        }
        (Some(name), None) => {
            check_name(name)?;
            let value = std::env::var(name).map(Value::String).unwrap_or(Value::Null);
            Ok(json!({ "name": name, "value": value }))
        }
        (None, _) => {
            let vars: Map<String, Value> = std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, Value::String(v.into_string().ok()?))))
                .collect();
            Ok(json!({ "env": vars }))
        }
    }
}

fn check_name(name: &str) -> Result<(), BridgeError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(BridgeError::InvalidRequest(format!(
            "invalid environment variable name {name:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(v: Value) -> Payload {
        Payload::try_from(v).unwrap()
    }

    #[test]
    fn set_get_and_list() {
        let name = "AEGIS_BRIDGE_ENV_TEST";
        let set = env(&payload(json!({ "name": name, "value": "on" }))).unwrap();
        assert_eq!(set["value"], "on");

        let got = env(&payload(json!({ "name": name }))).unwrap();
        assert_eq!(got["value"], "on");

        let all = env(&Payload::new()).unwrap();
        assert_eq!(all["env"][name], "on");
    }

    #[test]
    fn non_string_value_is_stringified() {
        let name = "AEGIS_BRIDGE_ENV_NUMBER";
        let set = env(&payload(json!({ "name": name, "value": 42 }))).unwrap();
        assert_eq!(set["value"], "42");
    }

    #[test]
    fn unset_variable_is_null() {
        let got = env(&payload(json!({ "name": "AEGIS_BRIDGE_DEFINITELY_UNSET" }))).unwrap();
        assert_eq!(got["value"], Value::Null);
    }

    #[test]
    fn rejects_bad_names() {
        assert!(matches!(
            env(&payload(json!({ "name": "A=B", "value": "x" }))),
            Err(BridgeError::InvalidRequest(_))
        ));
        assert!(matches!(
            env(&payload(json!({ "name": "" }))),
            Err(BridgeError::InvalidRequest(_))
        ));
    }
}
