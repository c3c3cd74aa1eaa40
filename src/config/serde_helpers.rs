//! Deserializers for scalars written with the wrong YAML type
//!
//! Quoting a value in YAML turns it into a string, so `port: "9091"` and
//! `secure: "false"` have to decode to the type the field expects. Numbers are
//! accepted where a string is expected. A null decodes to the zero value.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
}

/// Integer from a number, a numeric string, or a boolean (`true` is 1)
pub fn int_from_scalar<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + std::str::FromStr + Default,
    <T as TryFrom<i64>>::Error: std::fmt::Display,
    <T as std::str::FromStr>::Err: std::fmt::Display,
{
    let value = match Option::<Scalar>::deserialize(deserializer)? {
        None => return Ok(T::default()),
        Some(Scalar::String(s)) => {
            return s
                .trim()
                .parse::<T>()
                .map_err(|e| D::Error::custom(format!("invalid integer {:?}: {}", s, e)))
        }
        Some(Scalar::I64(v)) => v,
        Some(Scalar::U64(v)) => i64::try_from(v).map_err(D::Error::custom)?,
        Some(Scalar::F64(v)) if v.fract() == 0.0 => v as i64,
        Some(Scalar::F64(v)) => {
            return Err(D::Error::custom(format!("expected an integer, found {}", v)))
        }
        Some(Scalar::Bool(b)) => i64::from(b),
    };

    T::try_from(value).map_err(D::Error::custom)
}

/// Boolean from a boolean, a number (non-zero is true), or one of
/// `1 t T TRUE true True 0 f F FALSE false False`
pub fn bool_from_scalar<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Scalar::Bool(b)) => Ok(b),
        Some(Scalar::I64(v)) => Ok(v != 0),
        Some(Scalar::U64(v)) => Ok(v != 0),
        Some(Scalar::F64(v)) => Err(D::Error::custom(format!("expected a boolean, found {}", v))),
        Some(Scalar::String(s)) => parse_bool(s.trim())
            .ok_or_else(|| D::Error::custom(format!("invalid boolean {:?}", s))),
    }
}

/// String from any scalar
pub fn string_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::String(s)) => s,
        Some(Scalar::Bool(b)) => b.to_string(),
        Some(Scalar::I64(v)) => v.to_string(),
        Some(Scalar::U64(v)) => v.to_string(),
        Some(Scalar::F64(v)) => v.to_string(),
    })
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
