//! Marshaling between values and small fixed-size vectors.
//!
//! Spatial fields in object definitions are written as 3-element lists;
//! these adapters move them across the boundary to the engine's native
//! vector types.

use thiserror::Error;

use crate::decimal::Decimal;
use crate::value::Value;

#[derive(Debug, Error)]
pub enum MarshalError {
    #[error("expected a 3-element numeric list for a vec3, found: {value}")]
    ExpectedVec3 { value: String },

    #[error("expected a 3-element integer list for an ivec3, found: {value}")]
    ExpectedIvec3 { value: String },
}

/// A 3-element numeric list as a float vector.
pub fn value_to_vec3(v: &Value) -> Result<[f32; 3], MarshalError> {
    let err = || MarshalError::ExpectedVec3 {
        value: v.to_string(),
    };
    let items = v.as_list().ok_or_else(err)?;
    if items.len() != 3 {
        return Err(err());
    }
    let mut out = [0.0_f32; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item.as_decimal().ok_or_else(err)?.as_f32();
    }
    Ok(out)
}

pub fn vec3_to_value(v: [f32; 3]) -> Value {
    Value::list(
        v.iter()
            .map(|&component| Value::Decimal(Decimal::from_f64(f64::from(component))))
            .collect(),
    )
}

/// A 3-element integer list as an integer vector.
pub fn value_to_ivec3(v: &Value) -> Result<[i32; 3], MarshalError> {
    let err = || MarshalError::ExpectedIvec3 {
        value: v.to_string(),
    };
    let items = v.as_list().ok_or_else(err)?;
    if items.len() != 3 {
        return Err(err());
    }
    let mut out = [0_i32; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        let n = item.as_int().ok_or_else(err)?;
        *slot = i32::try_from(n).map_err(|_| err())?;
    }
    Ok(out)
}

pub fn ivec3_to_value(v: [i32; 3]) -> Value {
    Value::list(v.iter().map(|&component| Value::from(component)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_round_trip() {
        let v = vec3_to_value([1.0, -2.5, 0.125]);
        assert_eq!(value_to_vec3(&v).expect("well-formed"), [1.0, -2.5, 0.125]);
    }

    #[test]
    fn vec3_accepts_int_components() {
        let v = Value::list(vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(value_to_vec3(&v).expect("ints widen"), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn vec3_rejects_wrong_arity() {
        let v = Value::list(vec![Value::from(1), Value::from(2)]);
        let err = value_to_vec3(&v).unwrap_err();
        assert!(err.to_string().contains("[1, 2]"), "{err}");
    }

    #[test]
    fn ivec3_round_trip() {
        let v = ivec3_to_value([4, 5, -6]);
        assert_eq!(value_to_ivec3(&v).expect("well-formed"), [4, 5, -6]);
    }

    #[test]
    fn ivec3_rejects_decimal_components() {
        let v = Value::list(vec![
            Value::from(Decimal::from_int(1)),
            Value::from(2),
            Value::from(3),
        ]);
        assert!(value_to_ivec3(&v).is_err());
    }
}
