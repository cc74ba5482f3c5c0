//! Serialization of tensors and storage (requires the `serde` feature).

#![cfg(feature = "serde")]

use ndcore::{Dense, Tensor};

/// A tensor survives a JSON round trip with shape and values intact.
#[test]
fn test_tensor_json_roundtrip() {
    let t = Tensor::from_vec(vec![1.0, 2.5, -3.0, 4.0, 0.0, 6.0], &[2, 3]).unwrap();
    let json = serde_json::to_string(&t).unwrap();
    let back: Tensor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
    assert_eq!(back.strides(), &[3, 1]);
}

/// The serialized form names its parts.
#[test]
fn test_tensor_json_fields() {
    let t: Tensor<f32> = Tensor::ones(&[2]);
    let value: serde_json::Value = serde_json::to_value(&t).unwrap();
    assert_eq!(value["shape"], serde_json::json!([2]));
    assert_eq!(value["strides"], serde_json::json!([1]));
    assert_eq!(value["storage"]["data"], serde_json::json!([1.0, 1.0]));
}

/// A buffer whose length disagrees with the shape is rejected.
#[test]
fn test_tensor_rejects_wrong_length() {
    let json = r#"{"storage":{"data":[1.0,2.0,3.0]},"shape":[2,2],"strides":[2,1]}"#;
    let err = serde_json::from_str::<Tensor>(json).unwrap_err();
    assert!(err.is_data());
    assert!(err.to_string().contains("expected 4 elements, got 3"));
}

/// Strides that are not the row-major ones for the shape are rejected.
#[test]
fn test_tensor_rejects_foreign_strides() {
    let json = r#"{"storage":{"data":[1.0,2.0,3.0,4.0]},"shape":[2,2],"strides":[100,1]}"#;
    let err = serde_json::from_str::<Tensor>(json).unwrap_err();
    assert!(err.is_data());
    assert!(err.to_string().contains("strides"));
}

/// Strides may be left out; they are recomputed from the shape.
#[test]
fn test_tensor_strides_recomputed() {
    let json = r#"{"storage":{"data":[1.0,2.0,3.0,4.0,5.0,6.0]},"shape":[3,2]}"#;
    let t: Tensor = serde_json::from_str(json).unwrap();
    assert_eq!(t.strides(), &[2, 1]);
    assert_eq!(t.get(&[2, 1]).unwrap(), 6.0);
}

/// Dense storage on its own.
#[test]
fn test_dense_roundtrip() {
    let d: Dense<f64> = Dense::from_vec(vec![0.5, 1.5]);
    let json = serde_json::to_string(&d).unwrap();
    let back: Dense<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_slice(), d.as_slice());
}
