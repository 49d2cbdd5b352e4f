//! Serialization and deserialization -related logic.

mod borsh_codec;
mod json_codec;

pub use borsh_codec::BorshCodec;
pub use json_codec::JsonCodec;

/// A trait for types that can serialize and deserialize values for storage
/// access.
pub trait StateValueCodec<V> {
    /// Error type that can arise during deserialization.
    type Error: std::fmt::Debug;

    /// Serializes a value into a bytes vector.
    ///
    /// This method **must** not panic as all instances of the value type are
    /// supposed to be serializable.
    fn encode_value(&self, value: &V) -> Vec<u8>;

    /// Tries to deserialize a value from a bytes slice, and returns a
    /// [`Result`] with either the deserialized value or an error.
    fn try_decode_value(&self, bytes: &[u8]) -> Result<V, Self::Error>;

    /// Deserializes a value from a bytes slice.
    ///
    /// # Panics
    /// Panics if the call to [`StateValueCodec::try_decode_value`] fails. Use
    /// [`StateValueCodec::try_decode_value`] if you need to gracefully handle
    /// errors.
    fn decode_value_unwrap(&self, bytes: &[u8]) -> V {
        self.try_decode_value(bytes).unwrap_or_else(|err| {
            panic!(
                "Failed to decode value 0x{}, error: {:?}",
                hex::encode(bytes),
                err
            )
        })
    }
}

/// A trait for types that can serialize keys for storage
/// access.
///
/// Note that, unlike [`StateValueCodec`], this trait does not provide
/// deserialization logic as it's not needed nor supported.
pub trait StateKeyCodec<K> {
    /// Serializes a key into a bytes vector.
    ///
    /// # Determinism
    ///
    /// All implementations of this trait method **MUST** provide deterministic
    /// serialization behavior: equal (as defined by [`Eq`]) values **MUST** be
    /// serialized to the same byte sequence.
    fn encode_key(&self, key: &K) -> Vec<u8>;
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::any;
    use proptest::strategy::Strategy;

    use super::*;

    fn arb_vec_i32() -> impl Strategy<Value = Vec<i32>> {
        vec(any::<i32>(), 0..2048)
    }

    proptest::proptest! {
        #[test]
        fn test_borsh_key_and_value_encodings_agree(vec in arb_vec_i32()) {
            let codec = BorshCodec;
            assert_eq!(
                <BorshCodec as StateKeyCodec<Vec<i32>>>::encode_key(&codec, &vec),
                codec.encode_value(&vec)
            );
        }

        #[test]
        fn test_json_value_decodes_to_itself(vec in arb_vec_i32()) {
            let codec = JsonCodec;
            let encoded = codec.encode_value(&vec);
            let decoded: Vec<i32> = codec.try_decode_value(&encoded).unwrap();
            assert_eq!(decoded, vec);
        }
    }

    #[test]
    #[should_panic(expected = "Failed to decode value 0x01")]
    fn test_decode_unwrap_panics_on_garbage() {
        let _: u64 = BorshCodec.decode_value_unwrap(&[1]);
    }
}
