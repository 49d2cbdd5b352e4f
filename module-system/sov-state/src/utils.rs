/// A [`Vec`] of bytes used to build storage keys out of a [`crate::Prefix`] and
/// an encoded key.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct AlignedVec {
    inner: Vec<u8>,
}

impl AlignedVec {
    /// Wraps the given bytes.
    pub fn new(vector: Vec<u8>) -> Self {
        Self { inner: vector }
    }

    /// Extends `self` with the contents of the other [`AlignedVec`].
    pub fn extend(&mut self, other: &Self) {
        self.inner.extend(&other.inner);
    }

    /// Consumes `self` and returns the underlying [`Vec`] of bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.inner
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no bytes, `false` otherwise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AsRef<Vec<u8>> for AlignedVec {
    fn as_ref(&self) -> &Vec<u8> {
        &self.inner
    }
}
