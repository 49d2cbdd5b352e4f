use core::str::FromStr;

use bech32::{FromBase32, ToBase32};

use crate::{Address, ADDRESS_LENGTH};

const HRP: &str = "sov";

fn vec_to_bech32m(vec: &[u8], hrp: &str) -> Result<String, bech32::Error> {
    let data = vec.to_base32();
    bech32::encode(hrp, data, bech32::Variant::Bech32m)
}

fn bech32m_to_decoded_vec(bech32_addr: &str) -> Result<(String, Vec<u8>), bech32::Error> {
    let (hrp, data, _) = bech32::decode(bech32_addr)?;
    let vec = Vec::<u8>::from_base32(&data)?;
    Ok((hrp, vec))
}

/// The bech32m text form of an [`Address`].
#[derive(
    serde::Serialize,
    serde::Deserialize,
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Debug,
    PartialEq,
    Clone,
    Eq,
    derive_more::Display,
    derive_more::Into,
)]
#[serde(try_from = "String", into = "String")]
#[display(fmt = "{}", "value")]
pub struct AddressBech32 {
    value: String,
}

impl AddressBech32 {
    pub(crate) fn to_byte_array(&self) -> Result<[u8; ADDRESS_LENGTH], Bech32ParseError> {
        let (_, data) = bech32m_to_decoded_vec(&self.value)?;

        if data.len() != ADDRESS_LENGTH {
            return Err(Bech32ParseError::WrongLength(data.len()));
        }

        let mut addr_bytes = [0u8; ADDRESS_LENGTH];
        addr_bytes.copy_from_slice(&data);

        Ok(addr_bytes)
    }
}

impl From<&Address> for AddressBech32 {
    fn from(addr: &Address) -> Self {
        // The payload is always 32 bytes under a valid hrp, encoding can't fail.
        let value = vec_to_bech32m(addr.as_ref(), HRP)
            .unwrap_or_else(|e| unreachable!("bech32m encoding of an address failed: {e}"));
        AddressBech32 { value }
    }
}

impl From<Address> for AddressBech32 {
    fn from(addr: Address) -> Self {
        AddressBech32::from(&addr)
    }
}

/// Errors raised while parsing a bech32m address.
#[derive(Debug, thiserror::Error)]
pub enum Bech32ParseError {
    /// The string is not valid bech32.
    #[error("Bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
    /// The human readable part is not `sov`.
    #[error("Wrong HRP: {0}")]
    WrongHRP(String),
    /// The payload does not decode to 32 bytes.
    #[error("Invalid length {0}, should be 32")]
    WrongLength(usize),
}

impl TryFrom<String> for AddressBech32 {
    type Error = Bech32ParseError;

    fn try_from(addr: String) -> Result<Self, Bech32ParseError> {
        AddressBech32::from_str(&addr)
    }
}

impl FromStr for AddressBech32 {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Bech32ParseError> {
        let (hrp, data) = bech32m_to_decoded_vec(s)?;

        if HRP != hrp {
            return Err(Bech32ParseError::WrongHRP(hrp));
        }
        if data.len() != ADDRESS_LENGTH {
            return Err(Bech32ParseError::WrongLength(data.len()));
        }

        Ok(AddressBech32 {
            value: s.to_string(),
        })
    }
}
