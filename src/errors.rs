/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    error::Error,
    fmt::Display
};

///Encoding/serialization errors
#[derive(Debug, Clone)]
pub enum SerializationError {
    ///Failure to serialize.
    ///A field longer than the 16-bit TLV length limit also ends up here.
    EncodingError,
    ///Failure to deserialize.
    ///Truncated buffers, trailing bytes, bad headers,
    ///non-canonical scalars and off-curve points are all decoding errors.
    DecodingError,

} impl Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::EncodingError => "Encoding error.",
            Self::DecodingError => "Decoding error."
        })
    }

} impl Error for SerializationError {}

///Rangeproof errors
#[derive(Debug, Clone)]
pub enum RangeProofError {
    ///The rangeproof is invalid.
    Invalid,
    ///The given rangeproof is malformed in some way,
    ///or the parameters are incorrect/inconsistent.
    Malformed,
    ///Aggregation size was too large, see `MAX_AGGREGATION_SIZE`.
    ///This is only relevant for Bulletproofs.
    TooLargeAggregationSize,
    ///A given value is not in the valid range (0 <= `x` < 2<sup>`BIT_RANGE`</sup>) .
    OutOfRange,
    ///Miscellaneous/unspecified error.
    Unspecified(String)

} impl Display for RangeProofError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::Invalid => "This rangeproof is invalid.",
            Self::Malformed => "Malformed proof or parameters.",
            Self::TooLargeAggregationSize => "Too many aggregated values.",
            Self::OutOfRange => "Value is out of range.",
            Self::Unspecified(msg) => msg,
        })
    }

} impl Error for RangeProofError {}

///Ring signature errors
#[derive(Debug, Clone)]
pub enum SignatureError {
    ///The signature is invalid.
    Invalid,
    ///The given signature is malformed in some way,
    ///or the parameters are incorrect/inconsistent.
    Malformed,
    ///Miscellaneous/unspecified error.
    Unspecified(String)

} impl Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::Invalid => "This signature is invalid.",
            Self::Malformed => "Malformed signature or parameters.",
            Self::Unspecified(msg) => msg,
        })
    }

} impl Error for SignatureError {}

///RingCT signature-assembly errors.
///
///These are only produced while *generating* a signature.
///Verification never errors: it reports a plain accept/reject instead,
///because the verified material is attacker-controlled.
#[derive(Debug, Clone)]
pub enum RctError {
    ///The given parameters are inconsistent:
    ///mismatched vector lengths, an empty mix ring,
    ///or a configuration that does not fit the requested signature mode.
    Malformed,
    ///The input and output amounts (plus fee) do not balance.
    Unbalanced,
    ///A rangeproof could not be created.
    RangeProof(RangeProofError),
    ///The signature material could not be serialized for hashing.
    Serialization(SerializationError),
    ///Miscellaneous/unspecified error.
    Unspecified(String)

} impl Display for RctError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::Malformed => "Malformed parameters.".to_string(),
            Self::Unbalanced => "Amounts do not balance.".to_string(),
            Self::RangeProof(e) => format!("Rangeproof error: {}", e),
            Self::Serialization(e) => format!("Serialization error: {}", e),
            Self::Unspecified(msg) => msg.to_string(),
        })
    }

} impl Error for RctError {}

impl From<RangeProofError> for RctError {
    fn from(e: RangeProofError) -> Self {
        return Self::RangeProof(e)
    }
}

impl From<SerializationError> for RctError {
    fn from(e: SerializationError) -> Self {
        return Self::Serialization(e)
    }
}
