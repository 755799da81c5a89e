//! Structured (JSON) form of a transaction, as accepted by a node's
//! `broadcast_transaction` API.
//!
//! Decoding is lenient in the way wallets expect: operations with an
//! unknown tag or malformed fields are dropped, and a malformed signature
//! list is treated as empty. A transaction carries a single signer, so only
//! the first well-formed signature is kept. Nothing is dropped silently;
//! every skip is counted in the returned [`DecodeReport`] and logged at
//! `warn`.

use serde_json::{json, Map, Value};
use tracing::warn;

use super::builder::Transaction;
use super::error::TransactionError;
use super::signing::SigningState;
use super::types::BlockData;
use crate::crypto::{EcdsaSigner, Signature, SigningService};
use crate::operations::{decode_operation, Operation};
use crate::serialization::structured::{as_array, as_object, field, parse};
use crate::serialization::{DecodingError, EncodingError};
use crate::types::Extensions;

pub const KEY_REF_BLOCK_NUM: &str = "ref_block_num";
pub const KEY_REF_BLOCK_PREFIX: &str = "ref_block_prefix";
pub const KEY_EXPIRATION: &str = "expiration";
pub const KEY_OPERATIONS: &str = "operations";
pub const KEY_SIGNATURES: &str = "signatures";
pub const KEY_EXTENSIONS: &str = "extensions";

/// What a lenient decode had to leave out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub skipped_operations: usize,
    pub malformed_signatures: usize,
    /// Well-formed signatures beyond the first.
    pub dropped_signatures: usize,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_operations == 0
            && self.malformed_signatures == 0
            && self.dropped_signatures == 0
    }
}

impl Transaction {
    /// The structured form with an empty `signatures` list.
    pub fn to_structured_no_signature(&self) -> Result<Value, EncodingError> {
        let operations = self
            .operations
            .iter()
            .map(Operation::to_structured)
            .collect::<Result<Vec<_>, _>>()?;

        let mut fields = Map::new();
        fields.insert(KEY_REF_BLOCK_NUM.into(), json!(self.block_data.ref_block_num));
        fields.insert(
            KEY_REF_BLOCK_PREFIX.into(),
            json!(self.block_data.ref_block_prefix),
        );
        fields.insert(KEY_EXPIRATION.into(), json!(self.block_data.expiration_text()));
        fields.insert(KEY_OPERATIONS.into(), Value::Array(operations));
        fields.insert(KEY_SIGNATURES.into(), json!([]));
        fields.insert(KEY_EXTENSIONS.into(), Extensions.to_structured());
        Ok(Value::Object(fields))
    }

    /// The signed structured form, signing with [`EcdsaSigner`] if needed.
    pub fn to_structured(&mut self) -> Result<Value, TransactionError> {
        self.to_structured_with(&EcdsaSigner::new())
    }

    /// The signed structured form. Signing runs first, since it may move the
    /// expiration that ends up in the output.
    pub fn to_structured_with<S>(&mut self, service: &S) -> Result<Value, TransactionError>
    where
        S: SigningService + ?Sized,
    {
        let signature = self.sign_with(service)?;
        let mut value = self.to_structured_no_signature()?;
        value[KEY_SIGNATURES] = json!([signature.to_hex()]);
        Ok(value)
    }

    pub fn to_json_string(&mut self) -> Result<String, TransactionError> {
        let value = self.to_structured()?;
        Ok(value.to_string())
    }

    /// Rebuilds a transaction from its structured form.
    ///
    /// The header fields are required. A well-formed signature puts the
    /// result in [`SigningState::Signed`]; chain id and key are never part
    /// of the structured form and must be set again before re-signing.
    pub fn from_structured(value: &Value) -> Result<(Transaction, DecodeReport), DecodingError> {
        let fields = as_object(value, "transaction")?;
        let mut report = DecodeReport::default();

        let block_data = BlockData::new(
            parse(fields, KEY_REF_BLOCK_NUM)?,
            parse(fields, KEY_REF_BLOCK_PREFIX)?,
            parse_expiration(field(fields, KEY_EXPIRATION)?)?,
        );

        let mut operations = Vec::new();
        if let Some(entries) = fields.get(KEY_OPERATIONS) {
            for (index, entry) in as_array(entries, KEY_OPERATIONS)?.iter().enumerate() {
                match decode_operation(entry) {
                    Ok(Some(op)) => operations.push(op),
                    Ok(None) => {
                        warn!(index, tag = %entry[0], "skipping operation with unknown tag");
                        report.skipped_operations += 1;
                    }
                    Err(e) => {
                        warn!(index, error = %e, "skipping malformed operation");
                        report.skipped_operations += 1;
                    }
                }
            }
        }

        let signature = fields
            .get(KEY_SIGNATURES)
            .and_then(|sigs| parse_signatures(sigs, &mut report));

        let mut tx = Transaction::new(block_data, operations);
        if let Some(signature) = signature {
            tx.state = SigningState::Signed(signature);
        }
        Ok((tx, report))
    }
}

/// Accepts the text form, or raw epoch seconds.
fn parse_expiration(value: &Value) -> Result<u32, DecodingError> {
    if let Some(secs) = value.as_u64() {
        return u32::try_from(secs)
            .map_err(|_| DecodingError::invalid(KEY_EXPIRATION, "out of range"));
    }
    value
        .as_str()
        .and_then(BlockData::parse_expiration)
        .ok_or_else(|| DecodingError::invalid(KEY_EXPIRATION, "expected YYYY-MM-DDTHH:MM:SS"))
}

/// Keeps the first well-formed signature. Accepts a list of hex strings or
/// a single hex string.
fn parse_signatures(value: &Value, report: &mut DecodeReport) -> Option<Signature> {
    let entries: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    };

    let mut found = None;
    for entry in entries {
        match entry.as_str().map(Signature::from_hex) {
            Some(Ok(signature)) if !signature.as_bytes().is_empty() => {
                if found.is_none() {
                    found = Some(signature);
                } else {
                    warn!(entry = %entry, "dropping additional signature");
                    report.dropped_signatures += 1;
                }
            }
            _ => {
                warn!(entry = %entry, "ignoring malformed signature");
                report.malformed_signatures += 1;
            }
        }
    }
    found
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAINNET_CHAIN_ID;
    use crate::crypto::{PrivateKey, SignatureError};
    use crate::operations::{AccountCreateOperation, TransferOperation};
    use crate::transaction::TransactionBuilder;
    use crate::types::{AccountOptions, AssetAmount, Authority, ObjectId};
    use pretty_assertions::assert_eq;

    struct AcceptAll;

    impl SigningService for AcceptAll {
        fn sign(&self, _payload: &[u8], _key: &PrivateKey) -> Result<Signature, SignatureError> {
            Ok(Signature::from_bytes(vec![0xab; 65]))
        }

        fn is_acceptable(&self, _signature: &Signature) -> bool {
            true
        }
    }

    fn transfer() -> TransferOperation {
        TransferOperation::new(
            ObjectId::account(17),
            ObjectId::account(300),
            AssetAmount::new(100_000, ObjectId::asset(1)),
        )
        .with_fee(AssetAmount::new(1_000, ObjectId::asset(1)))
    }

    fn account_create() -> AccountCreateOperation {
        let key = PrivateKey::from_bytes(&[5u8; 32]).unwrap().public_key();
        AccountCreateOperation::new(ObjectId::account(17), ObjectId::account(17), "heidi")
            .with_fee(AssetAmount::new(5_000, ObjectId::asset(1)))
            .with_owner(Authority::single_key(key))
            .with_active(Authority::single_key(key))
            .with_options(AccountOptions::new(key, ObjectId::account(5)))
    }

    fn sample_tx() -> Transaction {
        TransactionBuilder::new()
            .block_data(BlockData::new(34_521, 3_162_120_021, 1_600_000_000))
            .operation(transfer())
            .operation(account_create())
            .chain_id(MAINNET_CHAIN_ID.parse().unwrap())
            .private_key(PrivateKey::from_bytes(&[6u8; 32]).unwrap())
            .build()
    }

    #[test]
    fn unsigned_layout() {
        let value = sample_tx().to_structured_no_signature().unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            [
                "ref_block_num",
                "ref_block_prefix",
                "expiration",
                "operations",
                "signatures",
                "extensions"
            ]
        );
        assert_eq!(value["ref_block_num"], json!(34_521));
        assert_eq!(value["ref_block_prefix"], json!(3_162_120_021u32));
        assert_eq!(value["expiration"], json!("2020-09-13T12:26:40"));
        assert_eq!(value["operations"][0][0], json!(0));
        assert_eq!(value["operations"][1][0], json!(5));
        assert_eq!(value["signatures"], json!([]));
        assert_eq!(value["extensions"], json!([]));
    }

    #[test]
    fn signed_form_carries_signature_hex() {
        let mut tx = sample_tx();
        let value = tx.to_structured_with(&AcceptAll).unwrap();
        assert_eq!(value["signatures"], json!([hex::encode([0xab; 65])]));
        assert!(tx.is_signed());
    }

    #[test]
    fn signed_form_with_ecdsa() {
        let mut tx = sample_tx();
        let value = tx.to_structured().unwrap();
        let sig = value["signatures"][0].as_str().unwrap();
        assert_eq!(sig.len(), 130);
        assert_eq!(Some(sig.to_string()), tx.signature_hex());
        assert_eq!(tx.to_json_string().unwrap(), value.to_string());
    }

    #[test]
    fn round_trip() {
        let mut tx = sample_tx();
        let value = tx.to_structured_with(&AcceptAll).unwrap();
        let (decoded, report) = Transaction::from_structured(&value).unwrap();
        assert!(report.is_clean());
        assert_eq!(decoded.operations(), tx.operations());
        assert_eq!(decoded.block_data(), tx.block_data());
        assert_eq!(decoded.signature(), tx.signature());
    }

    #[test]
    fn unknown_tag_is_skipped_and_reported() {
        let mut value = sample_tx().to_structured_no_signature().unwrap();
        value["operations"]
            .as_array_mut()
            .unwrap()
            .push(json!([99, { "fee": { "amount": 1, "asset_id": "1.3.1" } }]));

        let (decoded, report) = Transaction::from_structured(&value).unwrap();
        assert_eq!(decoded.operations().len(), 2);
        assert_eq!(report.skipped_operations, 1);
        assert!(!decoded.is_signed());
    }

    #[test]
    fn malformed_operation_is_skipped() {
        let mut value = sample_tx().to_structured_no_signature().unwrap();
        value["operations"][0][1]
            .as_object_mut()
            .unwrap()
            .remove("from");

        let (decoded, report) = Transaction::from_structured(&value).unwrap();
        assert_eq!(decoded.operations().len(), 1);
        assert_eq!(report.skipped_operations, 1);
    }

    #[test]
    fn malformed_signatures_are_ignored() {
        let mut value = sample_tx().to_structured_no_signature().unwrap();
        value["signatures"] = json!(["zz-not-hex", 42]);
        let (decoded, report) = Transaction::from_structured(&value).unwrap();
        assert!(!decoded.is_signed());
        assert_eq!(report.malformed_signatures, 2);

        value["signatures"] = json!("abcd");
        let (decoded, report) = Transaction::from_structured(&value).unwrap();
        assert_eq!(decoded.signature_hex().as_deref(), Some("abcd"));
        assert!(report.is_clean());

        value.as_object_mut().unwrap().remove("signatures");
        let (decoded, report) = Transaction::from_structured(&value).unwrap();
        assert!(!decoded.is_signed());
        assert!(report.is_clean());
    }

    #[test]
    fn additional_signatures_are_reported() {
        let first = hex::encode([0x1f; 65]);
        let second = hex::encode([0x20; 65]);
        let mut value = sample_tx().to_structured_no_signature().unwrap();
        value["signatures"] = json!([first, second, "zz"]);

        let (decoded, report) = Transaction::from_structured(&value).unwrap();
        assert_eq!(decoded.signature_hex(), Some(first));
        assert_eq!(report.dropped_signatures, 1);
        assert_eq!(report.malformed_signatures, 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn header_fields_are_required() {
        let mut value = sample_tx().to_structured_no_signature().unwrap();
        value.as_object_mut().unwrap().remove("ref_block_prefix");
        assert_eq!(
            Transaction::from_structured(&value).map(|_| ()),
            Err(DecodingError::MissingKey("ref_block_prefix".into()))
        );

        let mut value = sample_tx().to_structured_no_signature().unwrap();
        value["expiration"] = json!("yesterday");
        assert!(matches!(
            Transaction::from_structured(&value),
            Err(DecodingError::InvalidField { key, .. }) if key == "expiration"
        ));
    }

    #[test]
    fn expiration_accepts_epoch_seconds() {
        let mut value = sample_tx().to_structured_no_signature().unwrap();
        value["expiration"] = json!(1_600_000_000u32);
        let (decoded, _) = Transaction::from_structured(&value).unwrap();
        assert_eq!(decoded.block_data().expiration, 1_600_000_000);
    }
}
