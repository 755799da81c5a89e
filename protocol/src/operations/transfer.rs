//! `transfer` (tag 0): move an amount of an asset between two accounts.

use serde_json::{json, Map, Value};

use crate::serialization::binary::require;
use crate::serialization::structured::{as_object, parse, parse_optional};
use crate::serialization::{BinaryEncode, DecodingError, EncodingError};
use crate::types::{AssetAmount, Extensions, Memo, ObjectId};

pub const KEY_FEE: &str = "fee";
pub const KEY_FROM: &str = "from";
pub const KEY_TO: &str = "to";
pub const KEY_AMOUNT: &str = "amount";
pub const KEY_MEMO: &str = "memo";
pub const KEY_EXTENSIONS: &str = "extensions";

/// Binary layout: `fee ‖ from ‖ to ‖ amount ‖ optional memo ‖ extensions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOperation {
    /// Unset until the caller (usually through `Transaction::set_fees`)
    /// fills in the fee quoted by the chain.
    pub fee: Option<AssetAmount>,
    pub from: ObjectId,
    pub to: ObjectId,
    pub amount: AssetAmount,
    pub memo: Option<Memo>,
    pub extensions: Extensions,
}

impl TransferOperation {
    pub fn new(from: ObjectId, to: ObjectId, amount: AssetAmount) -> Self {
        Self {
            fee: None,
            from,
            to,
            amount,
            memo: None,
            extensions: Extensions,
        }
    }

    pub fn with_fee(mut self, fee: AssetAmount) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn with_memo(mut self, memo: Memo) -> Self {
        self.memo = Some(memo);
        self
    }

    /// The fields object of the structured form. The memo key is omitted
    /// when there is no memo.
    pub fn fields_to_structured(&self) -> Result<Value, EncodingError> {
        let fee = require(&self.fee, KEY_FEE)?;

        let mut fields = Map::new();
        fields.insert(KEY_FEE.into(), json!(fee));
        fields.insert(KEY_FROM.into(), json!(self.from));
        fields.insert(KEY_TO.into(), json!(self.to));
        fields.insert(KEY_AMOUNT.into(), json!(self.amount));
        if let Some(memo) = &self.memo {
            fields.insert(KEY_MEMO.into(), json!(memo));
        }
        fields.insert(KEY_EXTENSIONS.into(), self.extensions.to_structured());
        Ok(Value::Object(fields))
    }

    pub fn from_structured_fields(value: &Value) -> Result<Self, DecodingError> {
        let fields = as_object(value, "transfer operation")?;
        let fee: AssetAmount = parse(fields, KEY_FEE)?;
        fee.asset_id.expect_asset(KEY_FEE)?;
        let from = parse::<ObjectId>(fields, KEY_FROM)?.expect_account(KEY_FROM)?;
        let to = parse::<ObjectId>(fields, KEY_TO)?.expect_account(KEY_TO)?;
        let amount: AssetAmount = parse(fields, KEY_AMOUNT)?;
        amount.asset_id.expect_asset(KEY_AMOUNT)?;
        Ok(Self {
            fee: Some(fee),
            from,
            to,
            amount,
            memo: parse_optional(fields, KEY_MEMO)?,
            extensions: parse_optional(fields, KEY_EXTENSIONS)?.unwrap_or_default(),
        })
    }
}

impl BinaryEncode for TransferOperation {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        require(&self.fee, KEY_FEE)?.write_binary(buf)?;
        self.from.write_binary(buf)?;
        self.to.write_binary(buf)?;
        self.amount.write_binary(buf)?;
        self.memo.write_binary(buf)?;
        self.extensions.write_binary(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PrivateKey;
    use pretty_assertions::assert_eq;

    fn transfer() -> TransferOperation {
        TransferOperation::new(
            ObjectId::account(17),
            ObjectId::account(300),
            AssetAmount::new(100_000, ObjectId::asset(1)),
        )
        .with_fee(AssetAmount::new(1_000, ObjectId::asset(1)))
    }

    #[test]
    fn binary_layout() {
        let bytes = transfer().to_binary().unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&1_000u64.to_le_bytes());
        expected.push(1);
        expected.push(17);
        expected.extend_from_slice(&[0xac, 0x02]);
        expected.extend_from_slice(&100_000u64.to_le_bytes());
        expected.push(1);
        expected.push(0); // no memo
        expected.push(0); // extensions
        assert_eq!(bytes, expected);
    }

    #[test]
    fn structured_layout() {
        let value = transfer().fields_to_structured().unwrap();
        assert_eq!(
            value,
            json!({
                "fee": { "amount": 1000, "asset_id": "1.3.1" },
                "from": "1.2.17",
                "to": "1.2.300",
                "amount": { "amount": 100000, "asset_id": "1.3.1" },
                "extensions": []
            })
        );
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["fee", "from", "to", "amount", "extensions"]);
    }

    #[test]
    fn missing_fee_fails_both_renderings() {
        let mut op = transfer();
        op.fee = None;
        assert_eq!(op.to_binary(), Err(EncodingError::MissingField("fee")));
        assert_eq!(
            op.fields_to_structured(),
            Err(EncodingError::MissingField("fee"))
        );
    }

    #[test]
    fn memo_round_trip() {
        let memo = Memo {
            from: PrivateKey::from_bytes(&[3u8; 32]).unwrap().public_key(),
            to: PrivateKey::from_bytes(&[4u8; 32]).unwrap().public_key(),
            nonce: 99,
            message: b"ciphertext".to_vec(),
        };
        let op = transfer().with_memo(memo);
        let decoded =
            TransferOperation::from_structured_fields(&op.fields_to_structured().unwrap()).unwrap();
        assert_eq!(decoded, op);

        let bytes = op.to_binary().unwrap();
        assert_eq!(bytes[bytes.len() - 1], 0, "extensions close the layout");
    }

    #[test]
    fn missing_key_is_reported() {
        let mut value = transfer().fields_to_structured().unwrap();
        value.as_object_mut().unwrap().remove("to");
        assert_eq!(
            TransferOperation::from_structured_fields(&value),
            Err(DecodingError::MissingKey("to".into()))
        );
    }

    #[test]
    fn non_account_recipient_is_rejected() {
        let mut value = transfer().fields_to_structured().unwrap();
        value["to"] = json!("1.3.300");
        assert!(matches!(
            TransferOperation::from_structured_fields(&value),
            Err(DecodingError::InvalidField { key, .. }) if key == "to"
        ));
    }

    #[test]
    fn fee_in_non_asset_is_rejected() {
        let mut value = transfer().fields_to_structured().unwrap();
        value["fee"]["asset_id"] = json!("1.2.1");
        assert!(matches!(
            TransferOperation::from_structured_fields(&value),
            Err(DecodingError::InvalidField { key, .. }) if key == "fee"
        ));
    }

    #[test]
    fn malformed_amount_is_reported() {
        let mut value = transfer().fields_to_structured().unwrap();
        value["amount"]["amount"] = json!("not a number");
        assert!(matches!(
            TransferOperation::from_structured_fields(&value),
            Err(DecodingError::InvalidField { key, .. }) if key == "amount"
        ));
    }
}
