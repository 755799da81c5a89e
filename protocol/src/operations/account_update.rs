//! `account_update` (tag 6): replace an account's authorities and/or options.

use serde_json::{json, Map, Value};

use crate::serialization::binary::require;
use crate::serialization::structured::{as_object, parse, parse_optional};
use crate::serialization::{BinaryEncode, DecodingError, EncodingError};
use crate::types::{AccountOptions, AssetAmount, Authority, Extensions, ObjectId};

pub const KEY_FEE: &str = "fee";
pub const KEY_ACCOUNT: &str = "account";
pub const KEY_OWNER: &str = "owner";
pub const KEY_ACTIVE: &str = "active";
pub const KEY_NEW_OPTIONS: &str = "new_options";
pub const KEY_EXTENSIONS: &str = "extensions";

/// Binary layout: `fee ‖ account ‖ optional owner ‖ optional active ‖
/// optional new_options ‖ extensions`.
///
/// Unlike account creation, the authorities and options are genuinely
/// optional here: an absent one is left unchanged on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUpdateOperation {
    pub fee: Option<AssetAmount>,
    pub account: ObjectId,
    pub owner: Option<Authority>,
    pub active: Option<Authority>,
    pub new_options: Option<AccountOptions>,
    pub extensions: Extensions,
}

impl AccountUpdateOperation {
    pub fn new(account: ObjectId) -> Self {
        Self {
            fee: None,
            account,
            owner: None,
            active: None,
            new_options: None,
            extensions: Extensions,
        }
    }

    pub fn with_fee(mut self, fee: AssetAmount) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn with_owner(mut self, owner: Authority) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_active(mut self, active: Authority) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_new_options(mut self, options: AccountOptions) -> Self {
        self.new_options = Some(options);
        self
    }

    pub fn fields_to_structured(&self) -> Result<Value, EncodingError> {
        let fee = require(&self.fee, KEY_FEE)?;

        let mut fields = Map::new();
        fields.insert(KEY_FEE.into(), json!(fee));
        fields.insert(KEY_ACCOUNT.into(), json!(self.account));
        if let Some(owner) = &self.owner {
            fields.insert(KEY_OWNER.into(), json!(owner));
        }
        if let Some(active) = &self.active {
            fields.insert(KEY_ACTIVE.into(), json!(active));
        }
        if let Some(options) = &self.new_options {
            fields.insert(KEY_NEW_OPTIONS.into(), json!(options));
        }
        fields.insert(KEY_EXTENSIONS.into(), self.extensions.to_structured());
        Ok(Value::Object(fields))
    }

    pub fn from_structured_fields(value: &Value) -> Result<Self, DecodingError> {
        let fields = as_object(value, "account_update operation")?;
        let fee: AssetAmount = parse(fields, KEY_FEE)?;
        fee.asset_id.expect_asset(KEY_FEE)?;
        Ok(Self {
            fee: Some(fee),
            account: parse::<ObjectId>(fields, KEY_ACCOUNT)?.expect_account(KEY_ACCOUNT)?,
            owner: parse_optional(fields, KEY_OWNER)?,
            active: parse_optional(fields, KEY_ACTIVE)?,
            new_options: parse_optional(fields, KEY_NEW_OPTIONS)?,
            extensions: parse_optional(fields, KEY_EXTENSIONS)?.unwrap_or_default(),
        })
    }
}

impl BinaryEncode for AccountUpdateOperation {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        require(&self.fee, KEY_FEE)?.write_binary(buf)?;
        self.account.write_binary(buf)?;
        self.owner.write_binary(buf)?;
        self.active.write_binary(buf)?;
        self.new_options.write_binary(buf)?;
        self.extensions.write_binary(buf)
    }
}
