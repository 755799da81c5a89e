//! `account_create` (tag 5): register a new account, paid for by a
//! registrar, optionally crediting a referrer.

use serde_json::{json, Map, Value};

use crate::config::MAX_PERCENT;
use crate::serialization::binary::{require, write_short_string};
use crate::serialization::structured::{as_object, parse, parse_optional};
use crate::serialization::{varint, BinaryEncode, DecodingError, EncodingError};
use crate::types::{AccountOptions, AssetAmount, Authority, Extensions, ObjectId};

pub const KEY_FEE: &str = "fee";
pub const KEY_REGISTRAR: &str = "registrar";
pub const KEY_REFERRER: &str = "referrer";
pub const KEY_REFERRER_PERCENT: &str = "referrer_percent";
pub const KEY_NAME: &str = "name";
pub const KEY_OWNER: &str = "owner";
pub const KEY_ACTIVE: &str = "active";
pub const KEY_OPTIONS: &str = "options";
pub const KEY_EXTENSIONS: &str = "extensions";

/// Binary layout: `fee ‖ registrar ‖ referrer ‖ varint(referrer_percent) ‖
/// len8(name) ‖ name ‖ owner ‖ active ‖ options ‖ extensions`.
///
/// `fee`, `owner`, `active` and `options` may be filled in after
/// construction, but all four must be set before the operation is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreateOperation {
    pub fee: Option<AssetAmount>,
    pub registrar: ObjectId,
    pub referrer: ObjectId,
    /// Share of the fee paid to the referrer, in hundredths of a percent.
    pub referrer_percent: u16,
    pub name: String,
    pub owner: Option<Authority>,
    pub active: Option<Authority>,
    pub options: Option<AccountOptions>,
    pub extensions: Extensions,
}

impl AccountCreateOperation {
    pub fn new(registrar: ObjectId, referrer: ObjectId, name: impl Into<String>) -> Self {
        Self {
            fee: None,
            registrar,
            referrer,
            referrer_percent: 0,
            name: name.into(),
            owner: None,
            active: None,
            options: None,
            extensions: Extensions,
        }
    }

    pub fn with_fee(mut self, fee: AssetAmount) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn with_referrer_percent(mut self, percent: u16) -> Self {
        self.referrer_percent = percent;
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

    pub fn with_options(mut self, options: AccountOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn fields_to_structured(&self) -> Result<Value, EncodingError> {
        let fee = require(&self.fee, KEY_FEE)?;
        let owner = require(&self.owner, KEY_OWNER)?;
        let active = require(&self.active, KEY_ACTIVE)?;
        let options = require(&self.options, KEY_OPTIONS)?;

        let mut fields = Map::new();
        fields.insert(KEY_FEE.into(), json!(fee));
        fields.insert(KEY_REGISTRAR.into(), json!(self.registrar));
        fields.insert(KEY_REFERRER.into(), json!(self.referrer));
        fields.insert(KEY_REFERRER_PERCENT.into(), json!(self.referrer_percent));
        fields.insert(KEY_NAME.into(), json!(self.name));
        fields.insert(KEY_OWNER.into(), json!(owner));
        fields.insert(KEY_ACTIVE.into(), json!(active));
        fields.insert(KEY_OPTIONS.into(), json!(options));
        fields.insert(KEY_EXTENSIONS.into(), self.extensions.to_structured());
        Ok(Value::Object(fields))
    }

    pub fn from_structured_fields(value: &Value) -> Result<Self, DecodingError> {
        let fields = as_object(value, "account_create operation")?;
        let fee: AssetAmount = parse(fields, KEY_FEE)?;
        fee.asset_id.expect_asset(KEY_FEE)?;
        let registrar = parse::<ObjectId>(fields, KEY_REGISTRAR)?.expect_account(KEY_REGISTRAR)?;
        let referrer = parse::<ObjectId>(fields, KEY_REFERRER)?.expect_account(KEY_REFERRER)?;
        let referrer_percent: u16 = parse(fields, KEY_REFERRER_PERCENT)?;
        if referrer_percent > MAX_PERCENT {
            return Err(DecodingError::invalid(
                KEY_REFERRER_PERCENT,
                format!("{referrer_percent} exceeds {MAX_PERCENT}"),
            ));
        }
        Ok(Self {
            fee: Some(fee),
            registrar,
            referrer,
            referrer_percent,
            name: parse(fields, KEY_NAME)?,
            owner: Some(parse(fields, KEY_OWNER)?),
            active: Some(parse(fields, KEY_ACTIVE)?),
            options: Some(parse(fields, KEY_OPTIONS)?),
            extensions: parse_optional(fields, KEY_EXTENSIONS)?.unwrap_or_default(),
        })
    }
}

impl BinaryEncode for AccountCreateOperation {
    fn write_binary(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        let fee = require(&self.fee, KEY_FEE)?;
        let owner = require(&self.owner, KEY_OWNER)?;
        let active = require(&self.active, KEY_ACTIVE)?;
        let options = require(&self.options, KEY_OPTIONS)?;

        fee.write_binary(buf)?;
        self.registrar.write_binary(buf)?;
        self.referrer.write_binary(buf)?;
        varint::write(u64::from(self.referrer_percent), buf);
        write_short_string(KEY_NAME, &self.name, buf)?;
        owner.write_binary(buf)?;
        active.write_binary(buf)?;
        options.write_binary(buf)?;
        self.extensions.write_binary(buf)
    }
}
