//! Configuration service wire envelope.
//!
//! Every endpoint answers `{ "code": int, "msg": string, "data": ... }`.
//! `code == 0` is success; any other value is a failure described by `msg`.

use crate::error::{Error, Result};
use crate::identity::Identity;
use serde::{Deserialize, Serialize};

/// Status code for a successful call.
pub const CODE_OK: i32 = 0;

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response<T> {
    pub code: i32,
    #[serde(default)]
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Response<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_OK,
            msg: "success".into(),
            data: Some(data),
        }
    }

    pub fn err(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// Map the envelope onto `Result`, requiring a payload on success.
    pub fn into_result(self) -> Result<T> {
        if !self.is_ok() {
            return Err(Error::Service {
                code: self.code,
                msg: self.msg,
            });
        }
        self.data.ok_or_else(|| Error::Service {
            code: self.code,
            msg: "response carried no data".into(),
        })
    }
}

impl Response<()> {
    /// Map a data-less envelope onto `Result`.
    pub fn into_status(self) -> Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(Error::Service {
                code: self.code,
                msg: self.msg,
            })
        }
    }
}

/// Body of `getUsbIdentity`.
pub type UsbIdentityRsp = Response<Identity>;

/// Body of `setUsbIdentity`.
pub type SetUsbIdentityRsp = Response<()>;

/// Request of `setUsbIdentity`.
pub type SetUsbIdentityReq = Identity;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_get_success() {
        let raw = r#"{"code":0,"msg":"success","data":{"vid":"0x046d","pid":"0xc31c","manufacturer":"Logitech","product":"Keyboard K120"}}"#;
        let rsp: UsbIdentityRsp = serde_json::from_str(raw).unwrap();
        let identity = rsp.into_result().unwrap();
        assert_eq!(identity.manufacturer, "Logitech");
    }

    #[test]
    fn decode_set_failure() {
        let raw = r#"{"code":1,"msg":"device busy"}"#;
        let rsp: SetUsbIdentityRsp = serde_json::from_str(raw).unwrap();
        match rsp.into_status() {
            Err(Error::Service { code, msg }) => {
                assert_eq!(code, 1);
                assert_eq!(msg, "device busy");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn decode_set_success_without_data() {
        let raw = r#"{"code":0,"msg":"success","data":null}"#;
        let rsp: SetUsbIdentityRsp = serde_json::from_str(raw).unwrap();
        assert!(rsp.into_status().is_ok());
    }

    #[test]
    fn missing_msg_defaults_to_empty() {
        let rsp: SetUsbIdentityRsp = serde_json::from_str(r#"{"code":-2}"#).unwrap();
        let err = rsp.into_status().unwrap_err();
        assert_eq!(err.service_message(), None);
    }

    #[test]
    fn success_without_data_is_an_error() {
        let rsp: UsbIdentityRsp = serde_json::from_str(r#"{"code":0,"msg":""}"#).unwrap();
        assert!(rsp.into_result().is_err());
    }
}
