//! Call-enter notifications and their structural placement.

use super::primitives::{decimal, hex_bytes, Address};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of call frame opened by the execution engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Call,
    CallCode,
    DelegateCall,
    StaticCall,
    Create,
    Create2,
    SelfDestruct,
}

impl CallType {
    /// Lowercase opcode-style label used in the function trace
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::CallCode => "callcode",
            Self::DelegateCall => "delegatecall",
            Self::StaticCall => "staticcall",
            Self::Create => "create",
            Self::Create2 => "create2",
            Self::SelfDestruct => "selfdestruct",
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" => Ok(Self::Call),
            "callcode" => Ok(Self::CallCode),
            "delegatecall" => Ok(Self::DelegateCall),
            "staticcall" => Ok(Self::StaticCall),
            "create" => Ok(Self::Create),
            "create2" => Ok(Self::Create2),
            "selfdestruct" | "suicide" => Ok(Self::SelfDestruct),
            other => Err(format!("unknown call type '{}'", other)),
        }
    }
}

/// One call-enter notification
///
/// `index` is the transaction-global call counter maintained by the engine.
/// `value` is wei, carried as a decimal string in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFrame {
    pub index: u64,
    pub call_type: CallType,
    pub depth: usize,
    pub from: Address,
    pub to: Address,
    #[serde(default, with = "decimal")]
    pub value: u128,
    #[serde(default)]
    pub gas: u64,
    #[serde(default, with = "hex_bytes")]
    pub input: Vec<u8>,
    #[serde(default, with = "hex_bytes")]
    pub output: Vec<u8>,
}

impl CallFrame {
    /// Minimal frame, mostly for tests and synthetic streams
    pub fn new(index: u64, call_type: CallType, depth: usize, from: Address, to: Address) -> Self {
        Self {
            index,
            call_type,
            depth,
            from,
            to,
            value: 0,
            gas: 0,
            input: Vec::new(),
            output: Vec::new(),
        }
    }
}

/// A call frame after it has been placed in the call tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub frame: CallFrame,

    /// Parent links for depths 1..=depth (site index of the open frame one level up)
    pub call_stack: Vec<u32>,

    /// Site indices of the open frame chain for depths 1..=depth, ending with this frame
    pub trace_path: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_type_parsing() {
        assert_eq!("CALL".parse::<CallType>().unwrap(), CallType::Call);
        assert_eq!(
            "delegatecall".parse::<CallType>().unwrap(),
            CallType::DelegateCall
        );
        assert_eq!("suicide".parse::<CallType>().unwrap(), CallType::SelfDestruct);
        assert!("jump".parse::<CallType>().is_err());
    }

    #[test]
    fn test_frame_json_defaults() {
        let frame: CallFrame = serde_json::from_str(
            r#"{
                "index": 3,
                "call_type": "staticcall",
                "depth": 2,
                "from": "0x1111111111111111111111111111111111111111",
                "to": "0x2222222222222222222222222222222222222222",
                "input": "0xa9059cbb"
            }"#,
        )
        .unwrap();

        assert_eq!(frame.call_type, CallType::StaticCall);
        assert_eq!(frame.value, 0);
        assert_eq!(frame.input, vec![0xa9, 0x05, 0x9c, 0xbb]);
        assert!(frame.output.is_empty());
    }

    #[test]
    fn test_frame_value_must_be_decimal() {
        let json = |value: &str| {
            format!(
                r#"{{"index": 0, "call_type": "call", "depth": 0,
                    "from": "0x1111111111111111111111111111111111111111",
                    "to": "0x2222222222222222222222222222222222222222",
                    "value": {}}}"#,
                value
            )
        };

        let frame: CallFrame = serde_json::from_str(&json(r#""1000""#)).unwrap();
        assert_eq!(frame.value, 1000);
        let frame: CallFrame = serde_json::from_str(&json("7")).unwrap();
        assert_eq!(frame.value, 7);

        assert!(serde_json::from_str::<CallFrame>(&json(r#""1,000""#)).is_err());
        assert!(serde_json::from_str::<CallFrame>(&json(r#""0x10""#)).is_err());
        assert!(serde_json::from_str::<CallFrame>(&json("-1")).is_err());
    }
}
