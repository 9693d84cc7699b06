use serde::{Deserialize, Deserializer, Serialize};

/// Opaque batch tracking id returned by `wallet_sendCalls`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallsId(pub String);

impl std::fmt::Display for CallsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a submitted batch.
///
/// Only the top-level `status` of a calls-status response is consulted. EIP-5792 numeric
/// codes map `1xx` to pending, `2xx` to success and everything else to failure. The
/// string forms used by wallet libraries and by older EIP-5792 drafts are accepted too.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallsStatus {
    Pending,
    Success,
    Failure,
}

impl CallsStatus {
    pub fn from_code(code: u16) -> Self {
        match code {
            100..=199 => Self::Pending,
            200..=299 => Self::Success,
            _ => Self::Failure,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "success" | "confirmed" => Some(Self::Success),
            "failure" | "failed" | "reverted" => Some(Self::Failure),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for CallsStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(Self::from_code(code)),
            Raw::Label(label) => Self::from_label(&label)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown calls status {label:?}"))),
        }
    }
}

/// The part of a `wallet_getCallsStatus` response this client depends on.
#[derive(Clone, Debug, Deserialize)]
pub struct CallsStatusResponse {
    pub status: CallsStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CallsStatus {
        serde_json::from_str::<CallsStatusResponse>(json).unwrap().status
    }

    #[test]
    fn numeric_codes() {
        assert_eq!(parse(r#"{"status": 100}"#), CallsStatus::Pending);
        assert_eq!(parse(r#"{"status": 200, "receipts": [{}]}"#), CallsStatus::Success);
        assert_eq!(parse(r#"{"status": 400}"#), CallsStatus::Failure);
        assert_eq!(parse(r#"{"status": 500}"#), CallsStatus::Failure);
        assert_eq!(parse(r#"{"status": 600}"#), CallsStatus::Failure);
    }

    #[test]
    fn string_labels() {
        assert_eq!(parse(r#"{"status": "pending"}"#), CallsStatus::Pending);
        assert_eq!(parse(r#"{"status": "PENDING"}"#), CallsStatus::Pending);
        assert_eq!(parse(r#"{"status": "success"}"#), CallsStatus::Success);
        assert_eq!(parse(r#"{"status": "CONFIRMED"}"#), CallsStatus::Success);
        assert_eq!(parse(r#"{"status": "failure"}"#), CallsStatus::Failure);
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(serde_json::from_str::<CallsStatusResponse>(r#"{"status": "maybe"}"#).is_err());
    }
}
