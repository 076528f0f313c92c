//! Member model and request shapes.

use serde::{Deserialize, Serialize};

/// Membership categories. The lowercase values predate the category redesign
/// and are still present in old rows, so both spellings stay accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberType {
    Respected,
    LifetimeLegacy,
    Helper,
    Founding,
    Lifetime,
    SeniorCitizen,
    Donation,
}

impl MemberType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "respected" => Some(MemberType::Respected),
            "lifetime" => Some(MemberType::LifetimeLegacy),
            "helper" => Some(MemberType::Helper),
            "Founding" => Some(MemberType::Founding),
            "Lifetime" => Some(MemberType::Lifetime),
            "Senior-Citizen" => Some(MemberType::SeniorCitizen),
            "donation" => Some(MemberType::Donation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberType::Respected => "respected",
            MemberType::LifetimeLegacy => "lifetime",
            MemberType::Helper => "helper",
            MemberType::Founding => "Founding",
            MemberType::Lifetime => "Lifetime",
            MemberType::SeniorCitizen => "Senior-Citizen",
            MemberType::Donation => "donation",
        }
    }
}

/// Free-form member detail subfields, stored as a JSON text column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permanent_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grandfather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grandmother: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_amount: Option<String>,
}

/// A community member as exposed to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub member_type: String,
    pub name: String,
    pub img: String,
    pub rank: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<MemberDetails>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[serde(rename = "type")]
    pub member_type: String,
    pub name: String,
    pub img: String,
    #[serde(default)]
    pub rank: i64,
    #[serde(default)]
    pub details: Option<MemberDetails>,
}

/// Request body for updating a member. The identity field is never part of
/// this shape, so a client-supplied `_id` is dropped before the write.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[serde(default, rename = "type")]
    pub member_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub details: Option<MemberDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_round_trip() {
        for s in [
            "respected",
            "lifetime",
            "helper",
            "Founding",
            "Lifetime",
            "Senior-Citizen",
            "donation",
        ] {
            let ty = MemberType::from_str(s).expect("valid type");
            assert_eq!(ty.as_str(), s);
        }
    }

    #[test]
    fn test_member_type_rejects_unknown() {
        assert!(MemberType::from_str("founding").is_none());
        assert!(MemberType::from_str("").is_none());
        assert!(MemberType::from_str("RESPECTED").is_none());
    }

    #[test]
    fn test_member_serializes_external_names() {
        let member = Member {
            id: "abc".to_string(),
            member_type: "Founding".to_string(),
            name: "Test".to_string(),
            img: "/members/1.jpg".to_string(),
            rank: 3,
            details: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["type"], "Founding");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("id").is_none());
    }
}
