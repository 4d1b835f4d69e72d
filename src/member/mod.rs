//! Members of the service, and the directories that know about them
//!
//! Member records live on a remote server ([`RemoteDirectory`]). Since it is not always reachable, a copy of the
//! directory can also be kept in a [`Storage`](crate::traits::Storage) ([`LocalMembers`]), and a [`FallbackDirectory`]
//! transparently uses the latter when the former fails.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod client;
pub use client::RemoteDirectory;
pub mod local;
pub use local::LocalMembers;
mod fallback;
pub use fallback::FallbackDirectory;

#[cfg(any(test, feature = "local_members_mock_remote"))]
pub mod mock;


/// A member of the service
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_calendar_id: Option<String>,
    /// As sent by the server. Its format is not checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Member {
    pub fn new<S: ToString>(id: S) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    /// The name to display, falling back to the ID
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if name.is_empty() == false => name,
            _ => &self.id,
        }
    }

    /// Overwrite every field that is set in `other`. The ID is kept
    pub fn merge(&mut self, other: &Member) {
        fn merge_field(field: &mut Option<String>, other: &Option<String>) {
            if other.is_some() {
                *field = other.clone();
            }
        }

        merge_field(&mut self.name, &other.name);
        merge_field(&mut self.email, &other.email);
        merge_field(&mut self.phone, &other.phone);
        merge_field(&mut self.address, &other.address);
        merge_field(&mut self.google_email, &other.google_email);
        merge_field(&mut self.google_calendar_id, &other.google_calendar_id);
        merge_field(&mut self.created_at, &other.created_at);
    }
}

/// What a new member sends to register
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    pub id: String,
    pub pwd: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Signup {
    /// The member this signup creates. It has no creation date yet
    pub fn to_member(&self) -> Member {
        Member {
            id: self.id.clone(),
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: self.phone.clone(),
            address: self.address.clone(),
            ..Member::default()
        }
    }
}


/// Who is currently using the app.
///
/// This is passed explicitly to whatever needs it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub member_id: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn logged_in<S: ToString>(member_id: S) -> Self {
        Self { member_id: Some(member_id.to_string()) }
    }

    /// Members may only edit their own profile
    pub fn can_edit(&self, member: &Member) -> bool {
        self.member_id.as_deref() == Some(member.id.as_str())
    }
}


/// The server explicitly refused a request (as opposed to a network or HTTP failure)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejected {
    pub message: String,
}

impl Display for Rejected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "request rejected by the member directory: {}", self.message)
    }
}

impl Error for Rejected {}
