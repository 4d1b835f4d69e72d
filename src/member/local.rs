//! A member directory persisted in a local [`Storage`]

use std::error::Error;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::member::{Member, Signup};
use crate::traits::{MemberSource, Storage};

const COLLECTION: &str = "members";

/// A member, as it is stored locally.
///
/// The password never leaves this module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct StoredMember {
    #[serde(flatten)]
    member: Member,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pwd: Option<String>,
}


/// Members stored as a single JSON array (under `<prefix>_members`) of a [`Storage`]
#[derive(Debug)]
pub struct LocalMembers<S: Storage> {
    storage: S,
}

impl<S: Storage> LocalMembers<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Every stored member, in storage order
    pub fn members(&self) -> Vec<Member> {
        self.load()
            .into_iter()
            .map(|stored| stored.member)
            .collect()
    }

    fn load(&self) -> Vec<StoredMember> {
        let key = crate::config::storage_key(COLLECTION);
        let content = match self.storage.get_item(&key) {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Unable to read {}: {}", key, err);
                return Vec::new();
            },
        };

        match serde_json::from_str(&content) {
            Ok(members) => members,
            Err(err) => {
                log::warn!("Invalid content for {}: {}. Using an empty directory", key, err);
                Vec::new()
            },
        }
    }

    fn save(&mut self, members: &[StoredMember]) -> Result<(), Box<dyn Error>> {
        let key = crate::config::storage_key(COLLECTION);
        let content = serde_json::to_string(members)?;
        self.storage.set_item(&key, &content)
    }
}

#[async_trait]
impl<S: Storage + Send + Sync> MemberSource for LocalMembers<S> {
    async fn get_member(&self, id: &str) -> Result<Option<Member>, Box<dyn Error>> {
        Ok(self.load()
            .into_iter()
            .find(|stored| stored.member.id == id)
            .map(|stored| stored.member))
    }

    async fn update_member(&mut self, member: &Member) -> Result<Member, Box<dyn Error>> {
        let mut members = self.load();
        let stored = match members.iter_mut().find(|stored| stored.member.id == member.id) {
            Some(stored) => stored,
            None => return Err(format!("No member {} in the local directory", member.id).into()),
        };
        stored.member.merge(member);
        let updated = stored.member.clone();

        self.save(&members)?;
        Ok(updated)
    }

    /// Deleting an unknown member is not an error
    async fn delete_member(&mut self, id: &str) -> Result<(), Box<dyn Error>> {
        let mut members = self.load();
        members.retain(|stored| stored.member.id != id);
        self.save(&members)
    }

    async fn signup(&mut self, signup: &Signup) -> Result<Member, Box<dyn Error>> {
        let mut members = self.load();
        if members.iter().any(|stored| stored.member.id == signup.id) {
            return Err("이미 존재하는 아이디입니다.".into());
        }

        let mut member = signup.to_member();
        member.phone.get_or_insert_with(String::new);
        member.address.get_or_insert_with(String::new);
        member.created_at = Some(Utc::now().to_rfc3339());

        members.push(StoredMember {
            member: member.clone(),
            pwd: Some(signup.pwd.clone()),
        });
        self.save(&members)?;
        log::info!("Member {} registered in the local directory", member.id);
        Ok(member)
    }
}
