//! A fake member directory server, whose failures are driven by a [`MockBehaviour`]

use std::error::Error;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::member::{LocalMembers, Member, Rejected, Signup};
use crate::mock_behaviour::MockBehaviour;
use crate::storage::MemoryStorage;
use crate::traits::MemberSource;


/// Behaves like a [`RemoteDirectory`](crate::member::RemoteDirectory), but keeps its members in memory
#[derive(Debug)]
pub struct MockedRemote {
    members: LocalMembers<MemoryStorage>,
    mock_behaviour: Arc<Mutex<MockBehaviour>>,
}

impl MockedRemote {
    pub fn new(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            members: LocalMembers::new(MemoryStorage::new()),
            mock_behaviour,
        }
    }

    pub fn members(&self) -> Vec<Member> {
        self.members.members()
    }

    fn check<F>(&self, can: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), Box<dyn Error>>,
    {
        match self.mock_behaviour.lock() {
            Ok(mut behaviour) => can(&mut behaviour),
            Err(_) => Err("The mock behaviour is poisoned".into()),
        }
    }
}

#[async_trait]
impl MemberSource for MockedRemote {
    async fn get_member(&self, id: &str) -> Result<Option<Member>, Box<dyn Error>> {
        self.check(MockBehaviour::can_get_member)?;
        self.members.get_member(id).await
    }

    async fn update_member(&mut self, member: &Member) -> Result<Member, Box<dyn Error>> {
        self.check(MockBehaviour::can_update_member)?;
        self.members.update_member(member).await
    }

    async fn delete_member(&mut self, id: &str) -> Result<(), Box<dyn Error>> {
        self.check(MockBehaviour::can_delete_member)?;
        self.members.delete_member(id).await
    }

    async fn signup(&mut self, signup: &Signup) -> Result<Member, Box<dyn Error>> {
        self.check(MockBehaviour::can_signup)?;
        if self.members.get_member(&signup.id).await?.is_some() {
            return Err(Box::new(Rejected { message: "이미 존재하는 아이디입니다.".to_string() }));
        }
        self.members.signup(signup).await
    }
}
