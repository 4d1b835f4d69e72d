use std::error::Error;

use async_trait::async_trait;

use crate::member::{Member, Rejected, Signup};
use crate::traits::MemberSource;


/// A member source that asks `R` first, and `L` whenever `R` fails.
///
/// Any failure of the remote source (network, HTTP status, or the server refusing the request) triggers the fallback,
/// except for a signup the server explicitly [`Rejected`]: that one is reported to the caller as-is.
#[derive(Debug)]
pub struct FallbackDirectory<R, L>
where
    R: MemberSource,
    L: MemberSource,
{
    remote: R,
    local: L,
}

impl<R, L> FallbackDirectory<R, L>
where
    R: MemberSource,
    L: MemberSource,
{
    pub fn new(remote: R, local: L) -> Self {
        Self { remote, local }
    }

    pub fn remote(&self) -> &R { &self.remote }
    pub fn local(&self) -> &L  { &self.local }
    pub fn remote_mut(&mut self) -> &mut R { &mut self.remote }
    pub fn local_mut(&mut self) -> &mut L  { &mut self.local }
}

#[async_trait]
impl<R, L> MemberSource for FallbackDirectory<R, L>
where
    R: MemberSource,
    L: MemberSource,
{
    async fn get_member(&self, id: &str) -> Result<Option<Member>, Box<dyn Error>> {
        let reason = match self.remote.get_member(id).await {
            Ok(member) => return Ok(member),
            Err(err) => err.to_string(),
        };
        log::warn!("Unable to fetch member {} from the remote directory ({}). Using the local one", id, reason);
        self.local.get_member(id).await
    }

    async fn update_member(&mut self, member: &Member) -> Result<Member, Box<dyn Error>> {
        let reason = match self.remote.update_member(member).await {
            Ok(updated) => return Ok(updated),
            Err(err) => err.to_string(),
        };
        log::warn!("Unable to update member {} in the remote directory ({}). Updating the local one", member.id, reason);
        self.local.update_member(member).await
    }

    /// The member is removed from the local directory as well, whatever the outcome of the remote deletion
    async fn delete_member(&mut self, id: &str) -> Result<(), Box<dyn Error>> {
        let remote_failure = match self.remote.delete_member(id).await {
            Ok(()) => None,
            Err(err) => Some(err.to_string()),
        };
        if let Some(reason) = remote_failure {
            log::warn!("Unable to delete member {} from the remote directory ({}). Deleting it locally only", id, reason);
        }
        self.local.delete_member(id).await
    }

    async fn signup(&mut self, signup: &Signup) -> Result<Member, Box<dyn Error>> {
        let reason = match self.remote.signup(signup).await {
            Ok(member) => return Ok(member),
            Err(err) if err.is::<Rejected>() => return Err(err),
            Err(err) => err.to_string(),
        };
        log::warn!("Unable to register {} in the remote directory ({}). Registering locally", signup.id, reason);
        self.local.signup(signup).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use crate::member::mock::MockedRemote;
    use crate::member::LocalMembers;
    use crate::mock_behaviour::MockBehaviour;
    use crate::storage::MemoryStorage;

    fn signup(id: &str) -> Signup {
        Signup {
            id: id.to_string(),
            pwd: "pwd".to_string(),
            name: id.to_uppercase(),
            email: format!("{}@example.com", id),
            phone: None,
            address: None,
        }
    }

    fn directory(behaviour: MockBehaviour) -> FallbackDirectory<MockedRemote, LocalMembers<MemoryStorage>> {
        let remote = MockedRemote::new(Arc::new(Mutex::new(behaviour)));
        FallbackDirectory::new(remote, LocalMembers::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn remote_first() {
        let mut dir = directory(MockBehaviour::new());
        dir.signup(&signup("kim")).await.unwrap();
        assert!(dir.local().members().is_empty());
        assert!(dir.get_member("kim").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn local_when_remote_fails() {
        let mut dir = directory(MockBehaviour::fail_now(10));
        dir.signup(&signup("lee")).await.unwrap();
        assert_eq!(dir.local().members().len(), 1);
        assert!(dir.remote().members().is_empty());

        let member = dir.get_member("lee").await.unwrap().unwrap();
        assert_eq!(member.name.as_deref(), Some("LEE"));
    }

    #[tokio::test]
    async fn rejected_signup_is_not_retried_locally() {
        let mut dir = directory(MockBehaviour::new());
        dir.signup(&signup("kim")).await.unwrap();
        let err = dir.signup(&signup("kim")).await.unwrap_err();
        assert!(err.is::<Rejected>());
        assert!(dir.local().members().is_empty());
    }

    #[tokio::test]
    async fn deletion_is_mirrored() {
        let mut dir = directory(MockBehaviour {
            signup_behaviour: (0, 1),
            ..MockBehaviour::default()
        });
        // Fails remotely, lands locally
        dir.signup(&signup("park")).await.unwrap();
        // Succeeds remotely
        dir.signup(&signup("park")).await.unwrap();
        assert_eq!(dir.local().members().len(), 1);
        assert_eq!(dir.remote().members().len(), 1);

        dir.delete_member("park").await.unwrap();
        assert!(dir.local().members().is_empty());
        assert!(dir.remote().members().is_empty());
    }
}
