//! Checks of the member directory, with a mocked remote server.
//!
//! These tests require the `integration_tests` Cargo feature

#[cfg(feature = "integration_tests")]
use std::sync::{Arc, Mutex};

#[cfg(feature = "integration_tests")]
use planit::member::mock::MockedRemote;
#[cfg(feature = "integration_tests")]
use planit::member::{FallbackDirectory, LocalMembers, Member, Session, Signup};
#[cfg(feature = "integration_tests")]
use planit::mock_behaviour::MockBehaviour;
#[cfg(feature = "integration_tests")]
use planit::traits::MemberSource;
#[cfg(feature = "integration_tests")]
use planit::MemoryStorage;

#[cfg(feature = "integration_tests")]
fn signup(id: &str) -> Signup {
    Signup {
        id: id.to_string(),
        pwd: "hunter2".to_string(),
        name: format!("Member {}", id),
        email: format!("{}@example.com", id),
        phone: Some("010-0000-0000".to_string()),
        address: None,
    }
}

#[tokio::test]
async fn test_fallback_when_server_is_down() {
    let _ = env_logger::builder().is_test(true).try_init();

    #[cfg(not(feature = "integration_tests"))]
    println!("WARNING: This test required the \"integration_tests\" Cargo feature");

    #[cfg(feature = "integration_tests")]
    {
        let behaviour = Arc::new(Mutex::new(MockBehaviour::new()));
        let remote = MockedRemote::new(behaviour.clone());
        let mut directory = FallbackDirectory::new(remote, LocalMembers::new(MemoryStorage::new()));

        // The server is up: everything goes there
        directory.signup(&signup("kim")).await.unwrap();
        assert_eq!(directory.remote().members().len(), 1);
        assert!(directory.local().members().is_empty());

        // The server goes down
        *behaviour.lock().unwrap() = MockBehaviour::fail_now(u32::MAX);
        assert_eq!(directory.get_member("kim").await.unwrap(), None);

        let lee = directory.signup(&signup("lee")).await.unwrap();
        assert_eq!(directory.get_member("lee").await.unwrap(), Some(lee.clone()));

        let session = Session::logged_in("lee");
        assert!(session.can_edit(&lee));

        let patch = Member { address: Some("Busan".to_string()), ..Member::new("lee") };
        let updated = directory.update_member(&patch).await.unwrap();
        assert_eq!(updated.address.as_deref(), Some("Busan"));
        assert_eq!(updated.phone.as_deref(), Some("010-0000-0000"));

        // Deleting is applied locally, even though the server refuses it
        directory.delete_member("lee").await.unwrap();
        assert_eq!(directory.get_member("lee").await.unwrap(), None);

        // The server is back
        behaviour.lock().unwrap().suspend();
        let kim = directory.get_member("kim").await.unwrap().unwrap();
        assert_eq!(kim.name.as_deref(), Some("Member kim"));
        assert!(session.can_edit(&kim) == false);
    }
}

#[tokio::test]
async fn test_intermittent_server() {
    let _ = env_logger::builder().is_test(true).try_init();

    #[cfg(not(feature = "integration_tests"))]
    println!("WARNING: This test required the \"integration_tests\" Cargo feature");

    #[cfg(feature = "integration_tests")]
    {
        // The server accepts one update, then fails the next one
        let behaviour = Arc::new(Mutex::new(MockBehaviour {
            update_member_behaviour: (1, 1),
            ..MockBehaviour::default()
        }));
        let mut directory = FallbackDirectory::new(
            MockedRemote::new(behaviour),
            LocalMembers::new(MemoryStorage::new()),
        );

        directory.signup(&signup("park")).await.unwrap();
        let renamed = Member { name: Some("Park".to_string()), ..Member::new("park") };
        assert_eq!(directory.update_member(&renamed).await.unwrap().name.as_deref(), Some("Park"));

        // The fallback cannot update a member it never heard of
        assert!(directory.update_member(&renamed).await.is_err());
    }
}
