//! Integration tests for the revision-synchronized contacts service

use contacts_service::api::native::NativeClient;
use contacts_service::config::MissingRevisionPolicy;
use contacts_service::contract::*;
use contacts_service::domain::{CrmError, Service};
use std::sync::Arc;

mod common;
use common::{print_test_header, record, CrmCall, CrmOp, MockCrm};

fn service_with(crm: &Arc<MockCrm>) -> Service {
    Service::new(crm.clone())
}

// ===== Update =====

#[tokio::test]
async fn test_update_uses_revision_from_get() {
    print_test_header(
        "test_update_uses_revision_from_get",
        "Update must send exactly the revision read just before it",
    );
    let crm = Arc::new(MockCrm::with_records(vec![record("c1", "Jane", "Doe", Some(5))]));
    let service = service_with(&crm);

    let updated = service
        .update_contact("c1", ContactForm::named("Jane Smith"))
        .await
        .unwrap();

    let calls = crm.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], CrmCall::Get("c1".into()));
    match &calls[1] {
        CrmCall::Update(id, info, revision) => {
            assert_eq!(id, "c1");
            assert_eq!(*revision, Revision(5));
            let name = info.name.clone().unwrap();
            assert_eq!(name.first.as_deref(), Some("Jane"));
            assert_eq!(name.last.as_deref(), Some("Smith"));
        }
        other => panic!("Expected update call, got {:?}", other),
    }
    assert_eq!(updated.revision, Some(Revision(6)));
}

#[tokio::test]
async fn test_update_not_attempted_when_get_fails() {
    print_test_header(
        "test_update_not_attempted_when_get_fails",
        "A failed revision read stops the update before it reaches the CRM",
    );
    let crm = Arc::new(MockCrm::with_records(vec![record("c1", "Jane", "Doe", Some(5))]));
    crm.fail(CrmOp::Get, CrmError::Transport("connection reset".into()));
    let service = service_with(&crm);

    let err = service
        .update_contact("c1", ContactForm::named("Jane Smith"))
        .await
        .unwrap_err();

    assert_eq!(crm.count(CrmOp::Update), 0);
    assert_eq!(err.to_string(), "Failed updating contact");
    match err {
        ContactsError::Crm { op, source } => {
            assert_eq!(op, ContactOp::Update);
            assert_eq!(source, CrmError::Transport("connection reset".into()));
        }
        other => panic!("Expected CRM error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_reads_revision_before_validating_name() {
    let crm = Arc::new(MockCrm::with_records(vec![record("c1", "Jane", "Doe", Some(2))]));
    let service = service_with(&crm);

    let err = service
        .update_contact("c1", ContactForm::named("   "))
        .await
        .unwrap_err();

    assert!(matches!(err, ContactsError::Validation { ref message } if message == "name is required"));
    assert_eq!(crm.calls(), vec![CrmCall::Get("c1".into())]);
}

#[tokio::test]
async fn test_missing_revision_defaults_to_zero() {
    let crm = Arc::new(MockCrm::with_records(vec![record("c1", "Jane", "Doe", None)]));
    let service = service_with(&crm);

    service
        .update_contact("c1", ContactForm::named("Jane"))
        .await
        .unwrap();

    assert!(matches!(
        crm.calls().last(),
        Some(CrmCall::Update(_, _, Revision(0)))
    ));
}

#[tokio::test]
async fn test_missing_revision_rejected_by_policy() {
    let crm = Arc::new(MockCrm::with_records(vec![record("c1", "Jane", "Doe", None)]));
    let service = service_with(&crm).with_missing_revision(MissingRevisionPolicy::Reject);

    let err = service.delete_contact("c1").await.unwrap_err();

    assert_eq!(crm.count(CrmOp::Archive), 0);
    assert!(matches!(
        err,
        ContactsError::Crm {
            op: ContactOp::Delete,
            source: CrmError::MissingRevision { .. }
        }
    ));
}

#[tokio::test]
async fn test_revision_conflict_is_not_retried() {
    print_test_header(
        "test_revision_conflict_is_not_retried",
        "A stale revision surfaces once to the caller; no second attempt",
    );
    let crm = Arc::new(MockCrm::with_records(vec![record("c1", "Jane", "Doe", Some(3))]));
    crm.fail(
        CrmOp::Update,
        CrmError::RevisionConflict {
            id: "c1".into(),
            sent: Revision(3),
        },
    );
    let service = service_with(&crm);

    let err = service
        .update_contact("c1", ContactForm::named("Jane Doe"))
        .await
        .unwrap_err();

    assert!(err.is_revision_conflict());
    assert_eq!(crm.count(CrmOp::Get), 1);
    assert_eq!(crm.count(CrmOp::Update), 1);
}

#[tokio::test]
async fn test_update_omits_blank_email_and_phone() {
    let crm = Arc::new(MockCrm::with_records(vec![record("c1", "Jane", "Doe", Some(1))]));
    let service = service_with(&crm);

    let form = ContactForm::named("Jane Doe")
        .with_email("")
        .with_phone("+1 555 0100");
    service.update_contact("c1", form).await.unwrap();

    match crm.calls().last() {
        Some(CrmCall::Update(_, info, _)) => {
            assert!(info.emails.is_none());
            let phones = info.phones.clone().unwrap();
            assert_eq!(phones.items.len(), 1);
            assert_eq!(phones.items[0].phone, "+1 555 0100");
            assert!(phones.items[0].primary);
        }
        other => panic!("Expected update call, got {:?}", other),
    }
}

// ===== Create =====

#[tokio::test]
async fn test_create_requires_name() {
    let crm = Arc::new(MockCrm::new());
    let service = service_with(&crm);

    let err = service
        .create_contact(ContactForm::named("").with_email("a@b.c"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "name is required");
    assert!(crm.calls().is_empty());
}

#[tokio::test]
async fn test_create_returns_crm_record() {
    let crm = Arc::new(MockCrm::new());
    let service = service_with(&crm);

    let created = service
        .create_contact(ContactForm::named("Jane Doe").with_email("jane@example.com"))
        .await
        .unwrap();

    assert_eq!(created.id, "created-1");
    let view = contacts_service::domain::to_client_view(&created);
    assert_eq!(view.name, "Jane Doe");
    assert_eq!(view.email.as_deref(), Some("jane@example.com"));
    assert_eq!(view.phone, None);
}

#[tokio::test]
async fn test_create_failure_uses_fixed_message() {
    let crm = Arc::new(MockCrm::new());
    crm.fail(
        CrmOp::Create,
        CrmError::Status {
            status: 400,
            body: "vendor says no".into(),
        },
    );
    let service = service_with(&crm);

    let err = service
        .create_contact(ContactForm::named("Jane"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed creating contact");
}

// ===== Delete =====

#[tokio::test]
async fn test_delete_archives_with_current_revision() {
    let crm = Arc::new(MockCrm::with_records(vec![record("c1", "Jane", "Doe", Some(3))]));
    let service = service_with(&crm);

    let archived = service.delete_contact("c1").await.unwrap();

    assert_eq!(archived.id, "c1");
    assert_eq!(
        crm.calls(),
        vec![
            CrmCall::Get("c1".into()),
            CrmCall::Archive("c1".into(), Revision(3)),
        ]
    );
}

#[tokio::test]
async fn test_delete_not_attempted_for_unknown_contact() {
    let crm = Arc::new(MockCrm::new());
    let service = service_with(&crm);

    let err = service.delete_contact("missing").await.unwrap_err();

    assert_eq!(err.to_string(), "Failed deleting contact");
    assert_eq!(crm.count(CrmOp::Archive), 0);
}

// ===== List and native client =====

#[tokio::test]
async fn test_list_failure_and_success() {
    let crm = Arc::new(MockCrm::with_records(vec![
        record("a", "Ann", "Lee", Some(1)),
        record("b", "Bob", "", Some(1)),
    ]));
    let service = service_with(&crm);

    let items = service.list_contacts().await.unwrap();
    let ids: Vec<_> = items.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);

    crm.fail(CrmOp::List, CrmError::Transport("timeout".into()));
    let err = service.list_contacts().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed listing contacts");
}

#[tokio::test]
async fn test_native_client_delegates_to_service() {
    let crm = Arc::new(MockCrm::with_records(vec![record("c1", "Jane", "Doe", Some(9))]));
    let client: Arc<dyn ContactsApi> = Arc::new(NativeClient::new(Arc::new(service_with(&crm))));

    assert_eq!(client.list_contacts().await.unwrap().len(), 1);
    client
        .update_contact("c1", ContactForm::named("Jane Roe"))
        .await
        .unwrap();
    client.delete_contact("c1").await.unwrap();

    assert_eq!(
        crm.calls().last(),
        Some(&CrmCall::Archive("c1".into(), Revision(9)))
    );
}
