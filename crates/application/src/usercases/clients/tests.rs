use std::sync::Arc;

use domain::{
    entities::clients::Client,
    repositories::clients::MockClientRepository,
    value_objects::{cpf::Cpf, errors::ValidationError},
};
use mockall::predicate::eq;
use uuid::Uuid;

use super::*;
use crate::interfaces::tax_id::{CpfLookup, MockTaxIdVerifier, TaxIdError};

fn lookup(name: &str) -> CpfLookup {
    CpfLookup {
        name: name.to_string(),
        cpf: "461.371.640-39".to_string(),
        birth_date: "17/05/1990".to_string(),
        registration_status: "REGULAR".to_string(),
    }
}

fn create_input() -> CreateClientInput {
    CreateClientInput {
        name: "Johnny D.".to_string(),
        cpf: "461.371.640-39".to_string(),
        birth_date: "1990-05-17".to_string(),
        email: "john@example.com".to_string(),
        phone: "(11) 98765-4321".to_string(),
    }
}

fn stored_client(creator_id: Uuid) -> Client {
    Client::new(
        creator_id,
        "John Doe",
        "46137164039",
        "1990-05-17",
        "john@example.com",
        "11987654321",
    )
    .unwrap()
}

fn csv_input(content: &str) -> ImportClientsInput {
    ImportClientsInput {
        file_name: "clients.csv".to_string(),
        content_type: Some("text/csv".to_string()),
        content: content.as_bytes().to_vec(),
    }
}

#[tokio::test]
async fn create_client_uses_the_verified_name() {
    let creator_id = Uuid::new_v4();
    let cpf = Cpf::new("461.371.640-39").unwrap();

    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo
        .expect_find_by_cpf()
        .with(eq(creator_id), eq(cpf.clone()))
        .times(1)
        .returning(|_, _| Ok(None));
    verifier
        .expect_consult_cpf()
        .with(eq(cpf.clone()), mockall::predicate::always())
        .times(1)
        .returning(|_, _| Ok(lookup("John Doe")));
    client_repo
        .expect_create()
        .withf(move |client| {
            client.name() == "John Doe"
                && client.cpf().value() == "46137164039"
                && client.creator_id() == creator_id
        })
        .times(1)
        .returning(|_| Ok(()));

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let client = use_case.create_client(creator_id, create_input()).await.unwrap();

    assert_eq!(client.name, "John Doe");
    assert_eq!(client.cpf, "461.371.640-39");
}

#[tokio::test]
async fn create_client_stops_when_cpf_is_registered() {
    let creator_id = Uuid::new_v4();

    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo
        .expect_find_by_cpf()
        .times(1)
        .returning(move |creator_id, _| Ok(Some(stored_client(creator_id))));
    verifier.expect_consult_cpf().times(0);
    client_repo.expect_create().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let err = use_case
        .create_client(creator_id, create_input())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::AlreadyExists));
    assert_eq!(err.to_string(), "client already exists");
}

#[tokio::test]
async fn create_client_hides_verification_errors() {
    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo.expect_find_by_cpf().returning(|_, _| Ok(None));
    verifier
        .expect_consult_cpf()
        .times(1)
        .returning(|_, _| Err(TaxIdError::Unavailable("connection reset".to_string())));
    client_repo.expect_create().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let err = use_case
        .create_client(Uuid::new_v4(), create_input())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::VerificationFailed { retryable: true }));
    assert_eq!(err.to_string(), "failed to validate CPF");
}

#[tokio::test]
async fn rejected_cpf_is_not_retryable() {
    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo.expect_find_by_cpf().returning(|_, _| Ok(None));
    verifier
        .expect_consult_cpf()
        .returning(|_, _| Err(TaxIdError::Rejected("CPF not found".to_string())));
    client_repo.expect_create().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let err = use_case
        .create_client(Uuid::new_v4(), create_input())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::VerificationFailed { retryable: false }));
}

#[tokio::test]
async fn invalid_cpf_fails_before_any_lookup() {
    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo.expect_find_by_cpf().times(0);
    verifier.expect_consult_cpf().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let input = CreateClientInput {
        cpf: "461.371.640-38".to_string(),
        ..create_input()
    };
    let err = use_case
        .create_client(Uuid::new_v4(), input)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(ValidationError::Cpf(_))));
}

#[tokio::test]
async fn invalid_email_fails_before_verification() {
    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo.expect_find_by_cpf().returning(|_, _| Ok(None));
    verifier.expect_consult_cpf().times(0);
    client_repo.expect_create().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let input = CreateClientInput {
        email: "john@".to_string(),
        ..create_input()
    };
    let err = use_case
        .create_client(Uuid::new_v4(), input)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(ValidationError::Email(_))));
}

#[tokio::test]
async fn update_client_revalidates_and_persists() {
    let creator_id = Uuid::new_v4();
    let existing = stored_client(creator_id);
    let client_id = existing.id();

    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo
        .expect_find_by_id()
        .with(eq(client_id))
        .returning(move |_| Ok(Some(existing.clone())));
    client_repo.expect_find_by_cpf().times(0);
    verifier
        .expect_consult_cpf()
        .times(1)
        .returning(|_, _| Ok(lookup("John Doe da Silva")));
    client_repo
        .expect_update()
        .withf(move |client| {
            client.id() == client_id
                && client.name() == "John Doe da Silva"
                && client.email().value() == "john.doe@example.com"
                && client.phone().value() == "21998765432"
        })
        .times(1)
        .returning(|_| Ok(()));

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let updated = use_case
        .update_client(
            creator_id,
            client_id,
            UpdateClientInput {
                name: "John Doe".to_string(),
                cpf: "46137164039".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: "21998765432".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.birth_date, "1990-05-17");
}

#[tokio::test]
async fn update_client_of_another_creator_is_not_found() {
    let owner = Uuid::new_v4();
    let existing = stored_client(owner);
    let client_id = existing.id();

    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo
        .expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    verifier.expect_consult_cpf().times(0);
    client_repo.expect_update().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let err = use_case
        .update_client(
            Uuid::new_v4(),
            client_id,
            UpdateClientInput {
                name: "John Doe".to_string(),
                cpf: "46137164039".to_string(),
                email: "john@example.com".to_string(),
                phone: "11987654321".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "client not found");
}

#[tokio::test]
async fn update_client_rejects_a_cpf_taken_by_another_client() {
    let creator_id = Uuid::new_v4();
    let existing = stored_client(creator_id);
    let client_id = existing.id();

    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo
        .expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    client_repo
        .expect_find_by_cpf()
        .with(eq(creator_id), eq(Cpf::new("39825979194").unwrap()))
        .returning(|creator_id, _| {
            Ok(Some(
                Client::new(
                    creator_id,
                    "Jane Roe",
                    "39825979194",
                    "1985-01-01",
                    "jane@example.com",
                    "11912345678",
                )
                .unwrap(),
            ))
        });
    verifier.expect_consult_cpf().times(0);
    client_repo.expect_update().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let err = use_case
        .update_client(
            creator_id,
            client_id,
            UpdateClientInput {
                name: "John Doe".to_string(),
                cpf: "398.259.791-94".to_string(),
                email: "john@example.com".to_string(),
                phone: "11987654321".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::AlreadyExists));
}

#[tokio::test]
async fn import_stores_every_row_in_one_batch() {
    let creator_id = Uuid::new_v4();

    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo
        .expect_find_by_cpf()
        .times(2)
        .returning(|_, _| Ok(None));
    verifier
        .expect_consult_cpf()
        .times(2)
        .returning(|cpf, _| Ok(lookup(&format!("Verified {}", cpf.value()))));
    client_repo
        .expect_create_batch()
        .withf(|clients| {
            clients.len() == 2
                && clients[0].name() == "Verified 46137164039"
                && clients[1].name() == "Verified 39825979194"
        })
        .times(1)
        .returning(|_| Ok(()));

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let imported = use_case
        .import_clients(
            creator_id,
            csv_input(
                "name,cpf,birth_date,email,phone\n\
                 John Doe,461.371.640-39,1990-05-17,john@example.com,11987654321\n\
                 Jane Roe, 398.259.791-94 ,01/02/1985,jane@example.com,(21) 99876-5432\n",
            ),
        )
        .await
        .unwrap();

    assert_eq!(imported, 2);
}

#[tokio::test]
async fn import_rejects_non_csv_files() {
    let mut client_repo = MockClientRepository::new();
    client_repo.expect_create_batch().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(MockTaxIdVerifier::new()));

    let mut by_extension = csv_input("name,cpf,birth_date,email,phone\n");
    by_extension.file_name = "clients.xlsx".to_string();
    let err = use_case
        .import_clients(Uuid::new_v4(), by_extension)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid import: file must be a CSV");

    let mut by_content_type = csv_input("name,cpf,birth_date,email,phone\n");
    by_content_type.content_type = Some("application/pdf".to_string());
    let err = use_case
        .import_clients(Uuid::new_v4(), by_content_type)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidImport(_)));
}

#[tokio::test]
async fn import_is_rejected_when_any_row_is_invalid() {
    let mut client_repo = MockClientRepository::new();
    let mut verifier = MockTaxIdVerifier::new();

    client_repo.expect_find_by_cpf().times(0);
    verifier.expect_consult_cpf().times(0);
    client_repo.expect_create_batch().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(verifier));
    let err = use_case
        .import_clients(
            Uuid::new_v4(),
            csv_input(
                "name,cpf,birth_date,email,phone\n\
                 John Doe,461.371.640-39,1990-05-17,john@example.com,11987654321\n\
                 Jane Roe,398.259.791-94,30/02/1985,jane@example.com,21998765432\n",
            ),
        )
        .await
        .unwrap_err();

    match err {
        ClientError::InvalidImport(message) => assert!(message.starts_with("line 3:"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn import_rejects_short_rows_and_duplicates() {
    let use_case = ClientUseCase::new(
        Arc::new(MockClientRepository::new()),
        Arc::new(MockTaxIdVerifier::new()),
    );
    let err = use_case
        .import_clients(
            Uuid::new_v4(),
            csv_input("name,cpf,birth_date,email,phone\nJohn Doe,46137164039\n"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid import: line 2: invalid CSV format");

    let mut client_repo = MockClientRepository::new();
    client_repo
        .expect_find_by_cpf()
        .times(1)
        .returning(|_, _| Ok(None));
    client_repo.expect_create_batch().times(0);

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(MockTaxIdVerifier::new()));
    let err = use_case
        .import_clients(
            Uuid::new_v4(),
            csv_input(
                "name,cpf,birth_date,email,phone\n\
                 John Doe,461.371.640-39,1990-05-17,john@example.com,11987654321\n\
                 John Again,46137164039,1990-05-17,john2@example.com,11987654322\n",
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid import: line 3: duplicate CPF in file"
    );
}

#[tokio::test]
async fn empty_import_is_rejected() {
    let use_case = ClientUseCase::new(
        Arc::new(MockClientRepository::new()),
        Arc::new(MockTaxIdVerifier::new()),
    );
    let err = use_case
        .import_clients(Uuid::new_v4(), csv_input("name,cpf,birth_date,email,phone\n"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "invalid import: file has no clients");
}

#[tokio::test]
async fn list_clients_returns_page_info() {
    let creator_id = Uuid::new_v4();

    let mut client_repo = MockClientRepository::new();
    client_repo
        .expect_list()
        .withf(move |query| {
            query.creator_id == creator_id
                && query.term() == Some("john")
                && query.pagination.page() == 2
                && query.pagination.page_size() == 1
        })
        .times(1)
        .returning(move |query| Ok((vec![stored_client(query.creator_id)], 3)));

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(MockTaxIdVerifier::new()));
    let page = use_case
        .list_clients(
            creator_id,
            ListClientsInput {
                term: Some(" john ".to_string()),
                page: Some(2),
                page_size: Some(1),
            },
        )
        .await
        .unwrap();

    assert_eq!(page.clients.len(), 1);
    assert_eq!(page.page_info.total, 3);
    assert_eq!(page.page_info.total_pages, 3);
    assert!(page.page_info.has_prev && page.page_info.has_next);
}

#[tokio::test]
async fn get_client_is_scoped_to_the_creator() {
    let creator_id = Uuid::new_v4();
    let existing = stored_client(creator_id);
    let client_id = existing.id();

    let mut client_repo = MockClientRepository::new();
    client_repo
        .expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));

    let use_case = ClientUseCase::new(Arc::new(client_repo), Arc::new(MockTaxIdVerifier::new()));

    let client = use_case.get_client(creator_id, client_id).await.unwrap();
    assert_eq!(client.id, client_id);

    let err = use_case
        .get_client(Uuid::new_v4(), client_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
}
