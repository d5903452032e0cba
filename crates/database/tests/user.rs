mod common;

use database::{
    error::ServiceError,
    services::{
        car::CarService,
        seed::{ADMIN_EMAIL, SeedService},
        user::{NewUser, UserService},
    },
};

fn new_user(subject: &str, email: &str) -> NewUser {
    NewUser {
        subject: subject.to_string(),
        email: email.to_string(),
        name: "Alice".to_string(),
        is_admin: false,
    }
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let db = common::setup().await;

    let user = UserService::register(&db, new_user("alice", "  Alice@Example.COM "))
        .await
        .unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert!(!user.is_admin);

    let identity = UserService::identity_for_subject(&db, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(identity.user_id, user.id);
    assert!(!identity.is_admin);
    assert!(
        UserService::identity_for_subject(&db, "nobody")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let db = common::setup().await;
    UserService::register(&db, new_user("alice", "alice@example.com"))
        .await
        .unwrap();

    assert!(matches!(
        UserService::register(&db, new_user("alice-2", "ALICE@example.com")).await,
        Err(ServiceError::Conflict(_))
    ));
    assert!(matches!(
        UserService::register(&db, new_user("alice", "other@example.com")).await,
        Err(ServiceError::Conflict(_))
    ));
    assert!(matches!(
        UserService::register(&db, new_user("bob", " ")).await,
        Err(ServiceError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = common::setup().await;

    SeedService::seed(&db, "admin-subject").await.unwrap();
    SeedService::seed(&db, "admin-subject").await.unwrap();

    assert_eq!(CarService::count_cars(&db).await.unwrap(), 4);

    let admin = UserService::find_by_email(&db, ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();
    assert!(admin.is_admin);
    assert_eq!(admin.subject, "admin-subject");

    let makes: Vec<String> = CarService::list_cars(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.make)
        .collect();
    assert_eq!(makes, vec!["BMW", "Kia", "Skoda", "Toyota"]);
}
