use crate::helpers::spawn_app;
use claims::{assert_err, assert_ok};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use signet::authentication::AuthError;
use signet::domain::CredentialStore;

#[tokio::test]
async fn signup_with_a_fresh_email_returns_a_token_for_that_user() {
    // Arrange
    let app = spawn_app().await;
    let email: String = SafeEmail().fake();
    let full_name: String = Name().fake();

    // Act
    let token = assert_ok!(app.sign_up(&email, &full_name, "everythinghastostartsomewhere").await);

    // Assert
    let claims = app.decode(&token);
    let saved = app
        .store
        .find_by_email(&email)
        .await
        .unwrap()
        .expect("The new user was not persisted");

    assert_eq!(claims.sub, saved.id);
    assert_eq!(claims.email, email);
    assert_eq!(saved.full_name, full_name);
}

#[tokio::test]
async fn signup_with_an_existing_email_fails_regardless_of_other_fields() {
    // Arrange
    let app = spawn_app().await;
    app.sign_up("a@x.com", "A", "pw1-is-long-enough").await.unwrap();

    // Act
    let second = app.sign_up("a@x.com", "Somebody Else", "a-completely-different-pw").await;

    // Assert
    let error = assert_err!(second);
    assert!(matches!(error, AuthError::DuplicateCredential));
    assert_eq!(error.to_string(), "Email already exists");
}

#[tokio::test]
async fn signup_rejects_malformed_input_before_touching_the_store() {
    let app = spawn_app().await;

    let test_cases = vec![
        ("definitely-not-an-email", "Ursula", "pw1-is-long-enough", "invalid email"),
        ("ursula@x.com", "", "pw1-is-long-enough", "empty full name"),
        ("ursula@x.com", "Ursula", "", "empty password"),
        ("ursula@x.com", "Ursula", "   ", "whitespace password"),
    ];

    for (email, full_name, password, description) in test_cases {
        let result = app.sign_up(email, full_name, password).await;

        assert!(
            matches!(result, Err(AuthError::ValidationError(_))),
            "signup did not reject the case: {}",
            description
        );
        assert!(
            app.store.find_by_email(email).await.unwrap().is_none(),
            "a record was persisted for the case: {}",
            description
        );
    }
}

#[tokio::test]
async fn concurrent_signups_with_the_same_email_have_exactly_one_winner() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let (first, second) = tokio::join!(
        app.sign_up("a@x.com", "A", "pw1-is-long-enough"),
        app.sign_up("a@x.com", "B", "another-password-entirely"),
    );

    // Assert
    let outcomes = [first, second];
    assert_eq!(1, outcomes.iter().filter(|r| r.is_ok()).count());
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(AuthError::DuplicateCredential))));
}

#[tokio::test]
async fn the_stored_password_hash_is_not_the_raw_secret() {
    use secrecy::ExposeSecret;

    // Arrange
    let app = spawn_app().await;
    let password = "everythinghastostartsomewhere";

    // Act
    app.sign_up("a@x.com", "A", password).await.unwrap();

    // Assert
    let saved = app.store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_ne!(saved.password_hash.expose_secret(), password);
    assert!(saved.password_hash.expose_secret().starts_with("$argon2id$"));
}

#[tokio::test]
async fn an_issued_token_serializes_to_the_access_token_shape() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let token = app.sign_up("a@x.com", "A", "pw1-is-long-enough").await.unwrap();

    // Assert
    let serialized = serde_json::to_value(&token).unwrap();
    let object = serialized.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object["access_token"].is_string());
}
