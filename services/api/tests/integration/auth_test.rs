use ratehub_api::error::ApiError;
use ratehub_api::token;
use ratehub_api::usecase::auth::{
    GetProfileUseCase, LoginUseCase, SignupInput, SignupUseCase, UpdatePasswordUseCase,
};
use ratehub_domain::Role;

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET};

fn signup_input(email: &str) -> SignupInput {
    SignupInput {
        name: "Johnathan Quincy Storefront".to_owned(),
        email: email.to_owned(),
        address: "42 Integration Avenue".to_owned(),
        password: "Sign@up123".to_owned(),
    }
}

#[tokio::test]
async fn signup_then_login_round_trip() {
    let repo = MockUserRepo::empty();
    let signup = SignupUseCase {
        repo: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let (created, signup_token) = signup
        .execute(signup_input("john@example.com"))
        .await
        .unwrap();
    assert_eq!(created.role, Role::NormalUser);

    let claims = token::verify_token(&signup_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, created.id.to_string());
    assert_eq!(claims.role, Role::NormalUser);

    let login = LoginUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let (user, _) = login
        .execute("john@example.com", "Sign@up123")
        .await
        .unwrap();
    assert_eq!(user.id, created.id);
}

#[tokio::test]
async fn login_is_case_insensitive_on_email() {
    let repo = MockUserRepo::empty();
    let signup = SignupUseCase {
        repo: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    signup
        .execute(signup_input("  Case@Example.COM "))
        .await
        .unwrap();

    let login = LoginUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    assert!(login.execute("case@example.com", "Sign@up123").await.is_ok());
    assert!(login.execute("CASE@EXAMPLE.COM", "Sign@up123").await.is_ok());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_even_with_different_case() {
    let repo = MockUserRepo::empty();
    let signup = SignupUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    signup.execute(signup_input("dupe@example.com")).await.unwrap();

    let result = signup.execute(signup_input("DUPE@example.com")).await;
    assert!(matches!(result, Err(ApiError::EmailTaken)));
}

#[tokio::test]
async fn token_from_another_secret_is_rejected() {
    let repo = MockUserRepo::empty();
    let signup = SignupUseCase {
        repo,
        jwt_secret: "some-other-secret".to_owned(),
    };
    let (_, foreign_token) = signup
        .execute(signup_input("foreign@example.com"))
        .await
        .unwrap();

    let err = token::verify_token(&foreign_token, TEST_JWT_SECRET).unwrap_err();
    assert_eq!(err, token::TokenError::InvalidSignature);
}

#[tokio::test]
async fn password_update_invalidates_the_old_password() {
    let repo = MockUserRepo::empty();
    let signup = SignupUseCase {
        repo: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let (user, _) = signup
        .execute(signup_input("rotate@example.com"))
        .await
        .unwrap();

    let update = UpdatePasswordUseCase { repo: repo.clone() };
    update.execute(user.id, "Fresh@pass9").await.unwrap();

    let login = LoginUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    assert!(matches!(
        login.execute("rotate@example.com", "Sign@up123").await,
        Err(ApiError::Unauthenticated)
    ));
    assert!(login.execute("rotate@example.com", "Fresh@pass9").await.is_ok());
}

#[tokio::test]
async fn profile_lookup_never_invents_users() {
    let usecase = GetProfileUseCase {
        repo: MockUserRepo::empty(),
    };
    let result = usecase.execute(uuid::Uuid::now_v7()).await;
    assert!(matches!(result, Err(ApiError::UserNotFound)));
}
