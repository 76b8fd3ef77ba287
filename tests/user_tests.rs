// tests/user_tests.rs
mod common;

use aula_planner::error::AppError;
use aula_planner::models::user::UpdateUserPayload;
use aula_planner::services::{schedule_service, turma_service, user_service};
use common::*;

#[tokio::test]
async fn email_duplicado_falha() {
    let pool = test_pool().await;
    create_test_user(&pool, "ana@escola.pt", "user").await;

    let err = user_service::create_user(&pool, &payload_user("Outra Ana", "ana@escola.pt", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail));
}

#[tokio::test]
async fn role_invalida_e_coagida_para_user() {
    let pool = test_pool().await;
    let id = user_service::create_user(&pool, &payload_user("Bea", "bea@escola.pt", Some("chefe")))
        .await
        .unwrap();
    let user = user_service::find_user_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(user.role, "user");
}

#[tokio::test]
async fn role_invalida_no_update_fica_como_esta() {
    let pool = test_pool().await;
    let admin = create_test_user(&pool, "admin@escola.pt", "admin").await;

    // Valor desconhecido não mexe na role guardada
    user_service::update_user(
        &pool,
        admin.user_id,
        &UpdateUserPayload { role: Some("chefe".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    let user = user_service::find_user_by_id(&pool, admin.user_id).await.unwrap().unwrap();
    assert_eq!(user.role, "admin");

    // Valor reconhecido muda normalmente
    user_service::update_user(
        &pool,
        admin.user_id,
        &UpdateUserPayload { role: Some("user".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    let user = user_service::find_user_by_id(&pool, admin.user_id).await.unwrap().unwrap();
    assert_eq!(user.role, "user");
}

#[tokio::test]
async fn admin_nao_pode_excluir_a_propria_conta() {
    let pool = test_pool().await;
    let admin = create_test_user(&pool, "admin@escola.pt", "admin").await;

    let err = user_service::delete_user(&pool, &admin, admin.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SelfDeletion));

    // A conta continua ativa
    let user = user_service::find_user_by_id(&pool, admin.user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.active);
}

#[tokio::test]
async fn excluir_user_remove_turmas_e_cronogramas_em_cascade() {
    let pool = test_pool().await;
    let admin = create_test_user(&pool, "admin@escola.pt", "admin").await;
    let prof = create_test_user(&pool, "prof@escola.pt", "user").await;

    let turma = turma_service::create_turma(&pool, &prof, &payload_turma("Turma A"))
        .await
        .unwrap();
    schedule_service::create_schedule(&pool, &prof, &payload_semana(Some(turma.id), "Cap1"))
        .await
        .unwrap();

    user_service::delete_user(&pool, &admin, prof.user_id).await.unwrap();

    let turmas: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM turmas WHERE user_id = ?")
        .bind(prof.user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    let schedules: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules WHERE user_id = ?")
        .bind(prof.user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(turmas, 0);
    assert_eq!(schedules, 0);
}

#[tokio::test]
async fn conta_inativa_nao_autentica() {
    let pool = test_pool().await;
    let ctx = create_test_user(&pool, "ines@escola.pt", "user").await;

    // Credenciais corretas funcionam com a conta ativa
    let user = user_service::verify_credentials(&pool, "ines@escola.pt", "segredo123")
        .await
        .unwrap();
    assert!(user.is_some());

    user_service::update_user(
        &pool,
        ctx.user_id,
        &UpdateUserPayload { active: Some(false), ..Default::default() },
    )
    .await
    .unwrap();

    let user = user_service::verify_credentials(&pool, "ines@escola.pt", "segredo123")
        .await
        .unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn senha_errada_nao_autentica() {
    let pool = test_pool().await;
    create_test_user(&pool, "rui@escola.pt", "user").await;

    let user = user_service::verify_credentials(&pool, "rui@escola.pt", "errada")
        .await
        .unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn update_parcial_preserva_senha_e_valida_email() {
    let pool = test_pool().await;
    let a = create_test_user(&pool, "a@escola.pt", "user").await;
    create_test_user(&pool, "b@escola.pt", "user").await;

    // Senha vazia no payload não troca a senha
    user_service::update_user(
        &pool,
        a.user_id,
        &UpdateUserPayload {
            name: Some("Novo Nome".to_string()),
            password: Some("".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let user = user_service::verify_credentials(&pool, "a@escola.pt", "segredo123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.name, "Novo Nome");

    // Guardar o mesmo email não dispara a verificação de unicidade
    user_service::update_user(
        &pool,
        a.user_id,
        &UpdateUserPayload { email: Some("a@escola.pt".to_string()), ..Default::default() },
    )
    .await
    .unwrap();

    // Mudar para um email ocupado falha
    let err = user_service::update_user(
        &pool,
        a.user_id,
        &UpdateUserPayload { email: Some("b@escola.pt".to_string()), ..Default::default() },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail));
}

#[tokio::test]
async fn excluir_user_inexistente_da_not_found() {
    let pool = test_pool().await;
    let admin = create_test_user(&pool, "admin@escola.pt", "admin").await;
    let err = user_service::delete_user(&pool, &admin, 9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
