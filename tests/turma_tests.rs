// tests/turma_tests.rs
mod common;

use aula_planner::error::AppError;
use aula_planner::models::turma::TurmaPayload;
use aula_planner::services::{schedule_service, turma_service};
use common::*;

#[tokio::test]
async fn nome_vazio_falha_validacao() {
    let pool = test_pool().await;
    let ctx = create_test_user(&pool, "prof@escola.pt", "user").await;

    let err = turma_service::create_turma(&pool, &ctx, &payload_turma("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = turma_service::create_turma(&pool, &ctx, &TurmaPayload::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn listagem_ordenada_por_nome_e_so_ativas() {
    let pool = test_pool().await;
    let ctx = create_test_user(&pool, "prof@escola.pt", "user").await;

    turma_service::create_turma(&pool, &ctx, &payload_turma("Zoologia")).await.unwrap();
    turma_service::create_turma(&pool, &ctx, &payload_turma("Algoritmos")).await.unwrap();
    let inativa = turma_service::create_turma(&pool, &ctx, &payload_turma("Excluida")).await.unwrap();
    turma_service::soft_delete_turma(&pool, &ctx, inativa.id).await.unwrap();

    let turmas = turma_service::list_turmas(&pool, &ctx).await.unwrap();
    let nomes: Vec<_> = turmas.iter().map(|t| t.nome.as_str()).collect();
    assert_eq!(nomes, vec!["Algoritmos", "Zoologia"]);
}

#[tokio::test]
async fn datas_malformadas_sao_ignoradas_em_silencio() {
    let pool = test_pool().await;
    let ctx = create_test_user(&pool, "prof@escola.pt", "user").await;

    // Na criação: data inválida não gera erro, campo fica nulo
    let turma = turma_service::create_turma(
        &pool,
        &ctx,
        &TurmaPayload {
            nome: Some("Turma A".to_string()),
            data_inicio: Some("31/02/2025".to_string()),
            data_fim: Some("2025-06-30".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(turma.data_inicio, None);
    assert_eq!(turma.data_fim, Some("2025-06-30".to_string()));

    // Na atualização: malformada mantém o valor anterior
    let turma = turma_service::update_turma(
        &pool,
        &ctx,
        turma.id,
        &TurmaPayload { data_fim: Some("junho".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    assert_eq!(turma.data_fim, Some("2025-06-30".to_string()));

    // String vazia explícita limpa a data
    let turma = turma_service::update_turma(
        &pool,
        &ctx,
        turma.id,
        &TurmaPayload { data_fim: Some("".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    assert_eq!(turma.data_fim, None);
}

#[tokio::test]
async fn update_parcial_so_sobrescreve_chaves_presentes() {
    let pool = test_pool().await;
    let ctx = create_test_user(&pool, "prof@escola.pt", "user").await;

    let turma = turma_service::create_turma(
        &pool,
        &ctx,
        &TurmaPayload {
            nome: Some("Turma A".to_string()),
            descricao: Some("Manhã".to_string()),
            carga_horaria: Some(4),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let turma = turma_service::update_turma(
        &pool,
        &ctx,
        turma.id,
        &TurmaPayload { cor: Some("#3B82F6".to_string()), ..Default::default() },
    )
    .await
    .unwrap();
    assert_eq!(turma.nome, "Turma A");
    assert_eq!(turma.descricao, "Manhã");
    assert_eq!(turma.carga_horaria, 4);
    assert_eq!(turma.cor, "#3B82F6");
}

#[tokio::test]
async fn posse_e_verificada_no_update_e_delete() {
    let pool = test_pool().await;
    let dona = create_test_user(&pool, "dona@escola.pt", "user").await;
    let outro = create_test_user(&pool, "outro@escola.pt", "user").await;

    let turma = turma_service::create_turma(&pool, &dona, &payload_turma("Turma A"))
        .await
        .unwrap();

    let err = turma_service::update_turma(&pool, &outro, turma.id, &payload_turma("Roubada"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = turma_service::soft_delete_turma(&pool, &outro, turma.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn soft_delete_nao_toca_nos_cronogramas() {
    let pool = test_pool().await;
    let ctx = create_test_user(&pool, "prof@escola.pt", "user").await;

    let turma = turma_service::create_turma(&pool, &ctx, &payload_turma("Turma A"))
        .await
        .unwrap();
    let semana = schedule_service::create_schedule(&pool, &ctx, &payload_semana(Some(turma.id), "Cap1"))
        .await
        .unwrap();

    turma_service::soft_delete_turma(&pool, &ctx, turma.id).await.unwrap();

    // O cronograma continua acessível por lookup direto
    let row = schedule_service::get_schedule(&pool, &ctx, semana.id).await.unwrap();
    assert_eq!(row.turma_id, turma.id);

    // Mas a turma desativada já não aceita semanas novas
    let err = schedule_service::create_schedule(&pool, &ctx, &payload_semana(Some(turma.id), "Cap2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn hard_delete_da_turma_remove_cronogramas_em_cascade() {
    let pool = test_pool().await;
    let ctx = create_test_user(&pool, "prof@escola.pt", "user").await;

    let turma = turma_service::create_turma(&pool, &ctx, &payload_turma("Turma A"))
        .await
        .unwrap();
    schedule_service::create_schedule(&pool, &ctx, &payload_semana(Some(turma.id), "Cap1"))
        .await
        .unwrap();
    schedule_service::create_schedule(&pool, &ctx, &payload_semana(Some(turma.id), "Cap2"))
        .await
        .unwrap();

    // Remoção física (o caminho do cascade User→Turma usa o mesmo FK)
    sqlx::query("DELETE FROM turmas WHERE id = ?")
        .bind(turma.id)
        .execute(&pool)
        .await
        .unwrap();

    let restantes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules WHERE turma_id = ?")
        .bind(turma.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(restantes, 0);
}
