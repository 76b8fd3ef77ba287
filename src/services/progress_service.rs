// src/services/progress_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        schedule::{parse_completed_set, split_capacidades, ScheduleWithTurma},
        user::Ctx,
    },
    services::{schedule_service, turma_service},
};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressoTurma {
    pub total_weeks: i64,
    pub completed_weeks: i64,
    pub weeks_percent: i64,
    pub total_capacidades: i64,
    pub completed_capacidades: i64,
    pub capacidades_percent: i64,
}

/// Percentagem arredondada com round-half-to-even (regra única para
/// ambas as percentagens). Devolve 0 quando o denominador é 0.
fn percent(completed: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round_ties_even() as i64
}

/// Agrega o progresso sobre um conjunto de semanas (uma turma ou a vista
/// "todas as turmas" da exportação).
pub fn aggregate(schedules: &[ScheduleWithTurma]) -> ProgressoTurma {
    let total_weeks = schedules.len() as i64;
    let completed_weeks = schedules.iter().filter(|s| s.completed).count() as i64;

    let mut total_capacidades = 0i64;
    let mut completed_capacidades = 0i64;

    for s in schedules {
        let lines = split_capacidades(&s.capacidades);
        total_capacidades += lines.len() as i64;

        // Entradas distintas do conjunto que apontem para uma linha
        // existente; índices fora do intervalo ficam guardados mas não
        // contam (nem podem empurrar a percentagem acima de 100)
        let mut seen: HashSet<String> = HashSet::new();
        for entry in parse_completed_set(&s.capacidades_completed) {
            if !seen.insert(entry.clone()) {
                continue;
            }
            if let Ok(idx) = entry.parse::<usize>() {
                if idx < lines.len() {
                    completed_capacidades += 1;
                }
            }
        }
    }

    ProgressoTurma {
        total_weeks,
        completed_weeks,
        weeks_percent: percent(completed_weeks, total_weeks),
        total_capacidades,
        completed_capacidades,
        capacidades_percent: percent(completed_capacidades, total_capacidades),
    }
}

/// Progresso de uma turma específica do utilizador.
pub async fn progresso_turma(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    turma_id: i64,
) -> AppResult<ProgressoTurma> {
    turma_service::find_turma(db_pool, ctx, turma_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let schedules = schedule_service::list_schedules(db_pool, ctx, Some(turma_id)).await?;
    Ok(aggregate(&schedules))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semana(
        semana: i64,
        capacidades: &str,
        completed: bool,
        capacidades_completed: &str,
    ) -> ScheduleWithTurma {
        ScheduleWithTurma {
            id: semana,
            turma_id: 1,
            turma_nome: "Turma A".to_string(),
            turma_cor: "".to_string(),
            semana,
            atividades: "".to_string(),
            unidade_curricular: "".to_string(),
            capacidades: capacidades.to_string(),
            conhecimentos: "".to_string(),
            recursos: "".to_string(),
            completed,
            capacidades_completed: capacidades_completed.to_string(),
        }
    }

    #[test]
    fn turma_vazia_fica_a_zero() {
        let p = aggregate(&[]);
        assert_eq!(p.total_weeks, 0);
        assert_eq!(p.weeks_percent, 0);
        assert_eq!(p.total_capacidades, 0);
        assert_eq!(p.capacidades_percent, 0);
    }

    #[test]
    fn cenario_duas_semanas_tres_capacidades() {
        // Semana 1: "Cap1\nCap2", índice 0 concluído, semana pendente.
        // Semana 2: "Cap3", semana concluída, nenhuma capacidade marcada.
        let semanas = vec![
            semana(1, "Cap1\nCap2", false, "0"),
            semana(2, "Cap3", true, ""),
        ];
        let p = aggregate(&semanas);
        assert_eq!(p.total_weeks, 2);
        assert_eq!(p.completed_weeks, 1);
        assert_eq!(p.weeks_percent, 50);
        assert_eq!(p.total_capacidades, 3);
        assert_eq!(p.completed_capacidades, 1);
        assert_eq!(p.capacidades_percent, 33);
    }

    #[test]
    fn indice_fora_do_intervalo_nao_conta() {
        let semanas = vec![semana(1, "Cap1", false, "0,7")];
        let p = aggregate(&semanas);
        assert_eq!(p.total_capacidades, 1);
        assert_eq!(p.completed_capacidades, 1);
        assert_eq!(p.capacidades_percent, 100);
    }

    #[test]
    fn entradas_duplicadas_contam_uma_vez() {
        let semanas = vec![semana(1, "Cap1\nCap2", false, "1,1")];
        let p = aggregate(&semanas);
        assert_eq!(p.completed_capacidades, 1);
    }

    #[test]
    fn arredondamento_half_to_even() {
        // 1/8 = 12.5% → 12 (par); 3/8 = 37.5% → 38 (par)
        assert_eq!(percent(1, 8), 12);
        assert_eq!(percent(3, 8), 38);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 5), 100);
    }
}
