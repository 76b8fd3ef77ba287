// src/services/export_service.rs
//
// Monta a representação de exportação agnóstica de renderizador
// (o "modelo de documento"). Os renderizadores de PDF/folha de cálculo
// consomem este modelo; o JSON é serialização direta dos registos.
use crate::{
    error::AppResult,
    models::{
        schedule::{parse_completed_set, split_capacidades, ScheduleWithTurma},
        turma::Turma,
        user::Ctx,
    },
    services::{progress_service, schedule_service, turma_service},
};
use serde::Serialize;
use sqlx::SqlitePool;

pub const STATUS_CONCLUIDA: &str = "Concluida";
pub const STATUS_PENDENTE: &str = "Pendente";

#[derive(Debug, Clone, Serialize)]
pub struct ExportColumn {
    pub titulo: &'static str,
    // Largura sugerida em cm; o renderizador pode redimensionar
    pub largura: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub status: String,
    pub semana: i64,
    // Presente apenas na vista "todas as turmas"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turma: Option<String>,
    pub atividades: String,
    #[serde(rename = "unidadeCurricular")]
    pub unidade_curricular: String,
    pub capacidades: String,
    pub conhecimentos: String,
    pub recursos: String,
}

// Uma capacidade concluída, anotada com a semana e unidade de origem
// (alimenta a segunda folha da exportação em folha de cálculo)
#[derive(Debug, Clone, Serialize)]
pub struct CapacidadeConcluida {
    pub semana: i64,
    #[serde(rename = "unidadeCurricular")]
    pub unidade_curricular: String,
    pub capacidade: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub titulo: String,
    pub filename: String,
    pub colunas: Vec<ExportColumn>,
    pub linhas: Vec<ExportRow>,
    pub resumo: String,
    pub capacidades_concluidas: Vec<CapacidadeConcluida>,
}

// Registo da exportação JSON: serialização direta dos campos guardados
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    pub semana: i64,
    pub atividades: String,
    #[serde(rename = "unidadeCurricular")]
    pub unidade_curricular: String,
    pub capacidades: String,
    pub conhecimentos: String,
    pub recursos: String,
    pub completed: bool,
    pub capacidades_completed: String,
    pub turma_id: i64,
    pub turma_nome: String,
}

impl From<&ScheduleWithTurma> for ExportRecord {
    fn from(s: &ScheduleWithTurma) -> Self {
        ExportRecord {
            semana: s.semana,
            atividades: s.atividades.clone(),
            unidade_curricular: s.unidade_curricular.clone(),
            capacidades: s.capacidades.clone(),
            conhecimentos: s.conhecimentos.clone(),
            recursos: s.recursos.clone(),
            completed: s.completed,
            capacidades_completed: s.capacidades_completed.clone(),
            turma_id: s.turma_id,
            turma_nome: s.turma_nome.clone(),
        }
    }
}

/// Nome do ficheiro de exportação: nome da turma com espaços por
/// underscores, ou o genérico "cronograma" na vista completa.
pub fn export_filename(turma: Option<&Turma>) -> String {
    match turma {
        Some(t) => t.nome.replace(' ', "_"),
        None => "cronograma".to_string(),
    }
}

/// Bloco de capacidades de uma linha: uma capacidade por linha, prefixada
/// com `[OK]` ou `[ ]` conforme o índice pertença ao conjunto concluído.
/// Texto devolvido verbatim quando não há linhas úteis.
pub fn render_capacidades_block(capacidades: &str, capacidades_completed: &str) -> String {
    let lines = split_capacidades(capacidades);
    if lines.is_empty() {
        return capacidades.to_string();
    }
    let set = parse_completed_set(capacidades_completed);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let marker = if set.iter().any(|m| m == &i.to_string()) {
                "[OK]"
            } else {
                "[ ]"
            };
            format!("{} {}", marker, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn colunas(com_turma: bool) -> Vec<ExportColumn> {
    // Larguras herdadas do layout A4 paisagem do renderizador de PDF
    let mut cols = vec![
        ExportColumn { titulo: "Status", largura: 2.0 },
        ExportColumn { titulo: "Semana", largura: 1.2 },
    ];
    if com_turma {
        cols.push(ExportColumn { titulo: "Turma", largura: 3.0 });
    }
    cols.extend([
        ExportColumn { titulo: "Atividades", largura: 5.0 },
        ExportColumn { titulo: "Unidade Curricular", largura: 4.0 },
        ExportColumn { titulo: "Capacidades", largura: 5.0 },
        ExportColumn { titulo: "Conhecimentos", largura: 4.5 },
        ExportColumn { titulo: "Recursos", largura: 4.0 },
    ]);
    cols
}

/// Monta o modelo de documento a partir das semanas já filtradas e
/// ordenadas. A coluna "Turma" só existe na vista sem filtro — isso faz
/// parte do contrato do modelo, não do renderizador.
pub fn build_document(turma: Option<&Turma>, schedules: &[ScheduleWithTurma]) -> ExportDocument {
    let progresso = progress_service::aggregate(schedules);

    let linhas = schedules
        .iter()
        .map(|s| ExportRow {
            status: if s.completed {
                STATUS_CONCLUIDA.to_string()
            } else {
                STATUS_PENDENTE.to_string()
            },
            semana: s.semana,
            turma: if turma.is_none() {
                Some(s.turma_nome.clone())
            } else {
                None
            },
            atividades: s.atividades.clone(),
            unidade_curricular: s.unidade_curricular.clone(),
            capacidades: render_capacidades_block(&s.capacidades, &s.capacidades_completed),
            conhecimentos: s.conhecimentos.clone(),
            recursos: s.recursos.clone(),
        })
        .collect();

    // Secção secundária: cada capacidade concluída, em ordem de semana e
    // depois de posição na lista; índices fora do intervalo ficam inertes
    let mut capacidades_concluidas = Vec::new();
    for s in schedules {
        let set = parse_completed_set(&s.capacidades_completed);
        for (i, line) in split_capacidades(&s.capacidades).iter().enumerate() {
            if set.iter().any(|m| m == &i.to_string()) {
                capacidades_concluidas.push(CapacidadeConcluida {
                    semana: s.semana,
                    unidade_curricular: s.unidade_curricular.clone(),
                    capacidade: line.to_string(),
                });
            }
        }
    }

    let resumo = format!(
        "{}/{} semanas concluidas ({}%) | {}/{} capacidades desenvolvidas ({}%)",
        progresso.completed_weeks,
        progresso.total_weeks,
        progresso.weeks_percent,
        progresso.completed_capacidades,
        progresso.total_capacidades,
        progresso.capacidades_percent,
    );

    let titulo = match turma {
        Some(t) => format!("Aula Planner Pro - {}", t.nome),
        None => "Aula Planner Pro - Cronograma Completo".to_string(),
    };

    ExportDocument {
        titulo,
        filename: export_filename(turma),
        colunas: colunas(turma.is_none()),
        linhas,
        resumo,
        capacidades_concluidas,
    }
}

/// Busca os dados e monta o documento para o utilizador (com filtro de
/// turma opcional).
pub async fn documento_para_user(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    turma_filter: Option<i64>,
) -> AppResult<ExportDocument> {
    let turma = match turma_filter {
        Some(id) => Some(
            turma_service::find_turma(db_pool, ctx, id)
                .await?
                .ok_or(crate::error::AppError::NotFound)?,
        ),
        None => None,
    };
    let schedules = schedule_service::list_schedules(db_pool, ctx, turma_filter).await?;
    Ok(build_document(turma.as_ref(), &schedules))
}

/// Registos para a exportação JSON direta.
pub async fn registos_para_user(
    db_pool: &SqlitePool,
    ctx: &Ctx,
    turma_filter: Option<i64>,
) -> AppResult<(String, Vec<ExportRecord>)> {
    let turma = match turma_filter {
        Some(id) => Some(
            turma_service::find_turma(db_pool, ctx, id)
                .await?
                .ok_or(crate::error::AppError::NotFound)?,
        ),
        None => None,
    };
    let schedules = schedule_service::list_schedules(db_pool, ctx, turma_filter).await?;
    let records = schedules.iter().map(ExportRecord::from).collect();
    Ok((export_filename(turma.as_ref()), records))
}
