// src/models/turma.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Espelha a tabela 'turmas'
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Turma {
    pub id: i64,
    pub user_id: i64,
    pub nome: String,
    pub descricao: String,
    pub cor: String,
    pub carga_horaria: i64,
    pub dias_aula: String, // lista separada por vírgulas, ex: "seg,qua"
    pub hora_inicio: String,
    pub hora_fim: String,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub active: bool,
}

/// Payload de criação/atualização parcial de turma.
#[derive(Debug, Default, Deserialize)]
pub struct TurmaPayload {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub cor: Option<String>,
    pub carga_horaria: Option<i64>,
    pub dias_aula: Option<String>,
    pub hora_inicio: Option<String>,
    pub hora_fim: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
}

/// Aplica a leniência de datas: string vazia limpa o campo, data válida
/// substitui, data malformada é ignorada em silêncio (mantém o anterior).
pub fn apply_date_field(current: Option<String>, incoming: Option<&str>) -> Option<String> {
    match incoming {
        None => current,
        Some("") => None,
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(_) => Some(s.to_string()),
            Err(_) => current,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_valida_substitui() {
        let atual = Some("2025-01-01".to_string());
        assert_eq!(
            apply_date_field(atual, Some("2025-03-15")),
            Some("2025-03-15".to_string())
        );
    }

    #[test]
    fn data_vazia_limpa() {
        let atual = Some("2025-01-01".to_string());
        assert_eq!(apply_date_field(atual, Some("")), None);
    }

    #[test]
    fn data_malformada_mantem_anterior() {
        let atual = Some("2025-01-01".to_string());
        assert_eq!(
            apply_date_field(atual.clone(), Some("15/03/2025")),
            atual
        );
        assert_eq!(apply_date_field(None, Some("abc")), None);
    }

    #[test]
    fn campo_ausente_nao_mexe() {
        let atual = Some("2025-01-01".to_string());
        assert_eq!(apply_date_field(atual.clone(), None), atual);
    }
}
