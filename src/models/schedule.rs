// src/models/schedule.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Espelha a tabela 'schedules' (uma semana do cronograma de uma turma)
#[derive(Debug, Clone, FromRow)]
pub struct Schedule {
    pub id: i64,
    pub user_id: i64,
    pub turma_id: i64,
    pub semana: i64,
    pub atividades: String,
    pub unidade_curricular: String,
    pub capacidades: String, // uma capacidade por linha
    pub conhecimentos: String,
    pub recursos: String, // lista separada por vírgulas
    pub completed: bool,
    // Conjunto de índices concluídos, guardado como "0,2,5".
    // Os índices referem-se às linhas não vazias de `capacidades` e NÃO
    // são revalidados quando o texto muda: índices fora do intervalo
    // ficam guardados mas inertes.
    pub capacidades_completed: String,
}

// Linha devolvida pela API: schedule + nome/cor da turma juntados na leitura
// (a turma é a fonte de verdade do nome; nada é duplicado no registo)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleWithTurma {
    pub id: i64,
    pub turma_id: i64,
    pub turma_nome: String,
    pub turma_cor: String,
    pub semana: i64,
    pub atividades: String,
    #[serde(rename = "unidadeCurricular")]
    pub unidade_curricular: String,
    pub capacidades: String,
    pub conhecimentos: String,
    pub recursos: String,
    pub completed: bool,
    pub capacidades_completed: String,
}

/// Payload de criação/edição de semana. Na edição, `turma_id` e `semana`
/// são ignorados (só os campos de conteúdo são mutáveis por esta via).
#[derive(Debug, Default, Deserialize)]
pub struct SchedulePayload {
    pub turma_id: Option<i64>,
    pub semana: Option<i64>,
    pub atividades: Option<String>,
    #[serde(rename = "unidadeCurricular")]
    pub unidade_curricular: Option<String>,
    pub capacidades: Option<String>,
    pub conhecimentos: Option<String>,
    pub recursos: Option<String>,
}

// O frontend envia o índice como número ou string; normalizamos depois.
#[derive(Debug, Deserialize)]
pub struct ToggleCapacidadePayload {
    pub index: Option<serde_json::Value>,
}

impl ToggleCapacidadePayload {
    /// Normaliza o índice para a sua forma de string (é assim que o
    /// conjunto guardado compara membros).
    pub fn index_as_string(&self) -> Option<String> {
        match &self.index {
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                Some(s.trim().to_string())
            }
            _ => None,
        }
    }
}

/// Divide o texto de capacidades nas suas linhas úteis (trim, sem vazias).
/// É esta divisão que define a que linha cada índice se refere.
pub fn split_capacidades(texto: &str) -> Vec<&str> {
    texto
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Interpreta o conjunto de índices concluídos ("0,2,5" → ["0","2","5"]),
/// descartando entradas vazias e preservando a ordem de inserção.
pub fn parse_completed_set(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Alterna a presença de `index` no conjunto: remove se for membro,
/// acrescenta no fim caso contrário. Sem verificação de limites e sem
/// renumeração — a comparação é pela forma de string.
pub fn toggle_index(set: &mut Vec<String>, index: &str) {
    if let Some(pos) = set.iter().position(|m| m == index) {
        set.remove(pos);
    } else {
        set.push(index.to_string());
    }
}

pub fn serialize_completed_set(set: &[String]) -> String {
    set.join(",")
}

impl Schedule {
    pub fn capacidade_lines(&self) -> Vec<&str> {
        split_capacidades(&self.capacidades)
    }

    pub fn completed_set(&self) -> Vec<String> {
        parse_completed_set(&self.capacidades_completed)
    }
}
