use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::Violation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "multipla_escolha")]
    MultipleChoice,
    #[serde(rename = "verdadeiro_falso")]
    TrueFalse,
    #[serde(rename = "associacao_colunas")]
    ColumnMatching,
    #[serde(rename = "mapa_interativo")]
    InteractiveMap,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [QuestionType::MultipleChoice, QuestionType::TrueFalse, QuestionType::ColumnMatching, QuestionType::InteractiveMap];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multipla_escolha",
            QuestionType::TrueFalse => "verdadeiro_falso",
            QuestionType::ColumnMatching => "associacao_colunas",
            QuestionType::InteractiveMap => "mapa_interativo",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "facil")]
    Easy,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "dificil")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "facil",
            Difficulty::Medium => "medio",
            Difficulty::Hard => "dificil",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            "audio" => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Columns {
    #[serde(rename = "coluna_a")]
    pub column_a: Vec<String>,
    #[serde(rename = "coluna_b")]
    pub column_b: Vec<String>,
    pub correct_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub coordinates: Vec<f64>,
    pub correct_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractiveMap {
    pub image_url: String,
    pub clickable_regions: Vec<Region>,
}

/// The part of a question that depends on its type. Serialized flat into the
/// record, with `tipo_questao` as the tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tipo_questao")]
pub enum QuestionBody {
    #[serde(rename = "multipla_escolha")]
    MultipleChoice {
        #[serde(rename = "alternativas")]
        alternatives: Vec<Alternative>,
    },
    #[serde(rename = "verdadeiro_falso")]
    TrueFalse {
        #[serde(rename = "afirmacao")]
        statement: String,
        #[serde(rename = "resposta_correta")]
        answer: bool,
    },
    #[serde(rename = "associacao_colunas")]
    ColumnMatching {
        #[serde(rename = "colunas")]
        columns: Columns,
    },
    #[serde(rename = "mapa_interativo")]
    InteractiveMap {
        #[serde(rename = "mapa")]
        map: InteractiveMap,
    },
}

impl QuestionBody {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionBody::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionBody::TrueFalse { .. } => QuestionType::TrueFalse,
            QuestionBody::ColumnMatching { .. } => QuestionType::ColumnMatching,
            QuestionBody::InteractiveMap { .. } => QuestionType::InteractiveMap,
        }
    }

    /// Builds a body of the given type from scratch. Every field the type needs
    /// must be present and no field of another type may be.
    pub fn build(type_: QuestionType, fields: BodyFields) -> Result<QuestionBody, Vec<Violation>> {
        let mut violations = fields.foreign(type_);
        let required = |field: &str, message: &str| Violation::new(field, "required", message);
        let body = match type_ {
            QuestionType::MultipleChoice => match fields.alternatives {
                Some(alternatives) => Some(QuestionBody::MultipleChoice { alternatives }),
                None => {
                    violations.push(required("alternativas", "Questões de múltipla escolha devem ter alternativas"));
                    None
                }
            },
            QuestionType::TrueFalse => match (fields.statement, fields.answer) {
                (Some(statement), Some(answer)) => Some(QuestionBody::TrueFalse { statement, answer }),
                (statement, answer) => {
                    let message = "Questões de verdadeiro/falso devem ter afirmação e resposta correta";
                    if statement.is_none() {
                        violations.push(required("afirmacao", message));
                    }
                    if answer.is_none() {
                        violations.push(required("resposta_correta", message));
                    }
                    None
                }
            },
            QuestionType::ColumnMatching => match fields.columns {
                Some(columns) => Some(QuestionBody::ColumnMatching { columns }),
                None => {
                    violations.push(required("colunas", "Questões de associação devem ter colunas definidas"));
                    None
                }
            },
            QuestionType::InteractiveMap => match fields.map {
                Some(map) => Some(QuestionBody::InteractiveMap { map }),
                None => {
                    violations.push(required("mapa", "Questões de mapa interativo devem ter dados do mapa"));
                    None
                }
            },
        };
        match body {
            Some(body) if violations.is_empty() => Ok(body),
            _ => Err(violations),
        }
    }

    /// Resolves an update against this body. When the type stays the same the
    /// present fields are merged over the current ones, and `colunas`/`mapa`
    /// are replaced whole. A type change needs the full payload of the new type.
    pub fn patched(&self, type_: Option<QuestionType>, fields: BodyFields) -> Result<QuestionBody, Vec<Violation>> {
        let target = type_.unwrap_or_else(|| self.question_type());
        if target != self.question_type() {
            return QuestionBody::build(target, fields);
        }
        let violations = fields.foreign(target);
        if !violations.is_empty() {
            return Err(violations);
        }
        let mut body = self.clone();
        match &mut body {
            QuestionBody::MultipleChoice { alternatives } => {
                if let Some(new) = fields.alternatives {
                    *alternatives = new;
                }
            }
            QuestionBody::TrueFalse { statement, answer } => {
                if let Some(new) = fields.statement {
                    *statement = new;
                }
                if let Some(new) = fields.answer {
                    *answer = new;
                }
            }
            QuestionBody::ColumnMatching { columns } => {
                if let Some(new) = fields.columns {
                    *columns = new;
                }
            }
            QuestionBody::InteractiveMap { map } => {
                if let Some(new) = fields.map {
                    *map = new;
                }
            }
        }
        Ok(body)
    }
}

/// Type-dependent fields that passed their own checks, before they are tied
/// to a question type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyFields {
    pub alternatives: Option<Vec<Alternative>>,
    pub statement: Option<String>,
    pub answer: Option<bool>,
    pub columns: Option<Columns>,
    pub map: Option<InteractiveMap>,
}

impl BodyFields {
    fn present(&self) -> Vec<(&'static str, QuestionType)> {
        let mut present = Vec::new();
        if self.alternatives.is_some() {
            present.push(("alternativas", QuestionType::MultipleChoice));
        }
        if self.statement.is_some() {
            present.push(("afirmacao", QuestionType::TrueFalse));
        }
        if self.answer.is_some() {
            present.push(("resposta_correta", QuestionType::TrueFalse));
        }
        if self.columns.is_some() {
            present.push(("colunas", QuestionType::ColumnMatching));
        }
        if self.map.is_some() {
            present.push(("mapa", QuestionType::InteractiveMap));
        }
        present
    }

    fn foreign(&self, type_: QuestionType) -> Vec<Violation> {
        self.present()
            .into_iter()
            .filter(|(_, owner)| *owner != type_)
            .map(|(field, _)| Violation::new(field, "not_allowed", format!("Campo não permitido em questões do tipo {}", type_.as_str())))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    #[serde(rename = "id_questao")]
    pub id: Uuid,
    #[serde(flatten)]
    pub body: QuestionBody,
    #[serde(rename = "enunciado")]
    pub statement: String,
    #[serde(rename = "nivel_dificuldade")]
    pub difficulty: Difficulty,
    #[serde(rename = "tema_geografico")]
    pub theme: String,
    #[serde(rename = "recursos_multimidia", skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
    #[serde(rename = "valor_pontos")]
    pub points: f64,
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "id_professor")]
    pub author_id: String,
}

impl Question {
    pub fn new(id: Uuid, author_id: &str, created_at: DateTime<Utc>, question: Insert) -> Self {
        Question {
            id,
            body: question.body,
            statement: question.statement,
            difficulty: question.difficulty,
            theme: question.theme,
            resources: question.resources,
            points: question.points,
            created_at,
            author_id: author_id.into(),
        }
    }

    pub fn question_type(&self) -> QuestionType {
        self.body.question_type()
    }

    /// Overwrites every field present in the patch; nested values are replaced whole.
    /// The id, owner and creation time are never touched. A patch whose
    /// type-dependent fields do not fit the record leaves it unchanged.
    pub fn apply(&mut self, patch: Patch) -> Result<(), Vec<Violation>> {
        self.body = self.body.patched(patch.type_, patch.body)?;
        if let Some(statement) = patch.statement {
            self.statement = statement;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(resources) = patch.resources {
            self.resources = Some(resources);
        }
        if let Some(points) = patch.points {
            self.points = points;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSummary {
    #[serde(rename = "id_questao")]
    pub id: Uuid,
    #[serde(rename = "tipo_questao")]
    pub type_: QuestionType,
    #[serde(rename = "enunciado")]
    pub statement: String,
    #[serde(rename = "nivel_dificuldade")]
    pub difficulty: Difficulty,
    #[serde(rename = "tema_geografico")]
    pub theme: String,
    #[serde(rename = "valor_pontos")]
    pub points: f64,
    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,
}

impl From<&Question> for QuestionSummary {
    fn from(q: &Question) -> Self {
        QuestionSummary {
            id: q.id,
            type_: q.question_type(),
            statement: q.statement.clone(),
            difficulty: q.difficulty,
            theme: q.theme.clone(),
            points: q.points,
            created_at: q.created_at,
        }
    }
}

/// A validated question ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub body: QuestionBody,
    pub statement: String,
    pub difficulty: Difficulty,
    pub theme: String,
    pub resources: Option<Vec<Resource>>,
    pub points: f64,
}

/// A validated partial update. The type-dependent part can only be resolved
/// against the stored record, see `QuestionBody::patched`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Patch {
    pub type_: Option<QuestionType>,
    pub body: BodyFields,
    pub statement: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub theme: Option<String>,
    pub resources: Option<Vec<Resource>>,
    pub points: Option<f64>,
}

/// List filters. Every filter that is set must match; values are compared
/// against the wire names, so an unknown value matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub type_eq: Option<String>,
    pub theme_eq: Option<String>,
    pub difficulty_eq: Option<String>,
}

impl Query {
    pub fn new(type_eq: Option<String>, theme_eq: Option<String>, difficulty_eq: Option<String>) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());
        Query {
            type_eq: present(type_eq),
            theme_eq: present(theme_eq),
            difficulty_eq: present(difficulty_eq),
        }
    }

    pub fn matches(&self, q: &Question) -> bool {
        self.type_eq.as_deref().map_or(true, |t| q.question_type().as_str() == t)
            && self.theme_eq.as_deref().map_or(true, |t| q.theme == t)
            && self.difficulty_eq.as_deref().map_or(true, |d| q.difficulty.as_str() == d)
    }
}
