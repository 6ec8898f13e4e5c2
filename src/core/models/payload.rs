use serde::Deserialize;
use std::collections::BTreeMap;
use validator::Validate;

use super::question::{Alternative, Region};

/// A question body as sent by a client, for both create and update. Every
/// field is optional here; which ones are required depends on the mode and on
/// the type tag, and is decided by `core::validator`. Enumerated values are
/// kept as strings so that a bad value becomes a reported violation instead
/// of a parse failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuestionPayload {
    pub tipo_questao: Option<String>,
    #[validate(length(min = 10, max = 1000))]
    pub enunciado: Option<String>,
    pub nivel_dificuldade: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub tema_geografico: Option<String>,
    #[validate(length(min = 2, max = 5))]
    pub alternativas: Option<Vec<Alternative>>,
    #[validate(length(min = 10, max = 500))]
    pub afirmacao: Option<String>,
    pub resposta_correta: Option<bool>,
    pub colunas: Option<ColumnsPayload>,
    pub mapa: Option<MapPayload>,
    pub recursos_multimidia: Option<Vec<ResourcePayload>>,
    pub valor_pontos: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ColumnsPayload {
    #[validate(length(min = 2, max = 5))]
    pub coluna_a: Vec<String>,
    #[validate(length(min = 2, max = 5))]
    pub coluna_b: Vec<String>,
    pub correct_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MapPayload {
    #[validate(url)]
    pub image_url: String,
    pub clickable_regions: Vec<Region>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResourcePayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(url)]
    pub url: String,
}
