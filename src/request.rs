use serde::Deserialize;

use crate::core::models::question::Query as QuestionQuery;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub tipo: Option<String>,
    pub tema: Option<String>,
    pub dificuldade: Option<String>,
}

impl From<ListParams> for QuestionQuery {
    fn from(p: ListParams) -> Self {
        QuestionQuery::new(p.tipo, p.tema, p.dificuldade)
    }
}
