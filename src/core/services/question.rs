use uuid::Uuid;

use crate::{
    core::{
        models::{
            payload::QuestionPayload,
            question::{Query, Question, QuestionSummary},
        },
        ports::repository::QuestionStore,
        validator::{validate_create, validate_update},
    },
    error::Error,
};

// ids that are not UUIDs cannot name a stored question
fn parse_id(id: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(id).map_err(|_| Error::question_not_found())
}

fn rejected(uid: &str, err: Error) -> Error {
    log::debug!("rejected question payload from {}: {:?}", uid, err.violations());
    err
}

pub fn create_question<S>(storer: &S, uid: &str, payload: QuestionPayload) -> Result<Question, Error>
where
    S: QuestionStore,
{
    let question = validate_create(payload).map_err(|e| rejected(uid, e))?;
    let question = storer.create(uid, question)?;
    log::info!("question {} ({}) created by {}", question.id, question.question_type().as_str(), uid);
    Ok(question)
}

pub fn questions<S>(storer: &S, uid: &str, query: Query) -> Result<Vec<QuestionSummary>, Error>
where
    S: QuestionStore,
{
    storer.list(uid, &query)
}

pub fn question_detail<S>(storer: &S, uid: &str, id: &str) -> Result<Question, Error>
where
    S: QuestionStore,
{
    let id = parse_id(id)?;
    storer.get(uid, id)?.ok_or_else(Error::question_not_found)
}

pub fn update_question<S>(storer: &S, uid: &str, id: &str, payload: QuestionPayload) -> Result<Question, Error>
where
    S: QuestionStore,
{
    let patch = validate_update(payload).map_err(|e| rejected(uid, e))?;
    let id = parse_id(id)?;
    let question = storer.update(uid, id, patch)?.ok_or_else(Error::question_not_found)?;
    log::info!("question {} updated by {}", question.id, uid);
    Ok(question)
}

pub fn delete_question<S>(storer: &S, uid: &str, id: &str) -> Result<(), Error>
where
    S: QuestionStore,
{
    let id = parse_id(id)?;
    if !storer.delete(uid, id)? {
        return Err(Error::question_not_found());
    }
    log::info!("question {} deleted by {}", id, uid);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::impls::store::mem::MemStore;
    use serde_json::json;

    fn capital_of_france() -> QuestionPayload {
        serde_json::from_value(json!({
            "tipo_questao": "multipla_escolha",
            "enunciado": "Qual é a capital da França?",
            "nivel_dificuldade": "facil",
            "tema_geografico": "Países",
            "valor_pontos": 2,
            "alternativas": [{"text": "Paris", "isCorrect": true}, {"text": "Lyon", "isCorrect": false}],
        }))
        .unwrap()
    }

    fn is_not_found<T: std::fmt::Debug>(r: Result<T, Error>) -> bool {
        matches!(r, Err(Error::NotFound(_)))
    }

    #[test]
    fn test_scenario() {
        let storer = MemStore::new();
        let created = create_question(&storer, "prof", capital_of_france()).unwrap();
        let id = created.id.to_string();

        let listed = questions(&storer, "prof", Query::new(Some("multipla_escolha".into()), None, None)).unwrap();
        assert_eq!(listed, vec![QuestionSummary::from(&created)]);

        delete_question(&storer, "prof", &id).unwrap();
        assert!(is_not_found(question_detail(&storer, "prof", &id)));
    }

    #[test]
    fn test_invalid_payload_is_not_stored() {
        let storer = MemStore::new();
        let err = create_question(&storer, "prof", QuestionPayload::default()).unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        assert!(questions(&storer, "prof", Query::default()).unwrap().is_empty());
    }

    #[test]
    fn test_foreign_and_malformed_ids_are_not_found() {
        let storer = MemStore::new();
        let id = create_question(&storer, "prof", capital_of_france()).unwrap().id.to_string();
        let empty = || QuestionPayload::default();

        assert!(is_not_found(question_detail(&storer, "other", &id)));
        assert!(is_not_found(update_question(&storer, "other", &id, empty())));
        assert!(is_not_found(delete_question(&storer, "other", &id)));
        assert!(is_not_found(question_detail(&storer, "prof", "not-a-uuid")));
        assert!(is_not_found(delete_question(&storer, "prof", &Uuid::new_v4().to_string())));
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let storer = MemStore::new();
        let payload: QuestionPayload = serde_json::from_value(json!({"valor_pontos": 0})).unwrap();
        let err = update_question(&storer, "prof", "missing", payload).unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[test]
    fn test_empty_update_keeps_record() {
        let storer = MemStore::new();
        let created = create_question(&storer, "prof", capital_of_france()).unwrap();
        let id = created.id.to_string();
        let updated = update_question(&storer, "prof", &id, QuestionPayload::default()).unwrap();
        assert_eq!(updated, created);
        assert_eq!(question_detail(&storer, "prof", &id).unwrap(), created);
    }

    fn update(v: serde_json::Value) -> QuestionPayload {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_same_type_tag_with_envelope_only() {
        let storer = MemStore::new();
        let created = create_question(&storer, "prof", capital_of_france()).unwrap();
        let id = created.id.to_string();
        let updated = update_question(
            &storer,
            "prof",
            &id,
            update(json!({"tipo_questao": "multipla_escolha", "enunciado": "Qual é a capital da Espanha?"})),
        )
        .unwrap();
        assert_eq!(updated.statement, "Qual é a capital da Espanha?");
        assert_eq!(updated.body, created.body);
    }

    #[test]
    fn test_variant_field_without_tag_merges() {
        let storer = MemStore::new();
        let id = create_question(&storer, "prof", capital_of_france()).unwrap().id.to_string();
        let alternatives = json!([
            {"text": "Madri", "isCorrect": true},
            {"text": "Barcelona", "isCorrect": false},
            {"text": "Sevilha", "isCorrect": false},
        ]);
        let updated = update_question(&storer, "prof", &id, update(json!({"alternativas": alternatives.clone()}))).unwrap();
        let v = serde_json::to_value(&updated).unwrap();
        assert_eq!(v["tipo_questao"], "multipla_escolha");
        assert_eq!(v["alternativas"], alternatives);

        let err = update_question(&storer, "prof", &id, update(json!({"resposta_correta": true}))).unwrap_err();
        assert_eq!(err.violations()[0].field, "resposta_correta");
        assert_eq!(err.violations()[0].code, "not_allowed");
    }

    #[test]
    fn test_type_change_needs_full_payload() {
        let storer = MemStore::new();
        let created = create_question(&storer, "prof", capital_of_france()).unwrap();
        let id = created.id.to_string();
        let err = update_question(
            &storer,
            "prof",
            &id,
            update(json!({"tipo_questao": "verdadeiro_falso", "afirmacao": "Paris é a capital da França."})),
        )
        .unwrap_err();
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["resposta_correta"]);
        assert_eq!(question_detail(&storer, "prof", &id).unwrap(), created);
    }

    #[test]
    fn test_type_change_replaces_body() {
        let storer = MemStore::new();
        let id = create_question(&storer, "prof", capital_of_france()).unwrap().id.to_string();
        let payload: QuestionPayload = serde_json::from_value(json!({
            "tipo_questao": "verdadeiro_falso",
            "afirmacao": "Paris é a capital da França.",
            "resposta_correta": true,
        }))
        .unwrap();
        let updated = update_question(&storer, "prof", &id, payload).unwrap();
        let v = serde_json::to_value(&updated).unwrap();
        assert_eq!(v["tipo_questao"], "verdadeiro_falso");
        assert!(v.get("alternativas").is_none());
        assert_eq!(v["enunciado"], "Qual é a capital da França?");
    }
}
