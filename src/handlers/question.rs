use actix_web::{
    web::{Data, Json, Path, Query},
    HttpResponse,
};

use crate::context::AuthorInfo;
use crate::core::models::payload::QuestionPayload;
use crate::core::models::question::{Question, QuestionSummary};
use crate::core::ports::repository::QuestionStore;
use crate::core::services::question::{create_question, delete_question, question_detail, questions, update_question};
use crate::error::Error;
use crate::request::ListParams;
use crate::response::Success;

pub async fn list<S>(author: AuthorInfo, Query(params): Query<ListParams>, storer: Data<S>) -> Result<Json<Success<Vec<QuestionSummary>>>, Error>
where
    S: QuestionStore + 'static,
{
    let list = questions(storer.get_ref(), &author.id, params.into())?;
    Ok(Json(Success::new(list)))
}

pub async fn create<S>(author: AuthorInfo, storer: Data<S>, Json(payload): Json<QuestionPayload>) -> Result<HttpResponse, Error>
where
    S: QuestionStore + 'static,
{
    let question = create_question(storer.get_ref(), &author.id, payload)?;
    Ok(HttpResponse::Created().json(Success::new(question)))
}

pub async fn detail<S>(author: AuthorInfo, id: Path<String>, storer: Data<S>) -> Result<Json<Success<Question>>, Error>
where
    S: QuestionStore + 'static,
{
    let question = question_detail(storer.get_ref(), &author.id, &id.into_inner())?;
    Ok(Json(Success::new(question)))
}

pub async fn update<S>(author: AuthorInfo, id: Path<String>, storer: Data<S>, Json(payload): Json<QuestionPayload>) -> Result<Json<Success<Question>>, Error>
where
    S: QuestionStore + 'static,
{
    let question = update_question(storer.get_ref(), &author.id, &id.into_inner(), payload)?;
    Ok(Json(Success::new(question)))
}

pub async fn delete<S>(author: AuthorInfo, id: Path<String>, storer: Data<S>) -> Result<HttpResponse, Error>
where
    S: QuestionStore + 'static,
{
    delete_question(storer.get_ref(), &author.id, &id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
