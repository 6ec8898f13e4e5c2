use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::models::payload::{ColumnsPayload, MapPayload, QuestionPayload, ResourcePayload};
use crate::core::models::question::{Alternative, BodyFields, Columns, Difficulty, Insert, InteractiveMap, MediaKind, Patch, QuestionBody, QuestionType, Resource};
use crate::error::{Error, Violation};

/// Checks a create payload: the envelope is mandatory and the variant fields of
/// the declared type must be present, while those of other types must not be.
pub fn validate_create(payload: QuestionPayload) -> Result<Insert, Error> {
    let mut checker = Checker::new();
    let fields = checker.envelope(payload);
    let variant = checker.variant(fields.variant);
    let body = fields.type_.and_then(|t| match QuestionBody::build(t, variant) {
        Ok(body) => Some(body),
        Err(violations) => {
            checker.merge(violations);
            None
        }
    });
    let required = |name: &'static str| Violation::new(name, "required", "Campo obrigatório");
    match (body, fields.statement, fields.difficulty, fields.theme, fields.points) {
        (Some(body), Some(statement), Some(difficulty), Some(theme), Some(points)) if checker.violations.is_empty() => Ok(Insert {
            body,
            statement,
            difficulty,
            theme,
            resources: fields.resources,
            points,
        }),
        (_, statement, difficulty, theme, points) => {
            if !fields.type_seen {
                checker.violations.push(required("tipo_questao"));
            }
            if statement.is_none() && !fields.statement_seen {
                checker.violations.push(required("enunciado"));
            }
            if difficulty.is_none() && !fields.difficulty_seen {
                checker.violations.push(required("nivel_dificuldade"));
            }
            if theme.is_none() && !fields.theme_seen {
                checker.violations.push(required("tema_geografico"));
            }
            if points.is_none() && !fields.points_seen {
                checker.violations.push(required("valor_pontos"));
            }
            Err(Error::ValidationError(checker.violations))
        }
    }
}

/// Checks an update payload. Every field is optional, but whatever is present
/// obeys the create rules. Whether the type-dependent fields fit is decided
/// against the stored record, by `QuestionBody::patched`.
pub fn validate_update(payload: QuestionPayload) -> Result<Patch, Error> {
    let mut checker = Checker::new();
    let fields = checker.envelope(payload);
    let body = checker.variant(fields.variant);
    if !checker.violations.is_empty() {
        return Err(Error::ValidationError(checker.violations));
    }
    Ok(Patch {
        type_: fields.type_,
        body,
        statement: fields.statement,
        difficulty: fields.difficulty,
        theme: fields.theme,
        resources: fields.resources,
        points: fields.points,
    })
}

struct Variant {
    alternatives: Option<Vec<Alternative>>,
    statement: Option<String>,
    answer: Option<bool>,
    columns: Option<ColumnsPayload>,
    map: Option<MapPayload>,
}

/// Envelope values that passed their own checks. `*_seen` records that the
/// client sent the field at all, so a rejected value is not also reported as
/// missing.
struct Fields {
    type_: Option<QuestionType>,
    type_seen: bool,
    statement: Option<String>,
    statement_seen: bool,
    difficulty: Option<Difficulty>,
    difficulty_seen: bool,
    theme: Option<String>,
    theme_seen: bool,
    points: Option<f64>,
    points_seen: bool,
    resources: Option<Vec<Resource>>,
    variant: Variant,
}

struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn new() -> Self {
        Checker { violations: Vec::new() }
    }

    fn invalid(&mut self, field: impl Into<String>, code: &str, message: impl Into<String>) {
        self.violations.push(Violation::new(field, code, message));
    }

    fn collect(&mut self, prefix: &str, result: Result<(), ValidationErrors>) -> bool {
        let errors = match result {
            Ok(()) => return true,
            Err(errors) => errors,
        };
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, errs) in fields {
            for err in errs.iter() {
                self.invalid(format!("{}{}", prefix, field), &err.code, describe(err));
            }
        }
        false
    }

    fn envelope(&mut self, payload: QuestionPayload) -> Fields {
        let top = payload.validate();
        let mut rejected: Vec<String> = Vec::new();
        if let Err(errors) = &top {
            rejected = errors.field_errors().keys().map(|k| k.to_string()).collect();
        }
        self.collect("", top);
        let ok = |name: &str| !rejected.iter().any(|r| r == name);

        let QuestionPayload {
            tipo_questao,
            enunciado,
            nivel_dificuldade,
            tema_geografico,
            alternativas,
            afirmacao,
            resposta_correta,
            colunas,
            mapa,
            recursos_multimidia,
            valor_pontos,
        } = payload;

        let type_seen = tipo_questao.is_some();
        let type_ = tipo_questao.and_then(|t| {
            let parsed = QuestionType::parse(&t);
            if parsed.is_none() {
                self.invalid("tipo_questao", "enum", format!("Tipo de questão inválido: {}", t));
            }
            parsed
        });
        let difficulty_seen = nivel_dificuldade.is_some();
        let difficulty = nivel_dificuldade.and_then(|d| {
            let parsed = Difficulty::parse(&d);
            if parsed.is_none() {
                self.invalid("nivel_dificuldade", "enum", format!("Nível de dificuldade inválido: {}", d));
            }
            parsed
        });
        let points_seen = valor_pontos.is_some();
        let points = valor_pontos.filter(|p| {
            let positive = *p > 0.0 && p.is_finite();
            if !positive {
                self.invalid("valor_pontos", "positive", "Deve ser um número maior que zero");
            }
            positive
        });
        let resources = recursos_multimidia.and_then(|r| self.resources(r));

        Fields {
            type_,
            type_seen,
            statement_seen: enunciado.is_some(),
            statement: enunciado.filter(|_| ok("enunciado")),
            difficulty,
            difficulty_seen,
            theme_seen: tema_geografico.is_some(),
            theme: tema_geografico.filter(|_| ok("tema_geografico")),
            points,
            points_seen,
            resources,
            variant: Variant {
                alternatives: alternativas.filter(|_| ok("alternativas")),
                statement: afirmacao.filter(|_| ok("afirmacao")),
                answer: resposta_correta,
                columns: colunas,
                map: mapa,
            },
        }
    }

    fn resources(&mut self, payloads: Vec<ResourcePayload>) -> Option<Vec<Resource>> {
        let before = self.violations.len();
        let mut resources = Vec::with_capacity(payloads.len());
        for (i, p) in payloads.into_iter().enumerate() {
            let prefix = format!("recursos_multimidia[{}].", i);
            let url_ok = self.collect(&prefix, p.validate());
            match MediaKind::parse(&p.kind) {
                Some(kind) if url_ok => resources.push(Resource { kind, url: p.url }),
                Some(_) => {}
                None => self.invalid(format!("{}type", prefix), "enum", format!("Tipo de recurso inválido: {}", p.kind)),
            }
        }
        (self.violations.len() == before).then_some(resources)
    }

    fn columns(&mut self, payload: ColumnsPayload) -> Option<Columns> {
        self.collect("colunas.", payload.validate()).then(|| Columns {
            column_a: payload.coluna_a,
            column_b: payload.coluna_b,
            correct_mapping: payload.correct_mapping,
        })
    }

    fn map(&mut self, payload: MapPayload) -> Option<InteractiveMap> {
        self.collect("mapa.", payload.validate()).then(|| InteractiveMap {
            image_url: payload.image_url,
            clickable_regions: payload.clickable_regions,
        })
    }

    fn variant(&mut self, variant: Variant) -> BodyFields {
        BodyFields {
            alternatives: variant.alternatives,
            statement: variant.statement,
            answer: variant.answer,
            columns: variant.columns.and_then(|c| self.columns(c)),
            map: variant.map.and_then(|m| self.map(m)),
        }
    }

    /// Adds violations found once the fields are tied to a type, skipping
    /// fields whose value was already rejected.
    fn merge(&mut self, violations: Vec<Violation>) {
        for v in violations {
            let nested = format!("{}.", v.field);
            if !self.violations.iter().any(|r| r.field == v.field || r.field.starts_with(&nested)) {
                self.violations.push(v);
            }
        }
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match &*err.code {
        "length" => match (err.params.get("min"), err.params.get("max")) {
            (Some(min), Some(max)) => format!("Tamanho deve estar entre {} e {}", min, max),
            (Some(min), None) => format!("Tamanho mínimo é {}", min),
            (None, Some(max)) => format!("Tamanho máximo é {}", max),
            (None, None) => "Tamanho inválido".into(),
        },
        "url" => "Deve ser uma URL válida".into(),
        code => format!("Valor inválido ({})", code),
    }
}
