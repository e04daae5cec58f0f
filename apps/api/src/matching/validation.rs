use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::matching::QuizAnswer;

/// Strict boundary check for a submitted answer set.
///
/// FAIL conditions:
/// - No answers at all
/// - The same question answered twice
/// - Unknown question id, or an option id the question does not have
/// - `value` differs from the selected option's point value
///
/// The scorer tolerates all of these; the HTTP layer does not.
pub fn validate_answers(catalog: &Catalog, answers: &[QuizAnswer]) -> Result<(), AppError> {
    if answers.is_empty() {
        return Err(AppError::Validation("answers cannot be empty".to_string()));
    }

    let mut seen = HashSet::with_capacity(answers.len());
    for answer in answers {
        if !seen.insert(answer.question_id) {
            return Err(AppError::Validation(format!(
                "question {} answered more than once",
                answer.question_id
            )));
        }

        let question = catalog.question(answer.question_id).ok_or_else(|| {
            AppError::Validation(format!("unknown question id {}", answer.question_id))
        })?;

        let option = question.option(&answer.selected_option).ok_or_else(|| {
            AppError::Validation(format!(
                "unknown option '{}' for question {}",
                answer.selected_option, answer.question_id
            ))
        })?;

        if option.value != answer.value {
            return Err(AppError::Validation(format!(
                "value {} does not match option '{}' (expected {})",
                answer.value, option.id, option.value
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(question_id: u32, option: &str, value: u32) -> QuizAnswer {
        QuizAnswer {
            question_id,
            selected_option: option.to_string(),
            value,
        }
    }

    fn message(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_complete_quiz_passes() {
        let catalog = Catalog::embedded().unwrap();
        let answers: Vec<QuizAnswer> = (1..=6)
            .map(|id| answer(id, &format!("{id}b"), 3))
            .collect();
        assert!(validate_answers(&catalog, &answers).is_ok());
    }

    #[test]
    fn test_partial_quiz_passes() {
        let catalog = Catalog::embedded().unwrap();
        assert!(validate_answers(&catalog, &[answer(1, "1a", 3), answer(2, "2c", 3)]).is_ok());
    }

    #[test]
    fn test_empty_rejected() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(message(validate_answers(&catalog, &[])), "answers cannot be empty");
    }

    #[test]
    fn test_unknown_question_rejected() {
        let catalog = Catalog::embedded().unwrap();
        let msg = message(validate_answers(&catalog, &[answer(7, "7a", 3)]));
        assert!(msg.contains("unknown question id 7"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let catalog = Catalog::embedded().unwrap();
        let msg = message(validate_answers(&catalog, &[answer(1, "2a", 3)]));
        assert!(msg.contains("unknown option '2a'"));
    }

    #[test]
    fn test_wrong_value_rejected() {
        let catalog = Catalog::embedded().unwrap();
        let msg = message(validate_answers(&catalog, &[answer(1, "1a", 5)]));
        assert!(msg.contains("expected 3"));
    }

    #[test]
    fn test_duplicate_question_rejected() {
        let catalog = Catalog::embedded().unwrap();
        let msg = message(validate_answers(
            &catalog,
            &[answer(1, "1a", 3), answer(1, "1b", 3)],
        ));
        assert!(msg.contains("more than once"));
    }
}
