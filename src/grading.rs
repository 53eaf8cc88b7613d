// src/grading.rs

use std::collections::{HashMap, HashSet};

use crate::models::{question::Question, result::SubmittedAnswer};

/// Counts and letter grade for one graded submission.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeOutcome {
    pub total_questions: i32,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    pub score_percentage: f64,
    pub grade: &'static str,
}

/// Maps a score percentage to a letter grade. Lower bounds are inclusive:
/// exactly 90.0 is still an "A+".
pub fn letter_grade(score_percentage: f64) -> &'static str {
    if score_percentage >= 90.0 {
        "A+"
    } else if score_percentage >= 80.0 {
        "A"
    } else if score_percentage >= 70.0 {
        "B"
    } else if score_percentage >= 60.0 {
        "C"
    } else {
        "F"
    }
}

/// Grades a submission against the authoritative question set.
///
/// A question counts as correct when any submitted answer for its id names
/// the question's correct option. Each question counts at most once, so
/// duplicate submissions cannot inflate the score and the outcome does not
/// depend on submission order. Answers naming unknown question ids are
/// ignored. The total is always the size of the question set, never the
/// answer count.
pub fn grade(questions: &[Question], answers: &[SubmittedAnswer]) -> GradeOutcome {
    let answer_key: HashMap<i64, &str> = questions
        .iter()
        .map(|q| (q.id, q.correct_option.as_str()))
        .collect();

    let mut correct_ids: HashSet<i64> = HashSet::new();
    for answer in answers {
        if let Some(correct_option) = answer_key.get(&answer.question_id) {
            if answer.option.eq_ignore_ascii_case(correct_option) {
                correct_ids.insert(answer.question_id);
            }
        }
    }

    let total_questions = questions.len() as i32;
    let correct_answers = correct_ids.len() as i32;
    let incorrect_answers = total_questions - correct_answers;

    let score_percentage = if total_questions > 0 {
        f64::from(correct_answers) / f64::from(total_questions) * 100.0
    } else {
        0.0
    };

    GradeOutcome {
        total_questions,
        correct_answers,
        incorrect_answers,
        score_percentage,
        grade: letter_grade(score_percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, correct_option: &str) -> Question {
        Question {
            id,
            quiz_id: 1,
            prompt: format!("Question {}", id),
            option_a: "a".to_string(),
            option_b: "b".to_string(),
            option_c: "c".to_string(),
            option_d: "d".to_string(),
            correct_option: correct_option.to_string(),
        }
    }

    fn answer(question_id: i64, option: &str) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id,
            option: option.to_string(),
        }
    }

    #[test]
    fn test_letter_grade_boundaries_inclusive() {
        assert_eq!(letter_grade(100.0), "A+");
        assert_eq!(letter_grade(90.0), "A+");
        assert_eq!(letter_grade(89.999), "A");
        assert_eq!(letter_grade(80.0), "A");
        assert_eq!(letter_grade(79.999), "B");
        assert_eq!(letter_grade(70.0), "B");
        assert_eq!(letter_grade(60.0), "C");
        assert_eq!(letter_grade(59.999), "F");
        assert_eq!(letter_grade(0.0), "F");
    }

    #[test]
    fn test_grade_empty_quiz_never_divides_by_zero() {
        let outcome = grade(&[], &[answer(1, "A")]);
        assert_eq!(outcome.total_questions, 0);
        assert_eq!(outcome.correct_answers, 0);
        assert_eq!(outcome.incorrect_answers, 0);
        assert_eq!(outcome.score_percentage, 0.0);
        assert_eq!(outcome.grade, "F");
    }

    #[test]
    fn test_grade_half_correct_scenario() {
        // Two questions with correct options B and C; submission answers
        // q1 with B (right) and q2 with A (wrong).
        let questions = [question(1, "B"), question(2, "C")];
        let answers = [answer(1, "B"), answer(2, "A")];

        let outcome = grade(&questions, &answers);
        assert_eq!(outcome.correct_answers, 1);
        assert_eq!(outcome.incorrect_answers, 1);
        assert_eq!(outcome.total_questions, 2);
        assert_eq!(outcome.score_percentage, 50.0);
        assert_eq!(outcome.grade, "F");
    }

    #[test]
    fn test_grade_total_comes_from_question_set() {
        // Three questions, only one answered. Unanswered questions count
        // as incorrect via the total.
        let questions = [question(1, "A"), question(2, "B"), question(3, "C")];
        let answers = [answer(1, "A")];

        let outcome = grade(&questions, &answers);
        assert_eq!(outcome.total_questions, 3);
        assert_eq!(outcome.correct_answers, 1);
        assert_eq!(outcome.incorrect_answers, 2);
    }

    #[test]
    fn test_grade_ignores_unknown_question_ids() {
        let questions = [question(1, "A")];
        let answers = [answer(1, "A"), answer(99, "A")];

        let outcome = grade(&questions, &answers);
        assert_eq!(outcome.total_questions, 1);
        assert_eq!(outcome.correct_answers, 1);
        assert_eq!(outcome.incorrect_answers, 0);
        assert_eq!(outcome.score_percentage, 100.0);
    }

    #[test]
    fn test_grade_duplicate_answers_count_once() {
        let questions = [question(1, "A"), question(2, "B")];
        let answers = [answer(1, "A"), answer(1, "A"), answer(1, "A")];

        let outcome = grade(&questions, &answers);
        assert_eq!(outcome.correct_answers, 1);
        assert_eq!(outcome.incorrect_answers, 1);
    }

    #[test]
    fn test_grade_is_order_independent() {
        let questions = [question(1, "A"), question(2, "B"), question(3, "C")];
        let forward = [answer(1, "A"), answer(2, "D"), answer(3, "C")];
        let reversed = [answer(3, "C"), answer(2, "D"), answer(1, "A")];

        assert_eq!(grade(&questions, &forward), grade(&questions, &reversed));
    }

    #[test]
    fn test_grade_option_id_case_insensitive() {
        let questions = [question(1, "B")];
        let answers = [answer(1, "b")];

        let outcome = grade(&questions, &answers);
        assert_eq!(outcome.correct_answers, 1);
    }

    #[test]
    fn test_grade_thresholds_over_full_quiz() {
        // Ten questions, nine correct -> 90.0 -> "A+" (inclusive bound).
        let questions: Vec<Question> = (1..=10).map(|i| question(i, "A")).collect();
        let answers: Vec<SubmittedAnswer> = (1..=10)
            .map(|i| answer(i, if i <= 9 { "A" } else { "B" }))
            .collect();

        let outcome = grade(&questions, &answers);
        assert_eq!(outcome.score_percentage, 90.0);
        assert_eq!(outcome.grade, "A+");
    }
}
