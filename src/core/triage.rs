use crate::models::{
    QuestionKind, TriageAnswer, TriageQuestion, TriageResponse, TriageResult, UrgencyLevel,
};

/// The fixed triage question bank. Weights sum to 100.
///
/// Two questions are positive-phrased (alertness, appetite) and score
/// inverted: a "no" answer carries the full weight.
pub fn question_bank() -> Vec<TriageQuestion> {
    vec![
        TriageQuestion {
            id: "breathing_difficulty".to_string(),
            text: "Is your dog having difficulty breathing?".to_string(),
            category: "respiratory".to_string(),
            weight: 20.0,
            kind: QuestionKind::Boolean { inverted: false },
        },
        TriageQuestion {
            id: "severe_bleeding".to_string(),
            text: "Is there severe or uncontrolled bleeding?".to_string(),
            category: "trauma".to_string(),
            weight: 20.0,
            kind: QuestionKind::Boolean { inverted: false },
        },
        TriageQuestion {
            id: "is_alert".to_string(),
            text: "Is your dog alert and responsive?".to_string(),
            category: "neurological".to_string(),
            weight: 15.0,
            kind: QuestionKind::Boolean { inverted: true },
        },
        TriageQuestion {
            id: "has_appetite".to_string(),
            text: "Has your dog eaten normally today?".to_string(),
            category: "general".to_string(),
            weight: 10.0,
            kind: QuestionKind::Boolean { inverted: true },
        },
        TriageQuestion {
            id: "repeated_vomiting".to_string(),
            text: "Has your dog vomited more than once in the last 24 hours?".to_string(),
            category: "digestive".to_string(),
            weight: 10.0,
            kind: QuestionKind::Boolean { inverted: false },
        },
        TriageQuestion {
            id: "pain_level".to_string(),
            text: "How much pain does your dog appear to be in? (0-10)".to_string(),
            category: "general".to_string(),
            weight: 15.0,
            kind: QuestionKind::Scale { max: 10 },
        },
        TriageQuestion {
            id: "symptom_duration".to_string(),
            text: "How long have the symptoms lasted?".to_string(),
            category: "general".to_string(),
            weight: 5.0,
            kind: QuestionKind::Multiple {
                options: vec![
                    "Less than a day".to_string(),
                    "1-3 days".to_string(),
                    "More than 3 days".to_string(),
                ],
            },
        },
        TriageQuestion {
            id: "mobility".to_string(),
            text: "How is your dog moving?".to_string(),
            category: "mobility".to_string(),
            weight: 5.0,
            kind: QuestionKind::Multiple {
                options: vec![
                    "Walking normally".to_string(),
                    "Limping or stiff".to_string(),
                    "Unable to stand".to_string(),
                ],
            },
        },
    ]
}

/// Score a triage questionnaire into an urgency classification.
///
/// Unanswered or type-mismatched questions contribute 0 to the numerator
/// but keep their weight in the denominator, so missing information never
/// inflates the normalized score. An empty response set scores 0 / low.
pub fn score_triage(responses: &[TriageResponse]) -> TriageResult {
    let bank = question_bank();

    let max_possible: f64 = bank.iter().map(|q| q.weight).sum();
    let total: f64 = bank
        .iter()
        .map(|q| {
            responses
                .iter()
                .find(|r| r.question_id == q.id)
                .map(|r| question_score(q, r.answer))
                .unwrap_or(0.0)
        })
        .sum();

    let score = if max_possible > 0.0 {
        (100.0 * total / max_possible).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    let urgency = urgency_for(score);

    TriageResult {
        score,
        urgency_level: urgency,
        recommendations: recommendations_for(urgency),
        requires_veterinarian: urgency >= UrgencyLevel::Medium,
        requires_emergency_services: urgency == UrgencyLevel::Critical,
    }
}

/// Weighted contribution of one answered question. A mismatched answer
/// shape or out-of-range option index counts as unanswered.
fn question_score(question: &TriageQuestion, answer: TriageAnswer) -> f64 {
    match (&question.kind, answer) {
        (QuestionKind::Boolean { inverted }, TriageAnswer::Bool(value)) => {
            let alarming = if *inverted { !value } else { value };
            if alarming {
                question.weight
            } else {
                0.0
            }
        }
        (QuestionKind::Scale { max }, TriageAnswer::Value(value)) if *max > 0 => {
            (value.min(*max) as f64 / *max as f64) * question.weight
        }
        (QuestionKind::Multiple { options }, TriageAnswer::Value(index))
            if options.len() > 1 && (index as usize) < options.len() =>
        {
            (index as f64 / (options.len() - 1) as f64) * question.weight
        }
        _ => 0.0,
    }
}

fn urgency_for(score: u8) -> UrgencyLevel {
    match score {
        80..=100 => UrgencyLevel::Critical,
        60..=79 => UrgencyLevel::High,
        30..=59 => UrgencyLevel::Medium,
        _ => UrgencyLevel::Low,
    }
}

fn recommendations_for(urgency: UrgencyLevel) -> Vec<String> {
    let lines: &[&str] = match urgency {
        UrgencyLevel::Critical => &[
            "Contact an emergency veterinary clinic immediately",
            "Keep your dog calm and still during transport",
            "Do not give food, water, or medication unless instructed",
        ],
        UrgencyLevel::High => &[
            "Book a veterinary visit within the next 24 hours",
            "Monitor breathing, alertness and appetite closely",
            "Withhold strenuous activity until seen",
        ],
        UrgencyLevel::Medium => &[
            "Schedule a veterinary appointment in the coming days",
            "Keep a log of symptoms and when they occur",
        ],
        UrgencyLevel::Low => &[
            "No immediate veterinary care appears necessary",
            "Re-run this assessment if symptoms change or worsen",
        ],
    };

    lines.iter().map(|l| l.to_string()).collect()
}
