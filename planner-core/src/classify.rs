//! Task type detection from event titles.

use serde::{Deserialize, Serialize};

/// Kind of deliverable a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// Continuous assessment assignment (prueba de evaluación continua)
    #[serde(rename = "PEC")]
    Pec,
    /// Practical work or lab
    #[serde(rename = "PRA")]
    Pra,
    /// Exam
    #[serde(rename = "EX")]
    Ex,
    /// Synthesis test
    #[serde(rename = "PS")]
    Ps,
    /// Reading, also the fallback for anything unrecognised
    #[serde(rename = "LECTURA")]
    Lectura,
}

/// Ordered keyword rules. The order is the contract: the first rule with a
/// matching keyword decides, so "PEC1 - Examen final" is a PEC.
const RULES: &[(TaskType, &[&str])] = &[
    (TaskType::Pec, &["PEC"]),
    (TaskType::Pra, &["PRA", "PRAC", "LAB"]),
    (TaskType::Ex, &["EX", "EXAMEN", "SÍNTESIS", "SINTESIS"]),
    (TaskType::Ps, &["PS", "PRUEBA"]),
];

impl TaskType {
    pub const ALL: [TaskType; 5] = [
        TaskType::Pec,
        TaskType::Pra,
        TaskType::Ex,
        TaskType::Ps,
        TaskType::Lectura,
    ];

    /// Classify a free-text summary. Case-insensitive, never fails.
    pub fn classify(summary: &str) -> TaskType {
        let upper = summary.to_uppercase();

        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| upper.contains(k)))
            .map(|(task_type, _)| *task_type)
            .unwrap_or(TaskType::Lectura)
    }

    /// Tag as stored and sent over the API.
    pub fn code(&self) -> &'static str {
        match self {
            TaskType::Pec => "PEC",
            TaskType::Pra => "PRA",
            TaskType::Ex => "EX",
            TaskType::Ps => "PS",
            TaskType::Lectura => "LECTURA",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Pec => "PEC",
            TaskType::Pra => "Práctica",
            TaskType::Ex => "Examen",
            TaskType::Ps => "Prueba Síntesis",
            TaskType::Lectura => "Lectura",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown task type '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("PEC1 - Bases de datos", TaskType::Pec ; "pec")]
    #[test_case("pec2 entrega", TaskType::Pec ; "lowercase pec")]
    #[test_case("PRA1 Redes", TaskType::Pra ; "pra")]
    #[test_case("Sesión de lab", TaskType::Pra ; "lab")]
    #[test_case("Examen final", TaskType::Ex ; "examen")]
    #[test_case("Prueba de síntesis", TaskType::Ex ; "sintesis beats prueba")]
    #[test_case("Prueba de sintesis", TaskType::Ex ; "sintesis without accent")]
    #[test_case("Prueba final", TaskType::Ps ; "prueba")]
    #[test_case("PS Matemáticas", TaskType::Ps ; "ps")]
    #[test_case("Lectura tema 3", TaskType::Lectura ; "lectura")]
    #[test_case("", TaskType::Lectura ; "empty")]
    fn test_classify(summary: &str, expected: TaskType) {
        assert_eq!(TaskType::classify(summary), expected);
    }

    #[test_case("PEC1 - Examen final", TaskType::Pec ; "pec beats examen")]
    #[test_case("PEC de laboratorio", TaskType::Pec ; "pec beats lab")]
    #[test_case("Examen de prácticas LAB", TaskType::Pra ; "lab beats examen")]
    #[test_case("Prueba de expresión oral", TaskType::Ex ; "ex inside a word beats prueba")]
    #[test_case("Syllabus review", TaskType::Pra ; "lab inside a word is still lab")]
    fn test_classify_precedence(summary: &str, expected: TaskType) {
        assert_eq!(TaskType::classify(summary), expected);
    }

    #[test]
    fn test_accented_practica_falls_through() {
        // "PRÁCTICA" does not contain the ASCII "PRA"
        assert_eq!(TaskType::classify("Práctica 1"), TaskType::Lectura);
    }

    #[test_case(TaskType::Pec, "PEC")]
    #[test_case(TaskType::Pra, "Práctica")]
    #[test_case(TaskType::Ex, "Examen")]
    #[test_case(TaskType::Ps, "Prueba Síntesis")]
    #[test_case(TaskType::Lectura, "Lectura")]
    fn test_label(task_type: TaskType, expected: &str) {
        assert_eq!(task_type.label(), expected);
    }

    #[test]
    fn test_type_serializes_as_code() {
        for t in TaskType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.code()));
            assert_eq!(t.code().parse::<TaskType>().unwrap(), t);
        }
    }
}
