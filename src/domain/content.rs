//! JSON shapes exchanged with the content backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub answer: String,
    pub question: String,
    pub subtopic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcards {
    pub topic: String,
    pub flashcard_pairs: Vec<Flashcard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub answer: String,
    #[serde(rename = "option_A")]
    pub option_a: String,
    #[serde(rename = "option_B")]
    pub option_b: String,
    #[serde(rename = "option_C")]
    pub option_c: String,
    #[serde(rename = "option_D")]
    pub option_d: String,
    pub question: String,
    pub subtopic: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub topic: String,
    pub difficulty: String,
    pub quiz_questions: Vec<QuizQuestion>,
}

/// Flashcards and quiz generated for one day of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContent {
    pub flashcards: Flashcards,
    pub quiz: Quiz,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub subtopic: String,
    pub subtopic_description: String,
    pub progress_revision_topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDays {
    pub day_1: DaySchedule,
    pub day_2: DaySchedule,
    pub day_3: DaySchedule,
    pub day_4: DaySchedule,
    pub day_5: DaySchedule,
    pub day_6: DaySchedule,
    pub day_7: DaySchedule,
    pub topic: String,
}

impl ScheduleDays {
    /// Day entry by 1-based day number.
    pub fn day(&self, number: u8) -> Option<&DaySchedule> {
        match number {
            1 => Some(&self.day_1),
            2 => Some(&self.day_2),
            3 => Some(&self.day_3),
            4 => Some(&self.day_4),
            5 => Some(&self.day_5),
            6 => Some(&self.day_6),
            7 => Some(&self.day_7),
            _ => None,
        }
    }
}

/// Seven-day study plan for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub topic: String,
    pub schedule: ScheduleDays,
}

/// Summary of one course in the tutor listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseMeta {
    pub id: String,
    pub topic: String,
    pub img_id: String,
}

/// Response of the `/tutor` listing. The backend sends `null` when the user
/// has no courses yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseList {
    pub courses: Option<Vec<CourseMeta>>,
}

impl CourseList {
    pub fn iter(&self) -> impl Iterator<Item = &CourseMeta> {
        self.courses.iter().flatten()
    }
}
