//! Domain types for the Cogito web tier.
//!
//! Nothing here performs I/O: preferences, session records, content payload
//! shapes and the small lookup rules used to build backend requests.

pub mod cache_key;
pub mod content;
pub mod day;
pub mod preference;
pub mod session;

pub use cache_key::{CacheKey, THEME_KEY, TOKEN_KEY};
pub use content::{
    CourseList, CourseMeta, DailyContent, DaySchedule, Flashcard, Flashcards, Quiz, QuizQuestion,
    ScheduleDays, WeeklySchedule,
};
pub use day::day_number;
pub use preference::{Device, InvalidPreference, Preference, Theme};
pub use session::{BearerToken, Profile, Session};
