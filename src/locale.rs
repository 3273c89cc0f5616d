use crate::round::Outcome;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Language of the on-screen labels. Strings are pre-translated; nothing is
/// composed at runtime.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Locale {
    Th,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub title: &'static str,
    pub start_hint: &'static str,
    pub answer_hint: &'static str,
    pub passed: &'static str,
    pub timed_out: &'static str,
    pub next_hint: &'static str,
    pub start_failed: &'static str,
}

const TH: Strings = Strings {
    title: "ทายคำ",
    start_hint: "กด space เพื่อเริ่ม · esc ออก",
    answer_hint: "กด space เมื่อทายถูก",
    passed: "ผ่านแล้ว!",
    timed_out: "หมดเวลา!",
    next_hint: "(n) คำถัดไป · (esc) ออก",
    start_failed: "เริ่มรอบไม่ได้",
};

const EN: Strings = Strings {
    title: "blurt",
    start_hint: "press space to start · esc to quit",
    answer_hint: "press space when it's guessed",
    passed: "Passed!",
    timed_out: "Time's up!",
    next_hint: "(n) next word · (esc) quit",
    start_failed: "could not start the round",
};

impl Locale {
    pub fn strings(&self) -> &'static Strings {
        match self {
            Locale::Th => &TH,
            Locale::En => &EN,
        }
    }

    pub fn result_label(&self, outcome: Outcome) -> &'static str {
        match outcome {
            Outcome::Answered => self.strings().passed,
            Outcome::TimedOut => self.strings().timed_out,
            Outcome::Pending => "",
        }
    }
}

pub fn result_icon(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Answered => "✅",
        Outcome::TimedOut => "❌",
        Outcome::Pending => "",
    }
}
