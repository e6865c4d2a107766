//! Counters and recent-history bookkeeping for classified faces.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::classification::domain::attributes::{AgeBracket, Gender};
use crate::pipeline::face_result::FaceResult;
use crate::shared::constants::DEFAULT_HISTORY_CAPACITY;

/// Face counts per age bracket and per gender over a fixed key set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeCounts {
    ages: [u64; AgeBracket::ALL.len()],
    genders: [u64; Gender::ALL.len()],
}

impl AttributeCounts {
    pub fn add(&mut self, gender: Gender, age: AgeBracket) {
        self.genders[gender as usize] += 1;
        self.ages[age.index()] += 1;
    }

    pub fn age(&self, age: AgeBracket) -> u64 {
        self.ages[age.index()]
    }

    pub fn gender(&self, gender: Gender) -> u64 {
        self.genders[gender as usize]
    }

    /// Every bracket in network order, zeros included.
    pub fn ages(&self) -> impl Iterator<Item = (AgeBracket, u64)> + '_ {
        AgeBracket::ALL.iter().map(|&a| (a, self.age(a)))
    }

    pub fn genders(&self) -> impl Iterator<Item = (Gender, u64)> + '_ {
        Gender::ALL.iter().map(|&g| (g, self.gender(g)))
    }

    /// Number of faces counted. Each face adds one gender and one age.
    pub fn faces(&self) -> u64 {
        self.genders.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.faces() == 0
    }

    pub fn merge(&mut self, other: &AttributeCounts) {
        for (a, b) in self.ages.iter_mut().zip(other.ages) {
            *a += b;
        }
        for (a, b) in self.genders.iter_mut().zip(other.genders) {
            *a += b;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// `"{label}: {count}  "` for every non-zero entry, ages then genders.
    pub fn summary(&self) -> String {
        let ages = self.ages().map(|(a, n)| (a.label(), n));
        let genders = self.genders().map(|(g, n)| (g.label(), n));
        ages.chain(genders)
            .filter(|&(_, n)| n > 0)
            .map(|(label, n)| format!("{label}: {n}  "))
            .collect()
    }
}

/// One classified face in the history list.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionRecord {
    pub timestamp: DateTime<Local>,
    pub gender: Gender,
    pub age: AgeBracket,
    pub confidence: f32,
}

impl DetectionRecord {
    pub fn line(&self) -> String {
        format!(
            "{}  {}, {}  ({:.0}%)",
            self.timestamp.format("%H:%M:%S"),
            self.gender,
            self.age,
            self.confidence * 100.0
        )
    }
}

/// Current-frame counts, running totals and a bounded newest-first history.
#[derive(Clone, Debug)]
pub struct DetectionStats {
    current: AttributeCounts,
    totals: AttributeCounts,
    frames_processed: u64,
    history: VecDeque<DetectionRecord>,
    capacity: usize,
}

impl DetectionStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            current: AttributeCounts::default(),
            totals: AttributeCounts::default(),
            frames_processed: 0,
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Replace the current-frame counts with `faces` and fold them into the totals.
    pub fn record_frame(&mut self, faces: &[FaceResult], timestamp: DateTime<Local>) {
        self.current.clear();
        for face in faces {
            let c = &face.classification;
            self.current.add(c.gender, c.age);
            self.push_history(DetectionRecord {
                timestamp,
                gender: c.gender,
                age: c.age,
                confidence: face.detection.confidence,
            });
        }
        self.totals.merge(&self.current);
        self.frames_processed += 1;
    }

    fn push_history(&mut self, record: DetectionRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.history.len() == self.capacity {
            self.history.pop_back();
        }
        self.history.push_front(record);
    }

    pub fn current(&self) -> &AttributeCounts {
        &self.current
    }

    pub fn totals(&self) -> &AttributeCounts {
        &self.totals
    }

    /// Newest first.
    pub fn history(&self) -> impl Iterator<Item = &DetectionRecord> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_lines(&self) -> Vec<String> {
        self.history.iter().map(DetectionRecord::line).collect()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn faces_seen(&self) -> u64 {
        self.totals.faces()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the history bound, dropping the oldest records if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.history.truncate(capacity);
    }

    pub fn frame_summary(&self) -> String {
        self.current.summary()
    }

    pub fn reset(&mut self) {
        self.current.clear();
        self.totals.clear();
        self.frames_processed = 0;
        self.history.clear();
    }
}

impl Default for DetectionStats {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::domain::face_classifier::Classification;
    use crate::detection::domain::face_detector::Detection;
    use crate::shared::region::Region;
    use chrono::TimeZone;
    use rstest::rstest;

    fn face(gender: Gender, age: AgeBracket, confidence: f32) -> FaceResult {
        FaceResult {
            detection: Detection {
                region: Region::new(0, 0, 10, 10),
                confidence,
            },
            classification: Classification {
                gender,
                gender_probability: 0.9,
                age,
                age_probability: 0.8,
            },
        }
    }

    fn at(secs: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 12, 0, secs).unwrap()
    }

    // ── AttributeCounts ──────────────────────────────────────────────

    #[test]
    fn test_summary_lists_non_zero_ages_then_genders() {
        let mut counts = AttributeCounts::default();
        counts.add(Gender::Female, AgeBracket::YoungAdult);
        counts.add(Gender::Male, AgeBracket::Infant);
        counts.add(Gender::Male, AgeBracket::YoungAdult);
        assert_eq!(
            counts.summary(),
            "(0-2): 1  (25-32): 2  Male: 2  Female: 1  "
        );
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(AttributeCounts::default().summary(), "");
    }

    #[test]
    fn test_counts_iterate_full_key_set() {
        let counts = AttributeCounts::default();
        assert_eq!(counts.ages().count(), 8);
        assert_eq!(counts.genders().count(), 2);
    }

    // ── DetectionStats ───────────────────────────────────────────────

    #[test]
    fn test_current_counts_reset_each_frame() {
        let mut stats = DetectionStats::default();
        stats.record_frame(&[face(Gender::Male, AgeBracket::Teen, 0.9)], at(0));
        stats.record_frame(&[face(Gender::Female, AgeBracket::Adult, 0.8)], at(1));

        assert_eq!(stats.current().gender(Gender::Male), 0);
        assert_eq!(stats.current().gender(Gender::Female), 1);
        assert_eq!(stats.frame_summary(), "(38-43): 1  Female: 1  ");
    }

    #[test]
    fn test_totals_accumulate() {
        let mut stats = DetectionStats::default();
        stats.record_frame(&[face(Gender::Male, AgeBracket::Teen, 0.9)], at(0));
        stats.record_frame(&[], at(1));
        stats.record_frame(
            &[
                face(Gender::Male, AgeBracket::Teen, 0.9),
                face(Gender::Female, AgeBracket::Senior, 0.75),
            ],
            at(2),
        );

        assert_eq!(stats.frames_processed(), 3);
        assert_eq!(stats.faces_seen(), 3);
        assert_eq!(stats.totals().age(AgeBracket::Teen), 2);
        assert_eq!(stats.totals().gender(Gender::Female), 1);
    }

    #[test]
    fn test_empty_frame_clears_summary() {
        let mut stats = DetectionStats::default();
        stats.record_frame(&[face(Gender::Male, AgeBracket::Teen, 0.9)], at(0));
        stats.record_frame(&[], at(1));
        assert_eq!(stats.frame_summary(), "");
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut stats = DetectionStats::default();
        stats.record_frame(&[face(Gender::Male, AgeBracket::Teen, 0.9)], at(0));
        stats.record_frame(&[face(Gender::Female, AgeBracket::Child, 0.8)], at(5));

        let genders: Vec<Gender> = stats.history().map(|r| r.gender).collect();
        assert_eq!(genders, vec![Gender::Female, Gender::Male]);
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(50)]
    fn test_history_is_bounded(#[case] capacity: usize) {
        let mut stats = DetectionStats::new(capacity);
        for i in 0..60 {
            stats.record_frame(&[face(Gender::Male, AgeBracket::Teen, 0.9)], at(i % 60));
        }
        assert_eq!(stats.history_len(), capacity);
        assert_eq!(stats.history().next().unwrap().timestamp, at(59));
    }

    #[test]
    fn test_zero_capacity_keeps_no_history() {
        let mut stats = DetectionStats::new(0);
        stats.record_frame(&[face(Gender::Male, AgeBracket::Teen, 0.9)], at(0));
        assert_eq!(stats.history_len(), 0);
        assert_eq!(stats.faces_seen(), 1);
    }

    #[test]
    fn test_set_capacity_drops_oldest() {
        let mut stats = DetectionStats::new(10);
        for i in 0..5 {
            stats.record_frame(&[face(Gender::Male, AgeBracket::Teen, 0.9)], at(i));
        }
        stats.set_capacity(2);
        let times: Vec<_> = stats.history().map(|r| r.timestamp).collect();
        assert_eq!(times, vec![at(4), at(3)]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut stats = DetectionStats::new(5);
        stats.record_frame(&[face(Gender::Male, AgeBracket::Teen, 0.9)], at(0));
        stats.reset();
        assert_eq!(stats.frames_processed(), 0);
        assert_eq!(stats.faces_seen(), 0);
        assert_eq!(stats.history_len(), 0);
        assert!(stats.current().is_empty());
        assert_eq!(stats.capacity(), 5);
    }

    #[test]
    fn test_history_line_format() {
        let mut stats = DetectionStats::default();
        stats.record_frame(&[face(Gender::Female, AgeBracket::YoungAdult, 0.934)], at(7));
        assert_eq!(stats.history_lines(), vec!["12:00:07  Female, (25-32)  (93%)"]);
    }
}
