use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::defaults::MAX_RECORDS;
use super::ScoreRecord;

/// High-score list: best first, earlier games win ties, at most [`MAX_RECORDS`] kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBook {
    records: Vec<ScoreRecord>,
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `record` would enter the book right now.
    pub fn qualifies(&self, record: &ScoreRecord) -> bool {
        self.rank_for(record).is_some()
    }

    /// Inserts `record` at its rank and returns that rank (0 = best), or `None`
    /// when it does not make the list.
    pub fn add(&mut self, record: ScoreRecord) -> Option<usize> {
        let rank = self.rank_for(&record)?;
        self.records.insert(rank, record);
        self.records.truncate(MAX_RECORDS);
        Some(rank)
    }

    fn rank_for(&self, record: &ScoreRecord) -> Option<usize> {
        let rank = self
            .records
            .iter()
            .position(|existing| {
                record.score > existing.score
                    || (record.score == existing.score && record.timestamp < existing.timestamp)
            })
            .unwrap_or(self.records.len());

        (rank < MAX_RECORDS).then_some(rank)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Validate for RecordBook {
    fn validate(&self) -> Result<(), String> {
        if self.records.len() > MAX_RECORDS {
            return Err(format!("At most {} records can be stored", MAX_RECORDS));
        }
        let sorted = self
            .records
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score);
        if !sorted {
            return Err("Records must be ordered by score".to_string());
        }
        if self.records.iter().any(|r| r.speed_percentage > 100) {
            return Err("Speed percentage must be between 0 and 100".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::BoundaryMode;
    use crate::records::record_book_manager;

    fn record(name: &str, score: u32, timestamp: i64) -> ScoreRecord {
        ScoreRecord::with_timestamp(name, score, BoundaryMode::Lethal, 50, timestamp)
    }

    #[test]
    fn test_add_keeps_best_first() {
        let mut book = RecordBook::new();
        assert_eq!(book.add(record("a", 30, 1)), Some(0));
        assert_eq!(book.add(record("b", 50, 2)), Some(0));
        assert_eq!(book.add(record("c", 40, 3)), Some(1));

        let scores: Vec<u32> = book.records().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![50, 40, 30]);
        assert_eq!(book.best().unwrap().player_name, "b");
    }

    #[test]
    fn test_ties_keep_earlier_game_first() {
        let mut book = RecordBook::new();
        book.add(record("late", 20, 200));
        assert_eq!(book.add(record("early", 20, 100)), Some(0));
        assert_eq!(book.add(record("latest", 20, 300)), Some(2));
    }

    #[test]
    fn test_book_is_capped() {
        let mut book = RecordBook::new();
        for i in 0..MAX_RECORDS as u32 {
            book.add(record("p", (i + 1) * 10, i as i64));
        }
        assert_eq!(book.len(), MAX_RECORDS);
        assert!(!book.qualifies(&record("low", 5, 99)));
        assert_eq!(book.add(record("low", 5, 99)), None);

        assert!(book.qualifies(&record("mid", 15, 99)));
        assert_eq!(book.add(record("mid", 15, 99)), Some(MAX_RECORDS - 1));
        assert_eq!(book.len(), MAX_RECORDS);
        assert_eq!(book.records().last().unwrap().score, 15);
        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_record_book_persists() {
        let random_number: u32 = rand::random();
        let path = std::env::temp_dir().join(format!("temp_snake_records_{}.yaml", random_number));
        let manager = record_book_manager(&path);

        let mut book = manager.get_config().unwrap();
        assert!(book.is_empty());
        book.add(record("ann", 70, 5));
        book.add(record("bo", 90, 6));
        manager.set_config(&book).unwrap();

        let reopened = record_book_manager(&path);
        let loaded = reopened.get_config().unwrap();
        assert_eq!(loaded, book);
        assert_eq!(loaded.best().unwrap().player_name, "bo");

        reopened.clear_config().unwrap();
    }

    #[test]
    fn test_qualifies_agrees_with_add_on_ties() {
        let mut book = RecordBook::new();
        for i in 0..MAX_RECORDS as u32 {
            book.add(record("p", 100 - i * 10, 50 + i as i64));
        }
        let last = book.records().last().unwrap().clone();

        let earlier = record("early", last.score, last.timestamp - 1);
        let later = record("late", last.score, last.timestamp + 1);
        assert!(book.qualifies(&earlier));
        assert!(!book.qualifies(&later));

        assert_eq!(book.add(later), None);
        assert_eq!(book.add(earlier), Some(MAX_RECORDS - 1));
        assert_eq!(book.records().last().unwrap().player_name, "early");
    }
}
