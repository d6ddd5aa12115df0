//! Scene records.
//!
//! Each input line is `<kind> <n0> <n1> <n2> <n3>`, whitespace separated.
//! Decoding is strict about what it uses and lenient about the rest:
//! - the keyword must be exactly `plane` or `point`;
//! - a plane needs four finite numbers, a point needs three (a fourth
//!   token, if any, is ignored like every other trailing token);
//! - anything else decodes to `None` and is simply not drawn.

use serde::{Deserialize, Serialize};

use crate::{
    error::RecordError,
    math::{Plane, Point3},
};

/// One decoded geometric record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneRecord {
    Plane(Plane),
    Point(Point3),
}

impl SceneRecord {
    /// Decodes a single input line, or `None` if it is empty or malformed.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let kind = tokens.next()?;
        let needed = match kind {
            "plane" => 4,
            "point" => 3,
            _ => return None,
        };

        let mut n = [0.0_f64; 4];
        for slot in n.iter_mut().take(needed) {
            let value: f64 = tokens.next()?.parse().ok()?;
            if !value.is_finite() {
                return None;
            }
            *slot = value;
        }

        Some(match kind {
            "plane" => SceneRecord::Plane(Plane::new(n[0], n[1], n[2], n[3])),
            _ => SceneRecord::Point(Point3::new(n[0], n[1], n[2])),
        })
    }
}

/// A text slot holding at most `max_len` bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordText {
    text: String,
    max_len: usize,
}

impl RecordText {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            max_len,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the text, cutting it at the last char boundary within the limit.
    pub fn set(&mut self, text: &str) {
        let mut end = text.len().min(self.max_len);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.text.clear();
        self.text.push_str(&text[..end]);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// The fixed set of editable record lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSlots {
    slots: Vec<RecordText>,
    revision: u64,
}

impl RecordSlots {
    pub fn new(capacity: usize, max_len: usize) -> Self {
        Self {
            slots: vec![RecordText::new(max_len); capacity],
            revision: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Bumped on every edit that changes a slot's text; lets readers
    /// notice a change cheaply.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(RecordText::as_str)
    }

    pub fn set(&mut self, index: usize, text: &str) -> Result<(), RecordError> {
        let capacity = self.capacity();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(RecordError::SlotOutOfRange { index, capacity })?;
        let before = slot.clone();
        slot.set(text);
        if *slot != before {
            self.revision += 1;
        }
        Ok(())
    }

    pub fn clear(&mut self, index: usize) -> Result<(), RecordError> {
        self.set(index, "")
    }

    /// Non-empty slots with their index.
    pub fn iter_filled(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_empty())
            .map(|(i, s)| (i, s.as_str()))
    }

    /// Decoded records, skipping empty and malformed slots.
    pub fn records(&self) -> impl Iterator<Item = (usize, SceneRecord)> + '_ {
        self.iter_filled()
            .filter_map(|(i, s)| SceneRecord::parse(s).map(|r| (i, r)))
    }
}
