//! # Reveal Tracking
//!
//! Decides which lines and elements show their raw markdown because the
//! cursor or a selection touches them. A [`RevealContext`] is rebuilt on
//! every selection or document change and read by the parser through the
//! [`RevealSource`] trait.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use xi_rope::Rope;

use crate::parsing::{
    element::{ElementKey, ParsedElement},
    rope::{line_of_offset, span::Span},
};

/// One selection range. `anchor == head` is a plain cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SelectionRange {
    pub anchor: usize,
    pub head: usize,
}

impl SelectionRange {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn cursor(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn from(self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(self) -> bool {
        self.anchor == self.head
    }

    pub fn span(self) -> Span {
        Span::new(self.from(), self.to())
    }

    #[must_use]
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.anchor.min(len), self.head.min(len))
    }
}

/// How much raw syntax a selection exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealGranularity {
    /// Whole lines under selection endpoints plus every element the
    /// selection overlaps.
    #[default]
    Element,
    /// Whole lines under selection endpoints only.
    Line,
}

impl RevealGranularity {
    pub fn toggled(self) -> Self {
        match self {
            RevealGranularity::Element => RevealGranularity::Line,
            RevealGranularity::Line => RevealGranularity::Element,
        }
    }
}

/// Read-only reveal queries made by the parser.
pub trait RevealSource {
    /// Called once per line before it is parsed. A revealed line yields no
    /// elements and is never cached.
    fn should_reveal_line(&self, line: usize) -> bool;

    /// Called for each parsed element after the cache lookup.
    fn should_reveal_element(&self, _key: &ElementKey) -> bool {
        false
    }
}

/// Reveal state derived from the selections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevealContext {
    pub cursor_pos: usize,
    pub cursor_line: usize,
    pub selection_from: usize,
    pub selection_to: usize,
    pub has_selection: bool,
    pub revealed_lines: BTreeSet<usize>,
    pub revealed_elements: HashSet<ElementKey>,
    pub element_at_cursor: Option<ElementKey>,
    /// Clamped selections, primary first.
    pub selections: Vec<SelectionRange>,
    pub granularity: RevealGranularity,
}

impl RevealContext {
    /// Reveals nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Derives reveal state from `selections` (the first is primary) and
    /// the elements known from the previous pass. With no elements yet,
    /// only lines are revealed.
    pub fn build(
        rope: &Rope,
        selections: &[SelectionRange],
        elements: &[ParsedElement],
        granularity: RevealGranularity,
    ) -> Self {
        let len = rope.len();
        let selections: Vec<SelectionRange> = selections.iter().map(|s| s.clamped(len)).collect();
        let Some(&primary) = selections.first() else {
            return Self {
                granularity,
                ..Self::none()
            };
        };

        let revealed_lines = selections
            .iter()
            .flat_map(|s| [s.anchor, s.head])
            .map(|pos| line_of_offset(rope, pos))
            .collect();

        let revealed_elements = match granularity {
            RevealGranularity::Line => HashSet::new(),
            RevealGranularity::Element => elements
                .iter()
                .filter(|el| selections.iter().any(|s| el.span().overlaps(s.span())))
                .map(ParsedElement::key)
                .collect(),
        };

        let cursor_pos = primary.head;
        let element_at_cursor = elements
            .iter()
            .filter(|el| !el.is_line_style() && el.span().contains(Span::new(cursor_pos, cursor_pos)))
            .min_by_key(|el| (el.span().len(), el.kind.priority()))
            .map(ParsedElement::key);

        Self {
            cursor_pos,
            cursor_line: line_of_offset(rope, cursor_pos),
            selection_from: primary.from(),
            selection_to: primary.to(),
            has_selection: !primary.is_empty(),
            revealed_lines,
            revealed_elements,
            element_at_cursor,
            selections,
            granularity,
        }
    }
}

impl RevealSource for RevealContext {
    fn should_reveal_line(&self, line: usize) -> bool {
        self.revealed_lines.contains(&line)
    }

    fn should_reveal_element(&self, key: &ElementKey) -> bool {
        self.revealed_elements.contains(key)
    }
}
