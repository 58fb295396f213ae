//! # Preview Session
//!
//! [`LivePreview`] owns everything one open document needs between
//! keystrokes: the rope, its region map, the line cache, the selections,
//! the current reveal context and the last element list. Regions are
//! rescanned on text changes only.

use xi_rope::Rope;

use crate::{
    cache::{CacheStats, LineCache},
    parsing::{ParseRange, blocks::RegionMap, element::ParsedElement, parse_with_regions},
    reveal::{RevealContext, RevealGranularity, RevealSource, SelectionRange},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    pub cache_capacity: usize,
    pub reveal: RevealGranularity,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            cache_capacity: LineCache::DEFAULT_CAPACITY,
            reveal: RevealGranularity::default(),
        }
    }
}

#[derive(Debug)]
pub struct LivePreview {
    rope: Rope,
    regions: RegionMap,
    cache: LineCache,
    options: PreviewOptions,
    selections: Vec<SelectionRange>,
    reveal: RevealContext,
    range: ParseRange,
    elements: Vec<ParsedElement>,
}

impl LivePreview {
    /// Opens `text` and runs the first pass over the whole document.
    pub fn new(text: &str, options: PreviewOptions) -> Self {
        let rope = Rope::from(text);
        let mut preview = Self {
            regions: RegionMap::scan(&rope),
            rope,
            cache: LineCache::with_capacity(options.cache_capacity),
            options,
            selections: vec![],
            reveal: RevealContext::none(),
            range: ParseRange::Document,
            elements: vec![],
        };
        preview.refresh();
        preview
    }

    /// Document mutation signal. Selections are clamped to the new text.
    pub fn update_document(&mut self, text: &str) {
        self.rope = Rope::from(text);
        self.regions = RegionMap::scan(&self.rope);
        let len = self.rope.len();
        for sel in &mut self.selections {
            *sel = sel.clamped(len);
        }
        log::debug!("document updated ({len} bytes)");
        self.refresh();
    }

    /// Selection change signal. The first range is the primary cursor.
    pub fn update_selection(&mut self, selections: Vec<SelectionRange>) {
        let len = self.rope.len();
        self.selections = selections.into_iter().map(|s| s.clamped(len)).collect();
        self.refresh();
    }

    /// Re-parses `range` (e.g. the visible window) and returns its elements.
    pub fn parse(&mut self, range: ParseRange) -> &[ParsedElement] {
        self.range = range;
        self.refresh();
        &self.elements
    }

    pub fn set_granularity(&mut self, granularity: RevealGranularity) {
        self.options.reveal = granularity;
        self.refresh();
    }

    pub fn elements(&self) -> &[ParsedElement] {
        &self.elements
    }

    pub fn reveal(&self) -> &RevealContext {
        &self.reveal
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    pub fn selections(&self) -> &[SelectionRange] {
        &self.selections
    }

    pub fn options(&self) -> PreviewOptions {
        self.options
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drops the document and all derived state.
    pub fn close(&mut self) {
        self.cache.clear();
        self.rope = Rope::from("");
        self.regions = RegionMap::default();
        self.selections.clear();
        self.reveal = RevealContext::none();
        self.range = ParseRange::Document;
        self.elements.clear();
    }

    /// One pass with line reveal only, then element reveal derived from
    /// that pass's own elements. Filtering afterwards gives the same list
    /// as parsing with the full context, and an element the cursor sits in
    /// is never missing from the list it is looked up in.
    fn refresh(&mut self) {
        let granularity = self.options.reveal;
        let lines_only = RevealContext::build(&self.rope, &self.selections, &[], granularity);
        let all = parse_with_regions(
            &self.rope,
            &self.regions,
            self.range.clone(),
            &lines_only,
            &mut self.cache,
        );

        self.reveal = RevealContext::build(&self.rope, &self.selections, &all, granularity);
        let reveal = &self.reveal;
        self.elements = all
            .into_iter()
            .filter(|el| !reveal.should_reveal_element(&el.key()))
            .collect();
    }
}
