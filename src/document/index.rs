//! Document Index
//!
//! Indexes a module README: level-2 sections, a memoized tolerant section
//! lookup, inline `input_`/`output_` anchors, documented item names and the
//! resource links of the Resources section.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::arena::{Arena, HeadingSpan, Node, NodeKind};
use crate::error::LintError;
use crate::fuzzy::matches_section_name;

/// Level of the headings that delimit sections.
pub const SECTION_LEVEL: u8 = 2;

/// Level of the headings that name individual items.
pub const ITEM_LEVEL: u8 = 3;

/// Path marker distinguishing data source links from resource links.
const DATA_SOURCE_MARKER: &str = "/data-sources/";

static INPUT_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+name="input_([^"\s]+)""#).expect("valid input anchor pattern")
});

static OUTPUT_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+name="output_([^"\s]+)""#).expect("valid output anchor pattern")
});

/// Which side of the module an anchor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorCategory {
    Input,
    Output,
    Unknown,
}

impl AnchorCategory {
    /// Category implied by a set of requested section names.
    ///
    /// The first name mentioning "input" or "output" decides.
    pub fn from_section_names<S: AsRef<str>>(names: &[S]) -> Self {
        for name in names {
            let lower = name.as_ref().to_lowercase();
            if lower.contains("input") {
                return AnchorCategory::Input;
            }
            if lower.contains("output") {
                return AnchorCategory::Output;
            }
        }
        AnchorCategory::Unknown
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AnchorSet {
    input: bool,
    output: bool,
}

impl AnchorSet {
    fn insert(&mut self, category: AnchorCategory) {
        match category {
            AnchorCategory::Input => self.input = true,
            AnchorCategory::Output => self.output = true,
            AnchorCategory::Unknown => {}
        }
    }

    fn contains(&self, category: AnchorCategory) -> bool {
        match category {
            AnchorCategory::Input => self.input,
            AnchorCategory::Output => self.output,
            AnchorCategory::Unknown => false,
        }
    }

    fn category(&self) -> AnchorCategory {
        match (self.input, self.output) {
            (true, false) => AnchorCategory::Input,
            (false, true) => AnchorCategory::Output,
            _ => AnchorCategory::Unknown,
        }
    }
}

/// A named entity documented in the README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentItem {
    pub name: String,
    pub category: AnchorCategory,
}

/// Resource and data source names referenced by README links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentedDefinitions {
    pub resources: Vec<String>,
    pub data_sources: Vec<String>,
}

impl DocumentedDefinitions {
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.data_sources.is_empty()
    }
}

/// Parsed and indexed README.
#[derive(Debug)]
pub struct DocumentIndex {
    content: String,
    arena: Arena,
    section_names: Vec<String>,
    provider_prefixes: Vec<String>,
    anchors: HashMap<String, AnchorSet>,
    /// Normalized requested name -> indices into `arena.headings()`.
    section_matches: RefCell<HashMap<String, Vec<usize>>>,
}

impl DocumentIndex {
    /// Parse `content`; links are treated as resource references only when
    /// their text starts with one of `provider_prefixes` (case-insensitive).
    pub fn new<S: AsRef<str>>(content: impl Into<String>, provider_prefixes: &[S]) -> Self {
        let content = content.into();
        let arena = Arena::parse(&content);

        let section_names = arena
            .headings_at(SECTION_LEVEL)
            .map(|span| arena.title(span).to_string())
            .filter(|title| !title.is_empty())
            .collect();

        let anchors = index_anchors(&content);

        Self {
            content,
            arena,
            section_names,
            provider_prefixes: provider_prefixes
                .iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
            anchors,
            section_matches: RefCell::new(HashMap::new()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Level-2 heading titles in document order.
    pub fn section_names(&self) -> Vec<String> {
        self.section_names.clone()
    }

    pub fn has_section(&self, name: &str) -> bool {
        !self.match_section_headings(name).is_empty()
    }

    /// Anchor category recorded for `name`, if any anchor mentions it.
    pub fn anchor_category(&self, name: &str) -> AnchorCategory {
        self.anchors
            .get(&name.to_lowercase())
            .map(AnchorSet::category)
            .unwrap_or(AnchorCategory::Unknown)
    }

    /// Item names documented under any of `section_names`.
    pub fn extract_section_items<S: AsRef<str>>(&self, section_names: &[S]) -> Vec<String> {
        self.section_documents(section_names)
            .into_iter()
            .map(|item| item.name)
            .collect()
    }

    /// Items documented under any of `section_names`.
    ///
    /// Level-3 headings are preferred; when they yield nothing the inline
    /// anchors of the implied category are used instead. Items whose anchors
    /// belong only to the other category are dropped either way.
    pub fn section_documents<S: AsRef<str>>(&self, section_names: &[S]) -> Vec<DocumentItem> {
        let mut items = Vec::new();
        for span in self.collect_section_headings(section_names) {
            items.extend(self.items_under_heading(&span));
        }

        if items.is_empty() {
            items = self.anchored_items(section_names);
        }

        self.filter_by_anchor_category(section_names, items)
    }

    /// Resources and data sources linked from the Resources section.
    pub fn extract_definitions_and_lookups(&self) -> (DocumentedDefinitions, Option<LintError>) {
        self.extract_definitions_and_lookups_in(&["Resources"])
    }

    /// Like [`Self::extract_definitions_and_lookups`] with alternate section
    /// names.
    ///
    /// Without a matching section the whole document is scanned. A missing
    /// or empty section is reported next to whatever was found.
    pub fn extract_definitions_and_lookups_in<S: AsRef<str>>(
        &self,
        section_names: &[S],
    ) -> (DocumentedDefinitions, Option<LintError>) {
        let headings = self.collect_section_headings(section_names);

        let mut found = DocumentedDefinitions::default();
        if headings.is_empty() {
            for node in self.arena.nodes() {
                self.record_link(node, &mut found);
            }
            return (found, Some(LintError::resources_section_missing()));
        }

        for span in &headings {
            for node in self.arena.body(span) {
                self.record_link(node, &mut found);
            }
        }

        if found.is_empty() {
            return (found, Some(LintError::resources_section_missing()));
        }
        (found, None)
    }

    /// Memoized lookup of the level-2 headings matching `name`.
    fn match_section_headings(&self, name: &str) -> Vec<usize> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return Vec::new();
        }

        if let Some(cached) = self.section_matches.borrow().get(&key) {
            return cached.clone();
        }

        let matches: Vec<usize> = self
            .arena
            .headings()
            .iter()
            .enumerate()
            .filter(|(_, span)| span.level == SECTION_LEVEL)
            .filter(|(_, span)| matches_section_name(self.arena.title(span), name))
            .map(|(idx, _)| idx)
            .collect();

        self.section_matches
            .borrow_mut()
            .insert(key, matches.clone());
        matches
    }

    /// Matching headings across all names, deduplicated, in request order.
    fn collect_section_headings<S: AsRef<str>>(&self, section_names: &[S]) -> Vec<HeadingSpan> {
        let mut seen = HashSet::new();
        let mut spans = Vec::new();
        for name in section_names {
            for idx in self.match_section_headings(name.as_ref()) {
                if seen.insert(idx) {
                    spans.push(self.arena.headings()[idx]);
                }
            }
        }
        spans
    }

    fn items_under_heading(&self, span: &HeadingSpan) -> Vec<DocumentItem> {
        self.arena
            .body(span)
            .iter()
            .filter(|node| node.heading_level() == Some(ITEM_LEVEL))
            .filter_map(|node| item_name_from_heading(&node.text))
            .map(|name| DocumentItem {
                category: self.anchor_category(&name),
                name,
            })
            .collect()
    }

    fn anchored_items<S: AsRef<str>>(&self, section_names: &[S]) -> Vec<DocumentItem> {
        let mut need_inputs = false;
        let mut need_outputs = false;
        for name in section_names {
            let lower = name.as_ref().to_lowercase();
            need_inputs |= lower.contains("input");
            need_outputs |= lower.contains("output");
        }

        let mut seen = HashSet::new();
        let mut items = Vec::new();
        let mut take = |re: &Regex, category: AnchorCategory| {
            for name in anchored_names(re, &self.content) {
                if seen.insert(name.clone()) {
                    items.push(DocumentItem { name, category });
                }
            }
        };

        if need_inputs {
            take(&*INPUT_ANCHOR_RE, AnchorCategory::Input);
        }
        if need_outputs {
            take(&*OUTPUT_ANCHOR_RE, AnchorCategory::Output);
        }
        items
    }

    fn filter_by_anchor_category<S: AsRef<str>>(
        &self,
        section_names: &[S],
        items: Vec<DocumentItem>,
    ) -> Vec<DocumentItem> {
        let expected = AnchorCategory::from_section_names(section_names);
        if expected == AnchorCategory::Unknown {
            return items;
        }

        items
            .into_iter()
            .filter(|item| match self.anchors.get(&item.name.to_lowercase()) {
                Some(set) => set.contains(expected),
                None => true,
            })
            .collect()
    }

    fn record_link(&self, node: &Node, found: &mut DocumentedDefinitions) {
        let NodeKind::Link { destination } = &node.kind else {
            return;
        };
        if !self.has_provider_prefix(&node.text) {
            return;
        }

        let full_name = node.text.split(']').next().unwrap_or_default();
        let full_name = full_name.trim_start_matches('[').trim();
        let base_name = full_name.split('.').next().unwrap_or_default();

        let target = if destination.contains(DATA_SOURCE_MARKER) {
            &mut found.data_sources
        } else {
            &mut found.resources
        };
        add_unique(target, full_name);
        add_unique(target, base_name);
    }

    fn has_provider_prefix(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        self.provider_prefixes
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
    }
}

fn index_anchors(content: &str) -> HashMap<String, AnchorSet> {
    let mut anchors: HashMap<String, AnchorSet> = HashMap::new();
    for (re, category) in [
        (&*INPUT_ANCHOR_RE, AnchorCategory::Input),
        (&*OUTPUT_ANCHOR_RE, AnchorCategory::Output),
    ] {
        for name in anchored_names(re, content) {
            anchors.entry(name.to_lowercase()).or_default().insert(category);
        }
    }
    anchors
}

fn anchored_names(re: &Regex, content: &str) -> Vec<String> {
    re.captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Item name carried by a level-3 heading, stripped of link and anchor
/// decoration.
fn item_name_from_heading(text: &str) -> Option<String> {
    let name = text.trim().trim_matches(|c: char| c == ' ' || c == '[' || c == ']');
    let name = name
        .trim_start_matches("<a name=\"input_")
        .trim_start_matches("<a name=\"output_");
    let name = name.trim_end_matches("\"></a>").trim_end_matches("</a>").trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn add_unique(list: &mut Vec<String>, item: &str) {
    if !item.is_empty() && !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}
