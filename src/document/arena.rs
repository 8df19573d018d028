//! Document Arena
//!
//! Flattens the markdown event stream into an ordered list of the nodes the
//! linter inspects (headings and links). Each heading records the index range
//! it owns, up to the next heading of equal or lower level, so sections are
//! sliced instead of re-walked.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Heading { level: u8 },
    Link { destination: String },
}

/// A heading or link with its visible text (text and inline code only).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub text: String,
}

impl Node {
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Heading { level } => Some(level),
            NodeKind::Link { .. } => None,
        }
    }
}

/// A heading and the node range it governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingSpan {
    /// Index of the heading node itself.
    pub node: usize,
    pub level: u8,
    /// Exclusive end of the section body.
    pub end: usize,
}

/// Nodes in document order plus the heading spans over them.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    headings: Vec<HeadingSpan>,
}

impl Arena {
    pub fn parse(markdown: &str) -> Self {
        let parser = Parser::new_ext(
            markdown,
            Options::ENABLE_TABLES | Options::ENABLE_HEADING_ATTRIBUTES,
        );

        let mut nodes: Vec<Node> = Vec::new();
        // Nodes currently collecting text: an open heading and any open links.
        let mut open: Vec<usize> = Vec::new();

        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    open.push(nodes.len());
                    nodes.push(Node {
                        kind: NodeKind::Heading {
                            level: heading_depth(level),
                        },
                        text: String::new(),
                    });
                }
                Event::Start(Tag::Link { dest_url, .. }) => {
                    open.push(nodes.len());
                    nodes.push(Node {
                        kind: NodeKind::Link {
                            destination: dest_url.to_string(),
                        },
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Link) => {
                    open.pop();
                }
                Event::Text(text) | Event::Code(text) => {
                    for &idx in &open {
                        nodes[idx].text.push_str(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    for &idx in &open {
                        nodes[idx].text.push(' ');
                    }
                }
                _ => {}
            }
        }

        let headings = heading_spans(&nodes);
        Self { nodes, headings }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// All headings, in document order.
    pub fn headings(&self) -> &[HeadingSpan] {
        &self.headings
    }

    /// Headings of exactly `level`.
    pub fn headings_at(&self, level: u8) -> impl Iterator<Item = &HeadingSpan> {
        self.headings.iter().filter(move |h| h.level == level)
    }

    /// Nodes owned by a heading, excluding the heading itself.
    pub fn body(&self, span: &HeadingSpan) -> &[Node] {
        &self.nodes[span.node + 1..span.end]
    }

    /// Trimmed heading text.
    pub fn title(&self, span: &HeadingSpan) -> &str {
        self.nodes[span.node].text.trim()
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Closes each heading at the next heading of equal or lower level.
fn heading_spans(nodes: &[Node]) -> Vec<HeadingSpan> {
    let mut spans: Vec<HeadingSpan> = Vec::new();
    let mut unclosed: Vec<usize> = Vec::new();

    for (idx, node) in nodes.iter().enumerate() {
        let Some(level) = node.heading_level() else {
            continue;
        };
        while let Some(&top) = unclosed.last() {
            if spans[top].level < level {
                break;
            }
            spans[top].end = idx;
            unclosed.pop();
        }
        unclosed.push(spans.len());
        spans.push(HeadingSpan {
            node: idx,
            level,
            end: nodes.len(),
        });
    }

    spans
}
