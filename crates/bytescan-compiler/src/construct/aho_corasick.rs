//! Aho-Corasick construction.
//!
//! Patterns are inserted into a trie of single-byte edges. Every node then
//! gets a non-advancing default edge to the node of its longest proper suffix
//! present in the trie (its failure node); the start node's default loops
//! back to itself and consumes the byte. Output chains are shared: a node's
//! own outputs come first and the tail links to the failure node's chain, so
//! patterns that are suffixes of the matched one are reported as well.

use std::collections::VecDeque;

use bytescan_core::{Automaton, Edge, NodeId, OutputId, Target};

/// Metadata key naming how output content should be read.
pub const OUTPUT_TYPE_KEY: &str = "Output-Type";

/// What each pattern's output record contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentKind {
    /// The pattern bytes.
    #[default]
    Pattern,
    /// The pattern's position in the input list, as a little-endian `u32`.
    Index,
    /// The pattern's length, as a little-endian `u32`.
    Length,
}

impl ContentKind {
    /// Value stored under [`OUTPUT_TYPE_KEY`].
    pub fn output_type(self) -> &'static str {
        match self {
            Self::Pattern => "string",
            Self::Index => "integer",
            Self::Length => "length",
        }
    }

    fn content(self, index: usize, pattern: &[u8]) -> Vec<u8> {
        match self {
            Self::Pattern => pattern.to_vec(),
            Self::Index => (index as u32).to_le_bytes().to_vec(),
            Self::Length => (pattern.len() as u32).to_le_bytes().to_vec(),
        }
    }
}

/// Builder for pattern-matching automata.
#[derive(Clone, Debug, Default)]
pub struct AhoCorasick {
    content: ContentKind,
}

impl AhoCorasick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, kind: ContentKind) -> Self {
        self.content = kind;
        self
    }

    /// Build an automaton reporting every occurrence of `patterns`.
    ///
    /// Empty patterns are skipped; they still count toward pattern indices.
    pub fn build<I, P>(&self, patterns: I) -> Automaton
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let kind = self.content;
        let entries = patterns.into_iter().enumerate().map(|(index, pattern)| {
            let content = kind.content(index, pattern.as_ref());
            (pattern, content)
        });
        let mut automaton = Self::build_with_content(entries);
        automaton
            .metadata_mut()
            .insert(OUTPUT_TYPE_KEY.to_owned(), kind.output_type().to_owned());
        automaton
    }

    /// Build from `(pattern, content)` pairs with caller-chosen content.
    pub fn build_with_content<I, P, C>(entries: I) -> Automaton
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<[u8]>,
        C: Into<Vec<u8>>,
    {
        let mut trie = Trie::new();
        for (pattern, content) in entries {
            trie.insert(pattern.as_ref(), content.into());
        }
        trie.link_failures();

        let mut automaton = trie.automaton;
        automaton.set_no_advance_no_output(true);
        log::debug!(
            "aho-corasick: {} nodes, {} outputs",
            automaton.node_count(),
            automaton.output_count()
        );
        automaton
    }
}

/// Build with pattern-bytes content.
pub fn build<I, P>(patterns: I) -> Automaton
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    AhoCorasick::new().build(patterns)
}

struct Trie {
    automaton: Automaton,
    /// Last output of each node's own chain, before failure linking.
    last_output: Vec<Option<OutputId>>,
}

impl Trie {
    fn new() -> Self {
        Self {
            automaton: Automaton::new(),
            last_output: vec![None],
        }
    }

    fn child(&self, node: NodeId, c: u8) -> Option<NodeId> {
        self.automaton
            .node(node)
            .edges()
            .iter()
            .find(|edge| edge.contains(c))
            .map(Edge::target)
    }

    fn insert(&mut self, pattern: &[u8], content: Vec<u8>) {
        if pattern.is_empty() {
            return;
        }

        let mut node = self.automaton.start();
        for &c in pattern {
            node = match self.child(node, c) {
                Some(next) => next,
                None => {
                    let next = self.automaton.add_node();
                    self.last_output.push(None);
                    self.automaton.create_edge(node, next).add_trigger(c);
                    next
                }
            };
        }

        let output = self.automaton.add_output(content, None);
        match self.last_output[node.index()] {
            Some(last) => self.automaton.output_mut(last).set_next(Some(output)),
            None => self.automaton.node_mut(node).set_first_output(Some(output)),
        }
        self.last_output[node.index()] = Some(output);
    }

    fn link_failures(&mut self) {
        let root = self.automaton.start();
        self.automaton
            .node_mut(root)
            .set_default(Some(Target::advancing(root)));

        let mut fail = vec![root; self.automaton.node_count()];
        let mut todo = VecDeque::from([root]);
        while let Some(r) = todo.pop_front() {
            let children: Vec<(u8, NodeId)> = self
                .automaton
                .node(r)
                .edges()
                .iter()
                .flat_map(|edge| edge.values().into_iter().map(move |c| (c, edge.target())))
                .collect();

            for (c, s) in children {
                todo.push_back(s);
                let target = if r == root {
                    root
                } else {
                    let mut f = fail[r.index()];
                    loop {
                        if let Some(next) = self.child(f, c) {
                            break next;
                        }
                        if f == root {
                            break root;
                        }
                        f = fail[f.index()];
                    }
                };
                fail[s.index()] = target;
                self.automaton
                    .node_mut(s)
                    .set_default(Some(Target::non_advancing(target)));
                self.append_outputs(s, target);
            }
        }
    }

    /// Continue `node`'s chain with the chain of `failure`.
    ///
    /// `failure` is shallower than `node`, so its chain is already complete.
    fn append_outputs(&mut self, node: NodeId, failure: NodeId) {
        let tail = self.automaton.node(failure).first_output();
        if tail.is_none() {
            return;
        }
        match self.last_output[node.index()] {
            Some(last) => self.automaton.output_mut(last).set_next(tail),
            None => self.automaton.node_mut(node).set_first_output(tail),
        }
    }
}
