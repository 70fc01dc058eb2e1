//! Rendering-engine independent view of a page.
//!
//! The extractor never touches `scraper`'s DOM directly. A [`PageTree`] holds
//! element, text and image nodes in document order, and can be built either
//! from HTML or by hand from test fixtures.

use scraper::{ElementRef, Html};

/// Handle to a node inside a [`PageTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String },
    Text(String),
    Image { src: String },
}

#[derive(Debug, Clone)]
struct PageNode {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct PageTree {
    nodes: Vec<PageNode>,
    body: Option<NodeId>,
}

impl PageTree {
    /// Empty tree with a single `html` root element
    pub fn new() -> Self {
        Self {
            nodes: vec![PageNode {
                kind: NodeKind::Element {
                    tag: "html".to_string(),
                },
                parent: None,
                children: Vec::new(),
            }],
            body: None,
        }
    }

    /// Build a tree from rendered HTML. Script and style bodies are dropped.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut tree = PageTree::new();
        let root = tree.root();

        // root_element() is <html>; our own root already stands in for it
        copy_children(&mut tree, root, document.root_element());
        tree
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The `<body>` element, or the root when the page has none
    pub fn body(&self) -> NodeId {
        self.body.unwrap_or_else(|| self.root())
    }

    pub fn add_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.push(parent, NodeKind::Element { tag: tag.to_string() });
        if tag.eq_ignore_ascii_case("body") && self.body.is_none() {
            self.body = Some(id);
        }
        id
    }

    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    pub fn add_image(&mut self, parent: NodeId, src: &str) -> NodeId {
        self.push(parent, NodeKind::Image { src: src.to_string() })
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(PageNode {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element { .. })
    }

    /// Concatenated text of every descendant text node, like DOM `textContent`
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.subtree(id) {
            if let NodeKind::Text(text) = &self.nodes[node.0].kind {
                out.push_str(text);
            }
        }
        out
    }

    /// Descendant elements of `id` in document order, excluding `id` itself
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.subtree(id)
            .into_iter()
            .skip(1)
            .filter(|node| self.is_element(*node))
            .collect()
    }

    /// Images under `id` in document order, with their `src`
    pub fn images(&self, id: NodeId) -> Vec<(NodeId, &str)> {
        self.subtree(id)
            .into_iter()
            .filter_map(|node| match &self.nodes[node.0].kind {
                NodeKind::Image { src } => Some((node, src.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Pre-order walk of `id` and everything below it
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        order
    }
}

impl Default for PageTree {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ancestors<'a> {
    tree: &'a PageTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

fn copy_children(tree: &mut PageTree, parent: NodeId, element: ElementRef<'_>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let tag = child_element.value().name();
            match tag {
                "script" | "style" | "noscript" | "template" => continue,
                "img" => {
                    let src = child_element.value().attr("src").unwrap_or_default();
                    tree.add_image(parent, src);
                }
                _ => {
                    let id = tree.add_element(parent, tag);
                    copy_children(tree, id, child_element);
                }
            }
        } else if let Some(text) = child.value().as_text() {
            let text: &str = text;
            if !text.is_empty() {
                tree.add_text(parent, text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_in_document_order() {
        let mut tree = PageTree::new();
        let body = tree.add_element(tree.root(), "body");
        let row = tree.add_element(body, "div");
        tree.add_text(row, "Philadelphia Phillies");
        let cell = tree.add_element(row, "span");
        tree.add_text(cell, "+113");
        tree.add_text(row, "Cincinnati Reds");

        assert_eq!(tree.body(), body);
        assert_eq!(tree.text_content(row), "Philadelphia Phillies+113Cincinnati Reds");
        assert_eq!(tree.text_content(cell), "+113");
        assert_eq!(tree.descendant_elements(body), vec![row, cell]);
    }

    #[test]
    fn test_images_and_ancestors() {
        let mut tree = PageTree::new();
        let body = tree.add_element(tree.root(), "body");
        let cell = tree.add_element(body, "div");
        let first = tree.add_image(cell, "https://cdn.example/brands/a.png");
        let second = tree.add_image(body, "https://cdn.example/brands/b.png");

        let images = tree.images(body);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0], (first, "https://cdn.example/brands/a.png"));
        assert_eq!(images[1].0, second);

        let ancestors: Vec<NodeId> = tree.ancestors(first).collect();
        assert_eq!(ancestors, vec![cell, body, tree.root()]);
    }

    #[test]
    fn test_from_html() {
        let html = r#"<html><head><script>var x = "+999";</script></head>
            <body><div id="game"><span>Chicago Cubs</span><img src="/brands/1.png"><span>-120</span></div></body></html>"#;
        let tree = PageTree::from_html(html);

        let text = tree.text_content(tree.body());
        assert!(text.contains("Chicago Cubs"));
        assert!(text.contains("-120"));
        assert!(!text.contains("+999"));

        let images = tree.images(tree.body());
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].1, "/brands/1.png");
    }
}
