//! Inspectable view tree
//!
//! Widgets render to a `Node` tree instead of a toolkit-specific widget
//! hierarchy. The tree carries tags, classes, attributes, text and click
//! handlers, so hosts can map it onto their toolkit and tests can query it
//! the way a user would: by accessible label or visible text.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Click callback attached to interactive nodes
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;

/// One element of a rendered view
#[derive(Clone, Default)]
pub struct Node {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Node>,
    on_click: Option<ClickHandler>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn paragraph() -> Self {
        Self::new("p")
    }

    /// An interactive element with the `button` role
    pub fn button() -> Self {
        Self::new("div").with_attr("role", "button").with_attr("tabindex", "0")
    }

    /// A text-only node
    pub fn text(text: impl Into<String>) -> Self {
        Self::new("#text").with_text(text)
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append `child` when present
    pub fn with_optional_child(mut self, child: Option<Node>) -> Self {
        self.children.extend(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn on_click(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    pub fn with_click_handler(mut self, handler: ClickHandler) -> Self {
        self.on_click = Some(handler);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_clickable(&self) -> bool {
        self.on_click.is_some()
    }

    /// Invoke the click handler; returns whether there was one
    pub fn click(&self) -> bool {
        match &self.on_click {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Visible text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Depth-first search including this node
    pub fn find(&self, predicate: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    /// All matching nodes in document order
    pub fn find_all(&self, predicate: &dyn Fn(&Node) -> bool) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect_matches(predicate, &mut found);
        found
    }

    fn collect_matches<'a>(&'a self, predicate: &dyn Fn(&Node) -> bool, found: &mut Vec<&'a Node>) {
        if predicate(self) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_matches(predicate, found);
        }
    }

    /// Node whose `aria-label` equals `label`
    pub fn find_by_label(&self, label: &str) -> Option<&Node> {
        self.find(&|node: &Node| node.attr("aria-label") == Some(label))
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Node> {
        self.find(&|node: &Node| node.has_class(class))
    }

    pub fn find_all_by_class(&self, class: &str) -> Vec<&Node> {
        self.find_all(&|node: &Node| node.has_class(class))
    }

    /// First node whose own text equals `text`
    pub fn find_by_text(&self, text: &str) -> Option<&Node> {
        self.find(&|node: &Node| node.text.as_deref() == Some(text))
    }

    /// Serialize to HTML-like markup
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        if self.tag == "#text" {
            out.push_str(&escape(self.text.as_deref().unwrap_or_default()));
            return;
        }

        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');

        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("tag", &self.tag)
            .field("classes", &self.classes)
            .field("attrs", &self.attrs)
            .field("text", &self.text)
            .field("clickable", &self.is_clickable())
            .field("children", &self.children)
            .finish()
    }
}
