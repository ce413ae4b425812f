//! Element tree produced by the grammar.

use std::collections::BTreeMap;
use std::fmt;

/// Attribute name to value. Keys are unique; the last duplicate wins.
pub type Attributes = BTreeMap<String, String>;

/// A parsed element.
///
/// Fields are private so a parsed tree cannot be altered behind the
/// grammar's back; build trees by hand with [`Element::new`] and the
/// `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element {
    name: String,
    attributes: Attributes,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value under the same name.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// An element without children renders as `<name/>`.
    pub fn is_self_closing(&self) -> bool {
        self.children.is_empty()
    }

    /// All elements below this one, in document (pre-)order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Pre-order iterator returned by [`Element::descendants`].
///
/// Walks with an explicit stack, so deep trees do not recurse.
pub struct Descendants<'e> {
    stack: Vec<&'e Element>,
}

impl<'e> Iterator for Descendants<'e> {
    type Item = &'e Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// Renders compact markup. Any tree the grammar produced parses back to
/// itself. Values are written verbatim, so a hand-built value containing
/// `"` or a name that is not an identifier renders markup the grammar
/// rejects.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"{value}\"")?;
        }

        if self.is_self_closing() {
            return f.write_str("/>");
        }

        f.write_str(">")?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Element {
        Element::new("aaa").with_child(
            Element::new("a").with_child(
                Element::new("bbb")
                    .with_attribute("attribute1", "hi")
                    .with_child(Element::new("c"))
                    .with_child(Element::new("d")),
            ),
        )
    }

    #[test]
    fn test_new_element_is_empty() {
        let el = Element::new("a");
        assert_eq!(el.name(), "a");
        assert!(el.attributes().is_empty());
        assert!(el.children().is_empty());
        assert!(el.is_self_closing());
    }

    #[test]
    fn test_with_attribute_last_wins() {
        let el = Element::new("a")
            .with_attribute("x", "1")
            .with_attribute("x", "2");
        assert_eq!(el.attributes().len(), 1);
        assert_eq!(el.attribute("x"), Some("2"));
        assert_eq!(el.attribute("y"), None);
    }

    #[test]
    fn test_child_lookup() {
        let el = sample();
        let bbb = el.child("a").and_then(|a| a.child("bbb")).unwrap();
        assert_eq!(bbb.attribute("attribute1"), Some("hi"));
        assert!(el.child("bbb").is_none());
    }

    #[test]
    fn test_descendants_pre_order() {
        let el = sample();
        let names: Vec<&str> = el.descendants().map(Element::name).collect();
        assert_eq!(names, vec!["a", "bbb", "c", "d"]);
    }

    #[test]
    fn test_display_self_closing() {
        assert_eq!(Element::new("br").to_string(), "<br/>");
    }

    #[test]
    fn test_display_nested_with_sorted_attributes() {
        let el = Element::new("a")
            .with_attribute("y", "2")
            .with_attribute("x", "1")
            .with_child(Element::new("b"));
        assert_eq!(el.to_string(), "<a x=\"1\" y=\"2\"><b/></a>");
    }

    #[test]
    fn test_display_parsed_tree_parses_back() {
        let el = crate::Parser::parse("<a k=\"it's\"><b/><c d=\"\"/></a>").unwrap();
        assert_eq!(crate::Parser::parse(&el.to_string()).unwrap(), el);
    }

    #[test]
    fn test_display_writes_quote_verbatim() {
        // no escaping: the embedded quote ends the value early on reparse
        let el = Element::new("a").with_attribute("k", "say \"hi\"");
        assert_eq!(el.to_string(), "<a k=\"say \"hi\"\"/>");
        assert!(crate::Parser::parse(&el.to_string()).is_err());
    }
}
