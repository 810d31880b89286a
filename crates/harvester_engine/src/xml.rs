//! Namespace handling for capabilities documents.
//!
//! Element lookups go through a prefix -> URI map in which every namespace is
//! addressable by an explicit prefix. The document's default namespace is
//! exposed as `wms`.

use std::collections::BTreeMap;

use roxmltree::Node;

/// Prefix under which the default namespace is re-exposed.
pub const WMS_PREFIX: &str = "wms";

/// Namespace declarations as they appear on an element; `None` is the
/// default (unprefixed) namespace.
pub type RawNamespaceMap = BTreeMap<Option<String>, String>;

/// Prefix -> URI map where every namespace has a prefix.
pub type NamespaceMap = BTreeMap<String, String>;

/// Collects the namespaces in scope on `node`.
pub fn namespaces_of(node: Node<'_, '_>) -> RawNamespaceMap {
    node.namespaces()
        .map(|ns| (ns.name().map(str::to_string), ns.uri().to_string()))
        .collect()
}

/// Moves the default namespace, if any, under the `wms` prefix. A map without
/// a default namespace keeps exactly its prefixed entries.
pub fn normalize_namespaces(original: &RawNamespaceMap) -> NamespaceMap {
    let mut result: NamespaceMap = original
        .iter()
        .filter_map(|(prefix, uri)| prefix.as_ref().map(|p| (p.clone(), uri.clone())))
        .collect();
    if let Some(default_uri) = original.get(&None) {
        result.insert(WMS_PREFIX.to_string(), default_uri.clone());
    }
    result
}

/// Element matcher bound to a normalized namespace map.
#[derive(Debug, Clone)]
pub struct NsQuery {
    namespaces: NamespaceMap,
}

impl NsQuery {
    pub fn new(namespaces: NamespaceMap) -> Self {
        Self { namespaces }
    }

    pub fn for_document(doc: &roxmltree::Document<'_>) -> Self {
        Self::new(normalize_namespaces(&namespaces_of(doc.root_element())))
    }

    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }

    /// True when `node` is the element `prefix:local`. A prefix missing from
    /// the map matches un-namespaced elements, which is how WMS 1.1.1
    /// documents are written.
    pub fn is(&self, node: Node<'_, '_>, prefix: &str, local: &str) -> bool {
        if !node.is_element() || node.tag_name().name() != local {
            return false;
        }
        let expected = self.namespaces.get(prefix).map(String::as_str);
        node.tag_name().namespace() == expected
    }

    pub fn child<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        prefix: &str,
        local: &str,
    ) -> Option<Node<'a, 'input>> {
        node.children().find(|child| self.is(*child, prefix, local))
    }

    pub fn children<'a, 'input: 'a>(
        &'a self,
        node: Node<'a, 'input>,
        prefix: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        node.children()
            .filter(move |child| self.is(*child, prefix, local))
    }

    /// Trimmed text of the first `prefix:local` child; empty text counts as absent.
    pub fn child_text(&self, node: Node<'_, '_>, prefix: &str, local: &str) -> Option<String> {
        self.child(node, prefix, local)
            .and_then(|child| child.text())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }

    pub fn has_descendant(&self, node: Node<'_, '_>, prefix: &str, local: &str) -> bool {
        node.descendants()
            .skip(1)
            .any(|descendant| self.is(descendant, prefix, local))
    }
}
